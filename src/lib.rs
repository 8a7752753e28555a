//! # Rusty ETL
//!
//! Two small programs over embedded DuckDB stores.
//!
//! ## Sales ETL (`sales-etl`)
//!
//! - **Extract**: reads the order sheet of two `.xlsx` workbooks (one per region)
//!   with a built-in Office Open XML reader and tags each record `A` or `B`
//! - **Transform**: deduplicates by `OrderId`, coerces `PromotionDiscount` to a number,
//!   derives `total_sales` and `net_sale`, keeps positive net sales
//! - **Load**: replaces the `sales_data` table in one transaction
//! - **Validate**: record count, sales by region, average sale and a duplicate check
//!
//! ## Joke service (`joke-service`)
//!
//! - `POST /fetch_jokes/`: fetches a batch from JokeAPI and stores it in the `jokes` table
//! - `GET /jokes/?skip=0&limit=10`: pages over the stored jokes
pub mod config;
pub mod database;
pub mod error;
pub(crate) mod helpers;
pub mod jokes;
pub mod logging;
pub mod pipeline;
pub mod spreadsheet;

#[cfg(test)]
pub(crate) mod testing;

pub use error::RustyEtlError;
