//! # Joke Service
//!
//! Fetches jokes from JokeAPI into the `jokes` table and pages over them through
//! two HTTP endpoints.
pub mod api;
pub mod model;
pub mod store;
pub mod server;

pub use api::JokeApiClient;
pub use api::JokeSource;
pub use server::router;
pub use server::serve;
pub use server::AppState;
pub use store::JokeStore;
