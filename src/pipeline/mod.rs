//! # Sales ETL
//!
//! Extract → transform → load → validate over two regional order sheets.
//! Each stage is a plain function; [`run`] chains them once.
use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::database::table::Table;
use crate::database::table::TableRow;
use crate::database::StoreConfig;
use crate::error::RustyEtlError;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::criteria::Criteria;
use duckdb::types::Value;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::info;

pub mod extract;
pub mod load;
pub mod transform;
pub mod validate;

pub use extract::extract;
pub use load::load;
pub use transform::transform;
pub use validate::validate;
pub use validate::ValidationReport;

/// The table the ETL writes.
pub const SALES_TABLE: Table = Table {
    name: "sales_data",
    columns: &[
        Column::new("OrderId", ColumnType::BigInt).primary_key(),
        Column::new("OrderItemId", ColumnType::BigInt),
        Column::new("QuantityOrdered", ColumnType::BigInt),
        Column::new("ItemPrice", ColumnType::Double),
        Column::new("PromotionDiscount", ColumnType::Double),
        Column::new("total_sales", ColumnType::Double),
        Column::new("region", ColumnType::Varchar),
        Column::new("net_sale", ColumnType::Double),
    ],
};

/// Source file tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    A,
    B,
}

impl Region {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Region::A => "A",
            Region::B => "B",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record came from, for diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct SourcePosition {
    pub file: String,
    pub sheet: String,
    /// 1-based spreadsheet row number
    pub row: usize,
}

impl Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] row {}", self.file, self.sheet, self.row)
    }
}

/// One order row as read from a regional sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderRecord {
    pub order_id: i64,
    pub order_item_id: Option<i64>,
    pub quantity_ordered: Option<i64>,
    pub item_price: Option<f64>,
    /// Left unparsed until the transform
    pub promotion_discount: Option<Cell>,
    pub region: Region,
    pub source: SourcePosition,
}

/// A transformed order, one row of [`SALES_TABLE`].
#[derive(Clone, Debug, PartialEq)]
pub struct SalesRecord {
    pub order_id: i64,
    pub order_item_id: Option<i64>,
    pub quantity_ordered: i64,
    pub item_price: f64,
    pub promotion_discount: f64,
    pub total_sales: f64,
    pub region: Region,
    pub net_sale: f64,
}

impl TableRow for SalesRecord {
    fn values(&self) -> Vec<Value> {
        vec![
            Value::BigInt(self.order_id),
            self.order_item_id.map(Value::BigInt).unwrap_or(Value::Null),
            Value::BigInt(self.quantity_ordered),
            Value::Double(self.item_price),
            Value::Double(self.promotion_discount),
            Value::Double(self.total_sales),
            Value::Text(self.region.as_str().to_owned()),
            Value::Double(self.net_sale),
        ]
    }
}

/// Inputs of one ETL run.
#[derive(Clone, Debug)]
pub struct EtlConfig {
    pub region_a: PathBuf,
    pub region_b: PathBuf,
    pub store: StoreConfig,
    /// Sheet selection and cell reading options for both files
    pub criteria: Criteria,
}

/// Runs the four stages once, top to bottom.
pub fn run(config: &EtlConfig) -> Result<ValidationReport, RustyEtlError> {
    let records = extract(&config.region_a, &config.region_b, &config.criteria)?;
    let sales = transform(records);
    let written = load(&sales, &config.store)?;
    let report = validate(&config.store)?;
    info!(written, database = %config.store.path.display(), "etl run finished");
    Ok(report)
}
