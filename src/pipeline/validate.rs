use crate::database::DatabaseError;
use crate::database::StoreConfig;
use crate::error::RustyEtlError;
use crate::pipeline::SALES_TABLE;
use std::fmt::Display;
use tracing::info;

/// Results of the read-only checks run against `sales_data`.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationReport {
    pub total_records: i64,
    /// Sum of `total_sales` per region, ordered by region
    pub sales_by_region: Vec<(String, f64)>,
    /// Mean `total_sales`, `None` for an empty table
    pub average_sales: Option<f64>,
    pub distinct_order_ids: i64,
    pub total_order_ids: i64,
}

impl ValidationReport {
    pub fn has_duplicates(&self) -> bool {
        self.distinct_order_ids != self.total_order_ids
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total number of records: {}", self.total_records)?;
        let regions = self.sales_by_region
            .iter()
            .map(|(region, total)| format!("({region}, {total:.2})"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Total sales by region: [{regions}]")?;
        match self.average_sales {
            Some(average) => writeln!(f, "Average sales per transaction: {average}")?,
            None => writeln!(f, "Average sales per transaction: n/a")?,
        }
        if self.has_duplicates() {
            write!(f, "There are duplicate OrderIds.")
        } else {
            write!(f, "No duplicate OrderIds found.")
        }
    }
}

/// Runs the record count, per-region sum, average and duplicate checks.
pub fn validate(store: &StoreConfig) -> Result<ValidationReport, RustyEtlError> {
    let connection = store.open()?;
    if !SALES_TABLE.exists(&connection)? {
        Err(DatabaseError::TableNotFound(SALES_TABLE.name.to_owned()))?
    }

    let total_records: i64 = connection.query_row("SELECT count(*) FROM sales_data", [], |row| row.get(0))?;
    let sales_by_region = connection
        .prepare("SELECT region, sum(total_sales) FROM sales_data GROUP BY region ORDER BY region")?
        .query_map([], |row| Ok((row.get::<_, Option<String>>(0)?.unwrap_or_default(), row.get::<_, Option<f64>>(1)?.unwrap_or(0.0))))?
        .collect::<Result<Vec<_>, _>>()?;
    let average_sales: Option<f64> = connection.query_row("SELECT avg(total_sales) FROM sales_data", [], |row| row.get(0))?;
    let (distinct_order_ids, total_order_ids): (i64, i64) = connection.query_row(
        "SELECT count(DISTINCT \"OrderId\"), count(\"OrderId\") FROM sales_data",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let report = ValidationReport {
        total_records,
        sales_by_region,
        average_sales,
        distinct_order_ids,
        total_order_ids,
    };
    info!(records = report.total_records, duplicates = report.has_duplicates(), "validated sales table");
    Ok(report)
}
