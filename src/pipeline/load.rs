use crate::database::table::TableRow;
use crate::database::StoreConfig;
use crate::error::RustyEtlError;
use crate::pipeline::SalesRecord;
use crate::pipeline::SALES_TABLE;
use duckdb::params_from_iter;
use tracing::info;

/// Replaces the content of `sales_data` with `records` and returns the number of rows written.
///
/// The table is dropped and recreated inside one transaction, so a failure leaves
/// the previous content in place.
pub fn load(records: &[SalesRecord], store: &StoreConfig) -> Result<usize, RustyEtlError> {
    let mut connection = store.open()?;
    let transaction = connection.transaction()?;
    transaction.execute_batch(&format!("{};\n{};", SALES_TABLE.drop_sql(), SALES_TABLE.create_sql(false)))?;
    {
        let mut statement = transaction.prepare(&SALES_TABLE.insert_sql())?;
        for record in records {
            statement.execute(params_from_iter(record.values()))?;
        }
    }
    transaction.commit()?;
    info!(rows = records.len(), table = SALES_TABLE.name, database = %store.path.display(), "loaded sales records");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Region;

    fn sale(order_id: i64, region: Region, total_sales: f64) -> SalesRecord {
        SalesRecord {
            order_id,
            order_item_id: Some(order_id + 100),
            quantity_ordered: 1,
            item_price: total_sales,
            promotion_discount: 0.0,
            total_sales,
            region,
            net_sale: total_sales,
        }
    }

    fn order_ids(store: &StoreConfig) -> Vec<i64> {
        let connection = store.open().unwrap();
        let mut statement = connection.prepare("SELECT \"OrderId\" FROM sales_data ORDER BY \"OrderId\"").unwrap();
        statement.query_map([], |row| row.get(0)).unwrap().collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn creates_the_declared_table() {
        let directory = tempfile::tempdir().unwrap();
        let store = StoreConfig::new(directory.path().join("sales_data.db"));
        assert_eq!(load(&[sale(1, Region::A, 5.0)], &store).unwrap(), 1);

        let connection = store.open().unwrap();
        SALES_TABLE.verify(&connection).unwrap();
        let (region, item_id): (String, Option<i64>) = connection
            .query_row("SELECT region, \"OrderItemId\" FROM sales_data", [], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap();
        assert_eq!(region, "A");
        assert_eq!(item_id, Some(101));
    }

    #[test]
    fn replaces_previous_content() {
        let directory = tempfile::tempdir().unwrap();
        let store = StoreConfig::new(directory.path().join("sales_data.db"));
        load(&[sale(1, Region::A, 5.0), sale(2, Region::B, 6.0)], &store).unwrap();
        load(&[sale(2, Region::A, 7.0), sale(3, Region::B, 8.0)], &store).unwrap();
        assert_eq!(order_ids(&store), vec![2, 3]);

        load(&[], &store).unwrap();
        assert!(order_ids(&store).is_empty());
    }

    #[test]
    fn replaces_table_with_a_different_layout() {
        let directory = tempfile::tempdir().unwrap();
        let store = StoreConfig::new(directory.path().join("sales_data.db"));
        store.open().unwrap().execute_batch("CREATE TABLE sales_data (OrderId VARCHAR, note VARCHAR)").unwrap();
        load(&[sale(4, Region::B, 1.0)], &store).unwrap();
        assert_eq!(order_ids(&store), vec![4]);
    }

    #[test]
    fn failed_load_keeps_previous_content() {
        let directory = tempfile::tempdir().unwrap();
        let store = StoreConfig::new(directory.path().join("sales_data.db"));
        load(&[sale(1, Region::A, 5.0)], &store).unwrap();
        // A repeated key violates the primary key
        assert!(load(&[sale(2, Region::A, 5.0), sale(2, Region::B, 6.0)], &store).is_err());
        assert_eq!(order_ids(&store), vec![1]);
    }
}
