use crate::pipeline::OrderRecord;
use crate::pipeline::SalesRecord;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use std::collections::HashSet;
use tracing::debug;
use tracing::info;

/// Discount applied when the `PromotionDiscount` cell is blank or not a number.
pub const DEFAULT_DISCOUNT: f64 = 0.0;

/// Reads a cell as a number, falling back to `default`.
///
/// Numeric cells give their value, text is trimmed and parsed, booleans give 1 or 0.
/// Missing cells, error cells, unparsable text and NaN give `default`.
pub fn parse_or_default(cell: Option<&Cell>, default: f64) -> f64 {
    cell.filter(|cell| cell.kind != CellType::Error)
        .and_then(|cell| cell.to_double().ok())
        .filter(|value| !value.is_nan())
        .unwrap_or(default)
}

/// Deduplicates by order id (first seen wins), derives the sale amounts and
/// keeps the orders with a positive net sale.
pub fn transform(records: Vec<OrderRecord>) -> Vec<SalesRecord> {
    let input = records.len();
    let mut seen = HashSet::<i64>::with_capacity(input);
    let mut duplicates = 0usize;
    let mut excluded = 0usize;
    let mut sales = Vec::<SalesRecord>::with_capacity(input);

    for record in records {
        if !seen.insert(record.order_id) {
            duplicates += 1;
            debug!(order_id = record.order_id, source = %record.source, "dropping duplicate order");
            continue;
        }

        let promotion_discount = parse_or_default(record.promotion_discount.as_ref(), DEFAULT_DISCOUNT);
        let (Some(quantity_ordered), Some(item_price)) = (record.quantity_ordered, record.item_price) else {
            excluded += 1;
            debug!(order_id = record.order_id, source = %record.source, "excluding order without quantity or price");
            continue;
        };
        let total_sales = quantity_ordered as f64 * item_price;
        let net_sale = total_sales - promotion_discount;
        if net_sale.is_nan() || net_sale <= 0.0 {
            excluded += 1;
            debug!(order_id = record.order_id, net_sale, "excluding order with non-positive net sale");
            continue;
        }

        sales.push(SalesRecord {
            order_id: record.order_id,
            order_item_id: record.order_item_id,
            quantity_ordered,
            item_price,
            promotion_discount,
            total_sales,
            region: record.region,
            net_sale,
        });
    }

    info!(input, duplicates, excluded, output = sales.len(), "transformed order records");
    sales
}
