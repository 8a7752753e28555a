use crate::error::ResultMessage;
use crate::error::RustyEtlError;
use crate::pipeline::OrderRecord;
use crate::pipeline::Region;
use crate::pipeline::SourcePosition;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::open_spreadsheet;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::SpreadsheetError;
use std::path::Path;
use tracing::debug;
use tracing::info;

pub const ORDER_ID: &str = "OrderId";
pub const ORDER_ITEM_ID: &str = "OrderItemId";
pub const QUANTITY_ORDERED: &str = "QuantityOrdered";
pub const ITEM_PRICE: &str = "ItemPrice";
pub const PROMOTION_DISCOUNT: &str = "PromotionDiscount";

/// Columns every input sheet must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [ORDER_ID, ORDER_ITEM_ID, QUANTITY_ORDERED, ITEM_PRICE, PROMOTION_DISCOUNT];

/// Reads both regional files; all records of region A come before those of region B.
pub fn extract(region_a: &Path, region_b: &Path, criteria: &Criteria) -> Result<Vec<OrderRecord>, RustyEtlError> {
    let mut records = read_region(region_a, Region::A, criteria)?;
    let count_a = records.len();
    records.extend(read_region(region_b, Region::B, criteria)?);
    info!(region_a = count_a, region_b = records.len() - count_a, "extracted order records");
    Ok(records)
}

/// Reads the order sheet of one file and tags every record with `region`.
pub fn read_region(path: &Path, region: Region, criteria: &Criteria) -> Result<Vec<OrderRecord>, RustyEtlError> {
    let mut spreadsheet = open_spreadsheet(path).with_prefix(&path.to_string_lossy())?;
    let file_name = spreadsheet.name();
    let criteria = Criteria {
        sheet_limit: Some(1),
        ..criteria.clone()
    };
    let sheet = spreadsheet
        .read_sheets(&criteria)?
        .into_iter()
        .next()
        .ok_or_else(|| SpreadsheetError::SheetNotFoundError(
            file_name.to_owned(),
            describe_patterns(&criteria),
            spreadsheet.sheet_names().join(", "),
        ))?;
    debug!(file = %file_name, sheet = %sheet.name, %region, "reading order sheet");
    read_orders(&sheet, region, criteria.skip_empty_rows)
}

fn describe_patterns(criteria: &Criteria) -> String {
    criteria.sheet_name_patterns
        .iter()
        .flatten()
        .map(|pattern| pattern.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Header cells of the required columns, in [`REQUIRED_COLUMNS`] order.
struct Header<'a> {
    /// Position of the header row within the laid-out rows
    index: usize,
    cells: [(&'a Cell, usize); 5],
}

fn find_header<'a>(sheet: &Sheet, rows: &[Vec<Option<&'a Cell>>]) -> Result<Header<'a>, RustyEtlError> {
    let missing_header = || SpreadsheetError::MissingHeaderError(sheet.file_name.to_owned(), sheet.name.to_owned());
    let index = rows
        .iter()
        .position(|row| row.iter().any(Option::is_some))
        .ok_or_else(missing_header)?;
    let names = rows[index]
        .iter()
        .map(|cell| cell.map(|it| it.to_string().trim().to_owned()))
        .collect::<Vec<_>>();

    let mut cells = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for column in REQUIRED_COLUMNS {
        let position = names
            .iter()
            .position(|name| name.as_deref() == Some(column))
            .ok_or_else(|| SpreadsheetError::MissingColumnError(sheet.file_name.to_owned(), sheet.name.to_owned(), column.to_owned()))?;
        let cell = rows[index][position].ok_or_else(missing_header)?;
        cells.push((cell, position));
    }
    let cells = cells.try_into().map_err(|_| missing_header())?;
    Ok(Header { index, cells })
}

fn read_orders(sheet: &Sheet, region: Region, skip_empty_rows: bool) -> Result<Vec<OrderRecord>, RustyEtlError> {
    let rows = sheet.rows(skip_empty_rows);
    let header = find_header(sheet, &rows)?;
    let header_row = header.cells[0].0.row;

    let mut records = Vec::with_capacity(rows.len().saturating_sub(header.index + 1));
    // Rows are dense, so a row without cells has to be counted from the header
    let mut previous_row = header_row;
    for row in &rows[(header.index + 1)..] {
        let row_index = row.iter().flatten().next().map(|cell| cell.row).unwrap_or(previous_row + 1);
        previous_row = row_index;
        let field = |column: usize| row[header.cells[column].1];
        let cell_error = |reference: String, message: String| SpreadsheetError::CellValueError(
            sheet.file_name.to_owned(),
            sheet.name.to_owned(),
            reference,
            message,
        );
        // Error cells are only tolerated in the discount column
        let numeric = |column: usize| {
            match field(column) {
                Some(cell) if cell.kind == CellType::Error => {
                    Err(cell_error(cell.reference(), format!("{} holds error value {}", REQUIRED_COLUMNS[column], cell.value)))
                }
                cell => Ok(cell),
            }
        };
        let integer = |column: usize| -> Result<Option<i64>, SpreadsheetError> {
            numeric(column)?
                .map(|cell| cell.to_bigint().map_err(|message| cell_error(cell.reference(), message)))
                .transpose()
        };

        let order_id = integer(0)?.ok_or_else(|| cell_error(
            index_to_reference(row_index, header.cells[0].0.col),
            format!("{ORDER_ID} is missing"),
        ))?;
        let order_item_id = integer(1)?;
        let quantity_ordered = integer(2)?;
        let item_price = numeric(3)?
            .map(|cell| cell.to_double().map_err(|message| cell_error(cell.reference(), message)))
            .transpose()?;

        records.push(OrderRecord {
            order_id,
            order_item_id,
            quantity_ordered,
            item_price,
            promotion_discount: field(4).cloned(),
            region,
            source: SourcePosition {
                file: sheet.file_name.to_owned(),
                sheet: sheet.name.to_owned(),
                row: row_index + 1,
            },
        });
    }
    Ok(records)
}
