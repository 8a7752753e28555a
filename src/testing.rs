//! Writes small `.xlsx` workbooks for tests.
use quick_xml::escape::escape;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const WORKSHEET_RELATIONSHIP: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

/// Cell content of a fixture row.
#[derive(Clone, Debug)]
pub(crate) enum TestCell {
    /// No `<c>` element at all
    Blank,
    /// Inline string
    Text(&'static str),
    /// Entry of the shared string table
    Shared(&'static str),
    Number(&'static str),
    Bool(bool),
    /// Error cell such as `#DIV/0!`
    Error(&'static str),
}

#[derive(Default)]
pub(crate) struct WorkbookBuilder {
    sheets: Vec<(String, Vec<Vec<TestCell>>)>,
}

impl WorkbookBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sheet(mut self, name: &str, rows: Vec<Vec<TestCell>>) -> Self {
        self.sheets.push((name.to_owned(), rows));
        self
    }

    /// Writes the workbook into `directory` and returns its path.
    pub(crate) fn write(&self, directory: &Path, file_name: &str) -> PathBuf {
        let path = directory.join(file_name);
        let mut shared_strings = Vec::<&'static str>::new();
        let mut worksheets = Vec::<String>::new();
        for (_, rows) in &self.sheets {
            worksheets.push(worksheet_xml(rows, &mut shared_strings));
        }

        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        let mut part = |name: &str, content: &str| {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        };
        part("[Content_Types].xml", r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#);
        part("xl/workbook.xml", &self.workbook_xml());
        part("xl/_rels/workbook.xml.rels", &self.relationships_xml());
        for (index, worksheet) in worksheets.iter().enumerate() {
            part(&format!("xl/worksheets/sheet{}.xml", index + 1), worksheet);
        }
        if !shared_strings.is_empty() {
            part("xl/sharedStrings.xml", &shared_strings_xml(&shared_strings));
        }
        writer.finish().unwrap();
        path
    }

    fn workbook_xml(&self) -> String {
        let sheets: String = self.sheets
            .iter()
            .enumerate()
            .map(|(index, (name, _))| format!(r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#, escape(name.as_str()), index + 1, index + 1))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><workbookPr/><sheets>{sheets}</sheets></workbook>"#
        )
    }

    fn relationships_xml(&self) -> String {
        let relationships: String = (1..=self.sheets.len())
            .map(|index| format!(r#"<Relationship Id="rId{index}" Type="{WORKSHEET_RELATIONSHIP}" Target="worksheets/sheet{index}.xml"/>"#))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{relationships}</Relationships>"#
        )
    }
}

fn worksheet_xml(rows: &[Vec<TestCell>], shared_strings: &mut Vec<&'static str>) -> String {
    let mut data = String::new();
    for (row, cells) in rows.iter().enumerate() {
        data.push_str(&format!(r#"<row r="{}">"#, row + 1));
        for (col, cell) in cells.iter().enumerate() {
            let reference = crate::spreadsheet::reference::index_to_reference(row, col);
            let element = match cell {
                TestCell::Blank => continue,
                TestCell::Text(text) => format!(r#"<c r="{reference}" t="inlineStr"><is><t>{}</t></is></c>"#, escape(*text)),
                TestCell::Shared(text) => {
                    let index = shared_strings.iter().position(|it| it == text).unwrap_or_else(|| {
                        shared_strings.push(*text);
                        shared_strings.len() - 1
                    });
                    format!(r#"<c r="{reference}" t="s"><v>{index}</v></c>"#)
                }
                TestCell::Number(number) => format!(r#"<c r="{reference}"><v>{number}</v></c>"#),
                TestCell::Bool(value) => format!(r#"<c r="{reference}" t="b"><v>{}</v></c>"#, u8::from(*value)),
                TestCell::Error(error) => format!(r#"<c r="{reference}" t="e"><v>{}</v></c>"#, escape(*error)),
            };
            data.push_str(&element);
        }
        data.push_str("</row>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{data}</sheetData></worksheet>"#
    )
}

fn shared_strings_xml(shared_strings: &[&str]) -> String {
    let items: String = shared_strings
        .iter()
        .map(|text| format!("<si><t>{}</t></si>", escape(*text)))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{items}</sst>"#,
        shared_strings.len()
    )
}
