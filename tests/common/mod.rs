//! Shared fixtures: small .ods / .xlsx workbooks built cell by cell

#![allow(dead_code)]

use merit_progression::excel::CellRef;
use rust_xlsxwriter::Workbook;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const ODS_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

const ODS_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
 <manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet"/>
 <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
</manifest:manifest>
"#;

#[derive(Debug, Clone)]
pub enum FixtureCell {
    Text(String),
    Number(f64),
    /// ISO date, written as an ODF date cell
    Date(String),
}

/// One sheet of a fixture workbook
#[derive(Debug, Clone)]
pub struct SheetFixture {
    pub name: String,
    cells: BTreeMap<(usize, usize), FixtureCell>,
}

impl SheetFixture {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: BTreeMap::new(),
        }
    }

    pub fn text(mut self, address: &str, value: &str) -> Self {
        let at = CellRef::parse(address).unwrap();
        self.cells
            .insert((at.row, at.col), FixtureCell::Text(value.to_string()));
        self
    }

    pub fn number(mut self, address: &str, value: f64) -> Self {
        let at = CellRef::parse(address).unwrap();
        self.cells.insert((at.row, at.col), FixtureCell::Number(value));
        self
    }

    pub fn date(mut self, address: &str, iso: &str) -> Self {
        let at = CellRef::parse(address).unwrap();
        self.cells.insert((at.row, at.col), FixtureCell::Date(iso.to_string()));
        self
    }

    /// The shared header cells C5/C6/C9/C10
    pub fn with_header(self, month_year: &str, sequence: &str, justification: &str, doc: &str) -> Self {
        self.text("C5", month_year)
            .text("C6", sequence)
            .text("C9", justification)
            .text("C10", doc)
    }

    fn content_xml(&self) -> String {
        let mut xml = format!("<table:table table:name=\"{}\">", escape(&self.name));
        let last_row = self.cells.keys().map(|(r, _)| *r).max().unwrap_or(0);

        for row in 0..=last_row {
            xml.push_str("<table:table-row>");
            let last_col = self
                .cells
                .keys()
                .filter(|(r, _)| *r == row)
                .map(|(_, c)| *c)
                .max()
                .unwrap_or(0);
            for col in 0..=last_col {
                match self.cells.get(&(row, col)) {
                    Some(FixtureCell::Text(s)) => xml.push_str(&format!(
                        "<table:table-cell office:value-type=\"string\"><text:p>{}</text:p></table:table-cell>",
                        escape(s)
                    )),
                    Some(FixtureCell::Number(n)) => xml.push_str(&format!(
                        "<table:table-cell office:value-type=\"float\" office:value=\"{}\"><text:p>{}</text:p></table:table-cell>",
                        n, n
                    )),
                    Some(FixtureCell::Date(iso)) => xml.push_str(&format!(
                        "<table:table-cell office:value-type=\"date\" office:date-value=\"{}\"><text:p>{}</text:p></table:table-cell>",
                        iso, iso
                    )),
                    None => xml.push_str("<table:table-cell></table:table-cell>"),
                }
            }
            xml.push_str("</table:table-row>");
        }

        xml.push_str("</table:table>");
        xml
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write a minimal OpenDocument spreadsheet
pub fn write_ods(path: &Path, sheets: &[SheetFixture]) {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" office:version="1.2"><office:body><office:spreadsheet>"#,
    );
    for sheet in sheets {
        content.push_str(&sheet.content_xml());
    }
    content.push_str("</office:spreadsheet></office:body></office:document-content>");

    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(ODS_MIMETYPE.as_bytes()).unwrap();
    zip.start_file("META-INF/manifest.xml", deflated).unwrap();
    zip.write_all(ODS_MANIFEST.as_bytes()).unwrap();
    zip.start_file("content.xml", deflated).unwrap();
    zip.write_all(content.as_bytes()).unwrap();
    zip.finish().unwrap();
}

/// Write the same cells as an .xlsx workbook
pub fn write_xlsx(path: &Path, sheets: &[SheetFixture]) {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name).unwrap();
        for ((row, col), cell) in &sheet.cells {
            let (row, col) = (*row as u32, *col as u16);
            match cell {
                FixtureCell::Text(s) | FixtureCell::Date(s) => {
                    worksheet.write_string(row, col, s).unwrap();
                }
                FixtureCell::Number(n) => {
                    worksheet.write_number(row, col, *n).unwrap();
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

/// Read one part of a zip container (.xlsx / .ods) as text
pub fn read_zip_part(path: &Path, part: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut file = archive.by_name(part).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

/// The end-to-end sheet: one identified row with one non-zero amount
pub fn jane_doe_sheet(name: &str) -> SheetFixture {
    SheetFixture::new(name)
        .with_header("2025-01", "SEQ1", "justif", "doc1")
        .text("A13", "Jane")
        .text("B13", "Doe")
        .text("J13", "100,00")
        .text("N13", "0,00")
}
