//! Common utilities for integration tests.
//!
//! Workbooks are assembled in memory as minimal xlsx packages, so the tests
//! need no fixture files on disk.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// A cell written by [`WorkbookBuilder::sheet`].
pub enum Data<'a> {
    Text(&'a str),
    Number(&'a str),
    Shared(usize),
}

/// Builder for an in-memory xlsx package.
#[derive(Default)]
pub struct WorkbookBuilder {
    sheets: Vec<(String, String)>,
    shared_strings: Option<Vec<String>>,
    prefix: Option<String>,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a worksheet whose rows are laid out from column A.
    pub fn sheet(self, name: &str, rows: &[&[Data]]) -> Self {
        let mut xml = String::new();
        for (row_index, cells) in rows.iter().enumerate() {
            let number = row_index + 1;
            xml.push_str(&format!("<row r=\"{number}\">"));
            for (col_index, data) in cells.iter().enumerate() {
                let reference = format!("{}{}", column_name(col_index), number);
                let cell = match data {
                    Data::Text(text) => format!(
                        "<c r=\"{reference}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                        escape(text)
                    ),
                    Data::Number(number) => format!("<c r=\"{reference}\"><v>{number}</v></c>"),
                    Data::Shared(index) => format!("<c r=\"{reference}\" t=\"s\"><v>{index}</v></c>"),
                };
                xml.push_str(&cell);
            }
            xml.push_str("</row>");
        }
        self.raw_sheet(name, &xml)
    }

    /// Adds a worksheet with hand-written `<sheetData>` content.
    pub fn raw_sheet(mut self, name: &str, sheet_data: &str) -> Self {
        self.sheets.push((name.to_owned(), sheet_data.to_owned()));
        self
    }

    /// Adds a shared string table with plain items.
    pub fn shared_strings(self, strings: &[&str]) -> Self {
        let items = strings
            .iter()
            .map(|string| format!("<si><t>{}</t></si>", escape(string)))
            .collect::<Vec<_>>();
        self.raw_shared_strings(&items)
    }

    /// Adds a shared string table with hand-written `<si>` items.
    pub fn raw_shared_strings(mut self, items: &[String]) -> Self {
        self.shared_strings = Some(items.to_vec());
        self
    }

    /// Writes the workbook, worksheet and shared string parts with a
    /// namespace prefix (`<x:workbook xmlns:x=...>`). Content passed to
    /// `raw_sheet` and `raw_shared_strings` is written as given.
    pub fn namespace_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_owned());
        self
    }

    /// Element name with the configured prefix
    fn tag(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{name}"),
            None => name.to_owned(),
        }
    }

    /// Main namespace declaration matching the configured prefix
    fn main_namespace(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("xmlns:{prefix}=\"{NS_MAIN}\""),
            None => format!("xmlns=\"{NS_MAIN}\""),
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let mut write = |path: &str, content: &str| {
            zip.start_file(path, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        };

        write("[Content_Types].xml", &self.content_types());
        write(
            "_rels/.rels",
            &format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
                 <Relationships xmlns=\"{NS_PACKAGE_RELATIONSHIPS}\">\
                 <Relationship Id=\"rId1\" Type=\"{NS_RELATIONSHIPS}/officeDocument\" Target=\"xl/workbook.xml\"/>\
                 </Relationships>"
            ),
        );
        write("xl/workbook.xml", &self.workbook());
        write("xl/_rels/workbook.xml.rels", &self.workbook_relationships());
        let namespace = self.main_namespace();
        if let Some(items) = &self.shared_strings {
            let sst = self.tag("sst");
            write(
                "xl/sharedStrings.xml",
                &format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
                     <{sst} {namespace} count=\"{0}\" uniqueCount=\"{0}\">{1}</{sst}>",
                    items.len(),
                    items.concat()
                ),
            );
        }
        let worksheet = self.tag("worksheet");
        let sheet_data_tag = self.tag("sheetData");
        for (index, (_, sheet_data)) in self.sheets.iter().enumerate() {
            write(
                &format!("xl/worksheets/sheet{}.xml", index + 1),
                &format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
                     <{worksheet} {namespace}><{sheet_data_tag}>{sheet_data}</{sheet_data_tag}></{worksheet}>"
                ),
            );
        }

        zip.finish().unwrap().into_inner()
    }

    fn content_types(&self) -> String {
        let mut overrides = String::new();
        for index in 1..=self.sheets.len() {
            overrides.push_str(&format!(
                "<Override PartName=\"/xl/worksheets/sheet{index}.xml\" \
                 ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>"
            ));
        }
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
             <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
             <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
             <Override PartName=\"/xl/workbook.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
             {overrides}</Types>"
        )
    }

    fn workbook(&self) -> String {
        let sheet = self.tag("sheet");
        let sheets = self
            .sheets
            .iter()
            .enumerate()
            .map(|(index, (name, _))| {
                format!(
                    "<{sheet} name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
                    escape(name),
                    index + 1,
                    index + 1
                )
            })
            .collect::<String>();
        let workbook = self.tag("workbook");
        let sheets_tag = self.tag("sheets");
        let namespace = self.main_namespace();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <{workbook} {namespace} xmlns:r=\"{NS_RELATIONSHIPS}\">\
             <{sheets_tag}>{sheets}</{sheets_tag}></{workbook}>"
        )
    }

    fn workbook_relationships(&self) -> String {
        let mut relationships = (1..=self.sheets.len())
            .map(|index| {
                format!(
                    "<Relationship Id=\"rId{index}\" Type=\"{NS_RELATIONSHIPS}/worksheet\" \
                     Target=\"worksheets/sheet{index}.xml\"/>"
                )
            })
            .collect::<String>();
        if self.shared_strings.is_some() {
            relationships.push_str(&format!(
                "<Relationship Id=\"rIdSst\" Type=\"{NS_RELATIONSHIPS}/sharedStrings\" Target=\"sharedStrings.xml\"/>"
            ));
        }
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Relationships xmlns=\"{NS_PACKAGE_RELATIONSHIPS}\">{relationships}</Relationships>"
        )
    }
}

fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
