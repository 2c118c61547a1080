use crate::error::ResultMessage;
use crate::error::SheetMapperError;
use crate::helpers::reader::SourceReader;
use crate::helpers::xml::XmlAttributeHelper;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::excel::load_relationships;
use crate::spreadsheet::sheet::Row;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use crate::spreadsheet::SpreadsheetError;
use log::debug;
use quick_xml::events::Event;
use std::borrow::Cow;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

// XML tag names for parsing Excel XLSX format
const TAG_SHARED_STRING_ITEM: &[u8] = b"si";   // Shared string table item
const TAG_PHONETIC_TEXT: &[u8] = b"rPh";       // Phonetic text for Asian languages
const TAG_TEXT: &[u8] = b"t";                  // Text content within strings
const TAG_SHEET: &[u8] = b"sheet";             // Worksheet definition
const TAG_ROW: &[u8] = b"row";                 // Row in worksheet
const TAG_CELL: &[u8] = b"c";                  // Cell in worksheet
const TAG_INLINE_STRING: &[u8] = b"is";        // Inline string value
const TAG_VALUE: &[u8] = b"v";                 // Cell value content

const PATH_WORKBOOK: &str = "xl/workbook.xml";
const PATH_WORKBOOK_RELATIONSHIPS: &str = "xl/_rels/workbook.xml.rels";
const PATH_SHARED_STRINGS: &str = "xl/sharedStrings.xml";

/// An Excel XLSX workbook opened for reading
pub struct XlsxSpreadsheet {
    /// File name, or a placeholder for in-memory streams
    name: String,
    /// ZIP archive containing the package parts
    zip: ZipArchive<SourceReader>,
    /// Shared string table in item order
    shared_strings: Vec<String>,
    /// Worksheets as (name, zip_path) pairs in workbook order
    sheets: Vec<(String, String)>,
}

impl XlsxSpreadsheet {
    /// Opens an XLSX file from a local path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<XlsxSpreadsheet, SheetMapperError> {
        let name = path.as_ref().display().to_string();
        let reader = SourceReader::open(path)?;
        Self::load(name, reader)
    }

    /// Opens an XLSX package from a readable stream
    ///
    /// The stream is read to the end before parsing because the ZIP
    /// directory sits at the end of the package.
    pub fn from_reader<R: Read>(reader: R) -> Result<XlsxSpreadsheet, SheetMapperError> {
        let reader = SourceReader::from_reader(reader)?;
        Self::load("<stream>".to_owned(), reader)
    }

    fn load(name: String, reader: SourceReader) -> Result<XlsxSpreadsheet, SheetMapperError> {
        let mut zip = ZipArchive::new(reader)
            .map_err(|error| SpreadsheetError::DocumentFormatError(format!("{name}: {error}")))?;
        if zip.file(PATH_WORKBOOK)?.is_none() {
            Err(SpreadsheetError::DocumentFormatError(format!("{name}: missing {PATH_WORKBOOK}")))?;
        }

        let sheets = load_workbook(&mut zip)?;
        let shared_strings = load_shared_strings(&mut zip)?;
        debug!(
            "Opened '{}' with {} worksheets and {} shared strings",
            name,
            sheets.len(),
            shared_strings.len()
        );

        Ok(XlsxSpreadsheet {
            name,
            zip,
            shared_strings,
            sheets,
        })
    }

    /// Parses one worksheet part into rows of raw cells
    fn read_sheet(&mut self, sheet_name: &str, zip_path: &str) -> Result<Sheet, SheetMapperError> {
        let mut sheet = Sheet::new(sheet_name);
        let mut reader = self
            .zip
            .xml_reader(zip_path)?
            .ok_or_else(|| SpreadsheetError::FileError(zip_path.to_owned()))?;
        let mut row: Option<Row> = None;
        let mut cell: Option<Cell> = None;
        match_xml_events!(reader => {
            Event::Start(event) if event.local_name().as_ref() == TAG_ROW => {
                let number = match event.parse_attribute_value::<usize>("r")? {
                    Some(number) => number,
                    None => sheet.next_row_number(),
                };
                row = Some(Row::new(number));
            }
            Event::End(event) if event.local_name().as_ref() == TAG_ROW => {
                if let Some(row) = row.take() {
                    sheet.rows.push(row);
                }
            }
            Event::Start(event) if row.is_some() && event.local_name().as_ref() == TAG_CELL => {
                let reference = event.get_attribute_value("r")?.unwrap_or_default();
                let kind = CellType::parse(event.get_attribute_value("t")?.as_deref());
                cell = Some(Cell::new(&reference, kind, ""));
            }
            Event::End(event) if event.local_name().as_ref() == TAG_CELL => {
                if let Some((row, cell)) = row.as_mut().zip(cell.take()) {
                    row.push(cell);
                }
            }
            Event::Start(event) if cell.is_some() && event.local_name().as_ref() == TAG_VALUE => {
                let value = reader.read_text(TAG_VALUE, TAG_TEXT, TAG_PHONETIC_TEXT, true)?;
                if let Some(cell) = cell.as_mut() {
                    cell.value = value;
                }
            }
            Event::Start(event) if cell.is_some() && event.local_name().as_ref() == TAG_INLINE_STRING => {
                let value = reader.read_text(TAG_INLINE_STRING, TAG_TEXT, TAG_PHONETIC_TEXT, false)?;
                if let Some(cell) = cell.as_mut() {
                    cell.value = value;
                }
            }
        });
        debug!("Read worksheet '{}' with {} rows", sheet_name, sheet.rows.len());
        Ok(sheet)
    }
}

impl Spreadsheet for XlsxSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    /// Reads the accepted worksheets in workbook order
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, SheetMapperError> {
        let selected = self
            .sheets
            .iter()
            .filter(|(name, _)| criteria.accept(name))
            .cloned()
            .collect::<Vec<_>>();
        let mut sheets = Vec::with_capacity(selected.len());
        for (sheet_name, zip_path) in &selected {
            let sheet = self
                .read_sheet(sheet_name, zip_path)
                .with_prefix(&format!("Read worksheet '{sheet_name}'"))?;
            sheets.push(sheet);
        }
        Ok(sheets)
    }

    fn shared_string(&self, index: usize) -> Result<&str, SheetMapperError> {
        self.shared_strings
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| SpreadsheetError::SharedStringIndexError(index.to_string()).into())
    }
}

/// Loads worksheet names and part paths from `xl/workbook.xml`
///
/// Sheets whose relationship is missing or is not a worksheet are skipped.
fn load_workbook(zip: &mut ZipArchive<SourceReader>) -> Result<Vec<(String, String)>, SheetMapperError> {
    let relationships = load_relationships(zip, PATH_WORKBOOK_RELATIONSHIPS)?;
    let mut reader = zip
        .xml_reader(PATH_WORKBOOK)?
        .ok_or_else(|| SpreadsheetError::FileError(PATH_WORKBOOK.to_owned()))?;
    let mut sheets = Vec::<(String, String)>::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_SHEET => {
            let mut name = None::<Cow<str>>;
            let mut id = None::<Cow<str>>;
            for result in event.attributes() {
                let attribute = result?;
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.get_value()?);
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.get_value()?);
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(&*id) {
                    sheets.push((name.into_owned(), path.to_owned()));
                }
            }
        }
    });
    Ok(sheets)
}

/// Loads the shared string table; a workbook without one has no shared strings
fn load_shared_strings(zip: &mut ZipArchive<SourceReader>) -> Result<Vec<String>, SheetMapperError> {
    let mut shared_strings = Vec::<String>::new();
    let mut reader = match zip.xml_reader(PATH_SHARED_STRINGS)? {
        Some(reader) => reader,
        None => return Ok(shared_strings),
    };
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_SHARED_STRING_ITEM => {
            let string = reader.read_text(TAG_SHARED_STRING_ITEM, TAG_TEXT, TAG_PHONETIC_TEXT, false)?;
            shared_strings.push(string);
        }
    });
    Ok(shared_strings)
}
