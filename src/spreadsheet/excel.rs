//! Office Open XML package helpers
use crate::error::SheetMapperError;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::Read;
use std::io::Seek;
use zip::ZipArchive;

/// XML tag name for relationship elements
const TAG_RELATIONSHIP: &[u8] = b"Relationship";

/// Loads worksheet relationships from a `.rels` part
///
/// # Arguments
/// * `zip` - Zip archive handle
/// * `path` - Path to the relationships XML file within the archive
///
/// # Returns
/// Mapping of relationship IDs to worksheet paths
pub(super) fn load_relationships<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    path: &str,
) -> Result<HashMap<String, String>, SheetMapperError> {
    let mut reader = zip
        .xml_reader(path)?
        .ok_or_else(|| SpreadsheetError::FileError(path.to_owned()))?;
    let mut relationships = HashMap::<String, String>::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            // Only worksheet relationships; chartsheets and the like are skipped
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(&target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Normalizes a relationship target to a path inside the archive
///
/// Targets are relative to `xl/` unless they are absolute package paths.
pub(crate) fn to_zip_path(path: &str) -> String {
    if let Some(absolute) = path.strip_prefix('/') {
        absolute.to_string()
    } else if path.starts_with("xl/") {
        path.to_string()
    } else {
        format!("xl/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_path_normalization() {
        assert_eq!(to_zip_path("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(to_zip_path("/xl/worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(to_zip_path("xl/worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
    }
}
