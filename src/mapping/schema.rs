use crate::mapping::value::{Value, ValueType};
use log::warn;
use std::collections::HashMap;
use std::fmt;

/// Writes a converted value into a record field.
pub type FieldSetter<R> = fn(&mut R, Value);

/// Column metadata and setter for one field of a record type.
pub struct FieldDescriptor<R> {
    /// Field name, used in logs and conversion errors
    pub name: &'static str,
    /// Declared value type
    pub kind: ValueType,
    /// 1-based column position
    pub column_index: Option<usize>,
    /// Column letters, e.g. "B" or "AA"
    pub column_name: Option<String>,
    /// Never written when set
    pub ignored: bool,
    setter: FieldSetter<R>,
}

impl<R> FieldDescriptor<R> {
    pub fn new(name: &'static str, kind: ValueType, setter: FieldSetter<R>) -> Self {
        FieldDescriptor {
            name,
            kind,
            column_index: None,
            column_name: None,
            ignored: false,
            setter,
        }
    }

    /// Binds the field to a 1-based column position.
    pub fn column_index(mut self, index: usize) -> Self {
        self.column_index = Some(index);
        self
    }

    /// Binds the field to column letters; the position binding wins when both match.
    pub fn column_name(mut self, name: &str) -> Self {
        self.column_name = Some(name.to_owned());
        self
    }

    /// Excludes the field from mapping while keeping its column claim.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    pub(crate) fn set(&self, record: &mut R, value: Value) {
        (self.setter)(record, value)
    }
}

impl<R> Clone for FieldDescriptor<R> {
    fn clone(&self) -> Self {
        FieldDescriptor {
            name: self.name,
            kind: self.kind,
            column_index: self.column_index,
            column_name: self.column_name.clone(),
            ignored: self.ignored,
            setter: self.setter,
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("column_index", &self.column_index)
            .field("column_name", &self.column_name)
            .field("ignored", &self.ignored)
            .finish()
    }
}

/// Field table of a record type, indexed by 0-based column position and by
/// column letters. When several fields claim the same column, the first
/// declared one wins.
pub struct Schema<R> {
    fields: Vec<FieldDescriptor<R>>,
    by_position: HashMap<usize, usize>,
    by_name: HashMap<String, usize>,
}

impl<R> Schema<R> {
    pub fn new(fields: Vec<FieldDescriptor<R>>) -> Self {
        let mut by_position = HashMap::new();
        let mut by_name = HashMap::new();
        for (index, field) in fields.iter().enumerate() {
            match field.column_index {
                Some(0) => warn!("Field '{}' has column index 0 and never matches", field.name),
                Some(column) => {
                    by_position.entry(column - 1).or_insert(index);
                }
                None => (),
            }
            if let Some(name) = &field.column_name {
                if name.is_empty() || !name.bytes().all(|byte| byte.is_ascii_uppercase()) {
                    warn!("Field '{}' has column name '{}' and never matches", field.name, name);
                }
                by_name.entry(name.to_owned()).or_insert(index);
            }
        }
        Schema {
            fields,
            by_position,
            by_name,
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    /// Finds the field for a cell: by 0-based position first, then by
    /// column letters. An ignored field found by position still claims
    /// the cell.
    pub fn resolve(&self, position: usize, letters: &str) -> Option<&FieldDescriptor<R>> {
        self.by_position
            .get(&position)
            .or_else(|| self.by_name.get(letters))
            .map(|index| &self.fields[*index])
    }
}

impl<R> Clone for Schema<R> {
    fn clone(&self) -> Self {
        Schema {
            fields: self.fields.clone(),
            by_position: self.by_position.clone(),
            by_name: self.by_name.clone(),
        }
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema").field("fields", &self.fields).finish()
    }
}

/// A record type that can be filled from spreadsheet rows.
pub trait SheetRecord: Sized {
    /// Field table of the record; built once per mapper.
    fn schema() -> Schema<Self>;
}
