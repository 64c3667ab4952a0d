//! Records a data loader filters, and the property paths that address their fields

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dotted path to a property, e.g. `customer.address.city`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyPath(String);

impl PropertyPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|segment| !segment.is_empty())
    }

    /// The last segment, used to derive parameter names and captions.
    pub fn leaf(&self) -> &str {
        self.segments().last().unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PropertyPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PropertyPath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The value of a single record field.
///
/// Deserialized without tags, so plain JSON values map naturally; strings shaped like
/// `YYYY-MM-DD` become dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
    Nested(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Returns the type name of this field value for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "Null",
            FieldValue::Boolean(_) => "Boolean",
            FieldValue::Integer(_) => "Integer",
            FieldValue::Float(_) => "Float",
            FieldValue::Date(_) => "Date",
            FieldValue::Text(_) => "Text",
            FieldValue::Nested(_) => "Nested",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Nested(fields) => write!(f, "{{{} fields}}", fields.len()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// A single row of data identified by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Resolves a property path through nested fields.
    pub fn get(&self, path: &PropertyPath) -> Option<&FieldValue> {
        let mut segments = path.segments();
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            match current {
                FieldValue::Nested(fields) => current = fields.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// All leaf property paths of this record, sorted.
    pub fn property_paths(&self) -> Vec<PropertyPath> {
        let mut paths = Vec::new();
        collect_paths("", &self.fields, &mut paths);
        paths.sort();
        paths
    }
}

fn collect_paths(prefix: &str, fields: &BTreeMap<String, FieldValue>, paths: &mut Vec<PropertyPath>) {
    for (name, value) in fields {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        match value {
            FieldValue::Nested(nested) => collect_paths(&path, nested, paths),
            _ => paths.push(PropertyPath::new(path)),
        }
    }
}
