use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::Value;

/// Name of the field every record carries
pub const YEAR_FIELD: &str = "year";

/// One row of typed data for a category and year.
///
/// Field order follows the source table, with `year` always first.
#[derive(Debug, Clone, PartialEq)]
pub struct YearRecord {
    year: i32,
    fields: IndexMap<String, Value>,
}

impl YearRecord {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            fields: IndexMap::new(),
        }
    }

    /// Set a field. A column named `year` never overrides the queried year.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if name == YEAR_FIELD {
            return;
        }
        self.fields.insert(name, value);
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Look up a field; `year` resolves to the queried year
    pub fn get(&self, name: &str) -> Option<Value> {
        if name == YEAR_FIELD {
            return Some(Value::Integer(i64::from(self.year)));
        }
        self.fields.get(name).cloned()
    }

    /// Field names in order, `year` first
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(YEAR_FIELD).chain(self.fields.keys().map(String::as_str))
    }

    /// Number of fields, counting `year`
    pub fn len(&self) -> usize {
        self.fields.len() + 1
    }

    /// Always false: `year` is always present
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for YearRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        map.serialize_entry(YEAR_FIELD, &self.year)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_is_first_and_serialized_flat() {
        let record = YearRecord::new(2020)
            .with("Produto", "Tinto")
            .with("Quantidade (L)", 1500.0);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"year":2020,"Produto":"Tinto","Quantidade (L)":1500.0}"#
        );
    }

    #[test]
    fn test_year_column_cannot_override() {
        let record = YearRecord::new(2021).with("year", "1999");
        assert_eq!(record.year(), 2021);
        assert_eq!(record.len(), 1);
    }
}
