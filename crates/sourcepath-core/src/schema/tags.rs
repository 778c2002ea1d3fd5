//! Tagged values recognised on classes, properties and associations.

use indexmap::IndexMap;

/// Explicit associative table name, on a property or its association.
pub const ASSOCIATIVE_TABLE: &str = "associativeTable";

/// Explicit table name for a class.
pub const TABLE_NAME: &str = "tableName";

/// Display attribute of a class, used when encoding links as objects.
pub const TITLE_ATTRIBUTE: &str = "titleAttribute";

/// Per-class data type table strategy: `several` or `shared`.
pub const DATA_TYPE_TABLES: &str = "dataTypeTables";

/// Characters with meaning in the source path grammar. Table names given
/// by tags or configuration must not contain them.
pub const RESERVED_CHARS: &[char] = &['[', ']', '{', '}', '=', '/'];

/// Returns the first reserved path character in `name`, if any.
pub fn reserved_char(name: &str) -> Option<char> {
    name.chars().find(|c| RESERVED_CHARS.contains(c))
}

/// Free-form key/value overrides attached to a model element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    values: IndexMap<String, String>,
}

impl Tags {
    pub fn new() -> Tags {
        Tags::default()
    }

    /// Returns the tag value, treating blank values as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Tags {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
