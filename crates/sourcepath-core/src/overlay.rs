//! Encoding-info overlay: a previously captured table/column layout that
//! takes precedence over derived source paths.

use crate::{Error, Result, ValueType};
use serde::Deserialize;

/// Ground-truth encoding of one property in one source table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingInfo {
    /// Names at capture time. Absent names equal the current ones.
    #[serde(default)]
    pub original_schema_name: Option<String>,
    #[serde(default)]
    pub original_class_name: Option<String>,
    #[serde(default)]
    pub original_property_name: Option<String>,

    pub schema_name: String,
    pub class_name: String,
    pub property_name: String,

    #[serde(default)]
    pub source_table: Option<String>,

    #[serde(default)]
    pub source_path: Option<String>,

    #[serde(default)]
    pub value_type: Option<ValueType>,

    #[serde(default)]
    pub ref_type: Option<String>,

    #[serde(default)]
    pub ref_uri_template: Option<String>,

    #[serde(default)]
    pub target_table: Option<String>,

    /// Orders several entries recorded for the same property.
    #[serde(default)]
    pub order: i64,
}

/// Read-only set of [`EncodingInfo`] entries, in load order.
#[derive(Debug, Clone, Default)]
pub struct EncodingInfos {
    entries: Vec<EncodingInfo>,
}

impl EncodingInfo {
    fn matches_original(&self, property: &str, class: &str, schema: &str) -> bool {
        let original_property = self.original_property_name.as_deref();
        let original_class = self.original_class_name.as_deref();
        let original_schema = self.original_schema_name.as_deref();

        original_property.unwrap_or(&self.property_name) == property
            && original_class.unwrap_or(&self.class_name) == class
            && original_schema.unwrap_or(&self.schema_name) == schema
    }

    fn matches_current(&self, property: &str, class: &str, schema: &str) -> bool {
        self.property_name == property && self.class_name == class && self.schema_name == schema
    }
}

impl EncodingInfos {
    pub fn new(entries: Vec<EncodingInfo>) -> Result<EncodingInfos> {
        for entry in &entries {
            if entry.property_name.is_empty()
                || entry.class_name.is_empty()
                || entry.schema_name.is_empty()
            {
                return Err(Error::invalid_overlay(format!(
                    "entry `{}::{}` in schema `{}` has an empty name",
                    entry.class_name, entry.property_name, entry.schema_name
                )));
            }
        }

        Ok(EncodingInfos { entries })
    }

    /// Loads entries from a JSON array.
    pub fn from_json(src: &str) -> Result<EncodingInfos> {
        let entries: Vec<EncodingInfo> = serde_json::from_str(src)
            .map_err(|err| Error::from(err).context(Error::invalid_overlay("cannot parse")))?;
        EncodingInfos::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries recorded for a property within `source_table`.
    ///
    /// Entries matching the names at capture time are preferred; only when
    /// none does are the current names tried. The result is ordered by
    /// [`EncodingInfo::order`], ties keeping load order.
    pub fn lookup(
        &self,
        property: &str,
        class: &str,
        schema: &str,
        source_table: Option<&str>,
    ) -> Vec<&EncodingInfo> {
        // A context without a table never matches, not even entries
        // recorded without one
        let Some(source_table) = source_table else {
            return vec![];
        };

        let in_table = || {
            self.entries
                .iter()
                .filter(move |entry| entry.source_table.as_deref() == Some(source_table))
        };

        let mut found: Vec<_> = in_table()
            .filter(|entry| entry.matches_original(property, class, schema))
            .collect();

        if found.is_empty() {
            found = in_table()
                .filter(|entry| entry.matches_current(property, class, schema))
                .collect();
        }

        found.sort_by_key(|entry| entry.order);
        found
    }
}
