mod map_entry;
pub use map_entry::{characteristic, MapEntry, TargetKind};

use crate::{
    schema::{tags, Class, Property},
    Error, Result, ValueType,
};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

/// Mapping configuration for one generation run.
///
/// Loaded once by the surrounding generator and passed by reference to the
/// provider; it is never mutated during resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Type-to-target-type overrides.
    pub map_entries: Vec<MapEntry>,

    /// Derived names are truncated to this many characters.
    pub max_name_length: usize,

    /// Template for associative table names. Must contain `{class}` and
    /// `{property}`.
    pub associative_table_template: String,

    /// Suffix of foreign key columns referencing a type with identity.
    pub foreign_key_suffix: String,

    /// Suffix of foreign key columns referencing a data type table.
    pub foreign_key_suffix_datatype: String,

    /// Suffix of foreign key columns referencing a code list table.
    pub foreign_key_suffix_codelist: String,

    /// Suffix of foreign key columns of reflexive associations, appended to
    /// the property name.
    pub reflexive_suffix: String,

    /// Identifier column used when a class has no single identifier property.
    pub default_primary_key: String,

    /// Key column of code list tables.
    pub code_list_key_column: String,

    pub link_encoding: LinkEncoding,

    /// Value type of identifiers when links are encoded as feature references.
    pub id_value_type: ValueType,

    /// Represent code lists as tables of their own.
    pub code_lists_as_tables: bool,

    /// Give data types one table per usage context instead of one shared
    /// table. Overridden per class by the `dataTypeTables` tag.
    pub data_types_several_tables: bool,

    /// Ignore map entries for value types defined in the same schema as the
    /// property's owning class.
    pub suppress_schema_map_entries: bool,

    /// Schemas being processed. Classes outside these schemas have no tables.
    /// `None` processes every schema.
    pub schemas: Option<IndexSet<String>>,

    /// Explicit table names by class name.
    pub table_names: IndexMap<String, String>,

    /// Display attribute by class name.
    pub title_attributes: IndexMap<String, String>,
}

/// How references to other types are encoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkEncoding {
    /// A bare identifier of the referenced instance.
    #[default]
    FeatureRef,

    /// An embedded object carrying the referenced instance's identifier and
    /// title.
    LinkObject,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(src: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(src)
            .map_err(|err| Error::from(err).context(Error::invalid_config("cannot parse")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_name_length == 0 {
            return Err(Error::invalid_config("maxNameLength must be positive"));
        }

        for placeholder in ["{class}", "{property}"] {
            if !self.associative_table_template.contains(placeholder) {
                return Err(Error::invalid_config(format!(
                    "associativeTableTemplate `{}` lacks `{placeholder}`",
                    self.associative_table_template
                )));
            }
        }

        for entry in &self.map_entries {
            if entry.source_type.trim().is_empty() {
                return Err(Error::invalid_config("map entry without a type"));
            }
        }

        for (class, table) in &self.table_names {
            if let Some(c) = tags::reserved_char(table) {
                return Err(Error::invalid_config(format!(
                    "table name `{table}` for `{class}` contains reserved `{c}`"
                )));
            }
        }

        Ok(())
    }

    /// Finds the map entry for `type_name` under `rule`.
    ///
    /// An entry naming the rule wins over an entry that applies to every
    /// rule.
    pub fn map_entry(&self, type_name: &str, rule: Option<&str>) -> Option<&MapEntry> {
        let mut fallback = None;

        for entry in self.map_entries.iter().filter(|e| e.source_type == type_name) {
            match (&entry.rule, rule) {
                (Some(entry_rule), Some(rule)) if entry_rule == rule => return Some(entry),
                (None, _) if fallback.is_none() => fallback = Some(entry),
                _ => {}
            }
        }

        fallback
    }

    /// Finds the map entry covering the value type of `property`, owned by
    /// `owner`.
    ///
    /// With `suppress_schema_map_entries` set, entries for a value class of
    /// the owner's own schema are ignored; those types are generated from the
    /// model.
    pub fn property_map_entry(
        &self,
        owner: &Class,
        value: Option<&Class>,
        property: &Property,
    ) -> Option<&MapEntry> {
        if self.suppress_schema_map_entries
            && value.is_some_and(|value| value.schema == owner.schema)
        {
            return None;
        }

        self.map_entry(&property.value_type.name, property.encoding_rule.as_deref())
    }

    pub fn is_schema_in_scope(&self, schema: &str) -> bool {
        self.schemas
            .as_ref()
            .map_or(true, |schemas| schemas.contains(schema))
    }

    /// True if the data type `class` gets one table per usage context.
    pub fn uses_several_tables(&self, class: &Class) -> bool {
        if !class.is_data_type() {
            return false;
        }

        match class.tags.get(tags::DATA_TYPE_TABLES) {
            Some(value) if value.eq_ignore_ascii_case("several") => true,
            Some(value) if value.eq_ignore_ascii_case("shared") => false,
            _ => self.data_types_several_tables,
        }
    }

    /// Explicit table name of `class`, from its tag or the configuration.
    pub fn table_name_override<'a>(&'a self, class: &'a Class) -> Option<&'a str> {
        class
            .tags
            .get(tags::TABLE_NAME)
            .or_else(|| self.table_names.get(&class.name).map(String::as_str))
    }

    pub fn title_attribute<'a>(&'a self, class: &'a Class) -> Option<&'a str> {
        class
            .tags
            .get(tags::TITLE_ATTRIBUTE)
            .or_else(|| self.title_attributes.get(&class.name).map(String::as_str))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map_entries: vec![],
            max_name_length: 63,
            associative_table_template: "{class}_{property}".to_string(),
            foreign_key_suffix: "_id".to_string(),
            foreign_key_suffix_datatype: "_id".to_string(),
            foreign_key_suffix_codelist: "_id".to_string(),
            reflexive_suffix: "_reflexive".to_string(),
            default_primary_key: "id".to_string(),
            code_list_key_column: "name".to_string(),
            link_encoding: LinkEncoding::default(),
            id_value_type: ValueType::Integer,
            code_lists_as_tables: false,
            data_types_several_tables: false,
            suppress_schema_map_entries: true,
            schemas: None,
            table_names: IndexMap::new(),
            title_attributes: IndexMap::new(),
        }
    }
}
