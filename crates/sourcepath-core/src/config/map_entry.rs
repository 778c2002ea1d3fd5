use crate::ValueType;
use indexmap::IndexMap;
use serde::Deserialize;

/// Characteristic keys understood on map entries.
pub mod characteristic {
    /// Table referenced by a link.
    pub const TABLE: &str = "table";

    /// Identifier column of the table referenced by a link.
    pub const ID_COLUMN: &str = "idColumn";

    /// URI template of a link.
    pub const URL_TEMPLATE: &str = "urlTemplate";

    /// Value type of a link identifier: `integer` or `string`.
    pub const ID_VALUE_TYPE: &str = "idValueType";
}

/// Maps a conceptual type to a target type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapEntry {
    #[serde(rename = "type")]
    pub source_type: String,

    /// Encoding rule the entry applies to. `None` applies to every rule.
    #[serde(default)]
    pub rule: Option<String>,

    #[serde(default)]
    pub target_type: Option<String>,

    #[serde(default)]
    pub characteristics: IndexMap<String, String>,
}

/// What a mapped type becomes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TargetKind {
    Geometry,
    Link,
    Scalar(Option<ValueType>),
}

impl MapEntry {
    pub fn new(source_type: impl Into<String>, target_type: impl Into<String>) -> MapEntry {
        MapEntry {
            source_type: source_type.into(),
            rule: None,
            target_type: Some(target_type.into()),
            characteristics: IndexMap::new(),
        }
    }

    pub fn rule(mut self, rule: impl Into<String>) -> MapEntry {
        self.rule = Some(rule.into());
        self
    }

    pub fn with_characteristic(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> MapEntry {
        self.characteristics.insert(key.into(), value.into());
        self
    }

    pub fn characteristic(&self, key: &str) -> Option<&str> {
        self.characteristics
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Returns `None` when the entry has no target type.
    pub fn target_kind(&self) -> Option<TargetKind> {
        let target = self.target_type.as_deref()?.trim();

        let kind = if target.is_empty() {
            return None;
        } else if target.eq_ignore_ascii_case("geometry") {
            TargetKind::Geometry
        } else if target.eq_ignore_ascii_case("link") {
            TargetKind::Link
        } else {
            TargetKind::Scalar(ValueType::from_name(target))
        };

        Some(kind)
    }
}
