use crate::{overlay::EncodingInfo, ValueType};

/// Sentinel path emitted for properties that cannot be resolved.
pub const PLACEHOLDER_PATH: &str = "FIXME";

/// One resolved source path of a property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePathInfo {
    /// Path in the source path grammar. `None` when no property-level
    /// segment is needed beyond the type-level path.
    pub source_path: Option<String>,

    /// Primitive kind of the value, when the path ends at an identifier or a
    /// scalar column.
    pub value_type: Option<ValueType>,

    /// Name of the referenced type when the path denotes a reference.
    pub ref_type: Option<String>,

    pub ref_uri_template: Option<String>,

    /// Table the path ends at, for callers that keep resolving below it.
    pub target_table: Option<String>,

    pub targets_single_value: bool,
}

impl SourcePathInfo {
    pub fn new(source_path: impl Into<String>, targets_single_value: bool) -> SourcePathInfo {
        SourcePathInfo {
            source_path: Some(source_path.into()),
            targets_single_value,
            ..SourcePathInfo::default()
        }
    }

    /// A result with no property-level path segment.
    pub fn empty(targets_single_value: bool) -> SourcePathInfo {
        SourcePathInfo {
            targets_single_value,
            ..SourcePathInfo::default()
        }
    }

    pub fn placeholder(targets_single_value: bool) -> SourcePathInfo {
        SourcePathInfo::new(PLACEHOLDER_PATH, targets_single_value)
    }

    /// Builds a result verbatim from an overlay entry.
    pub fn from_encoding_info(info: &EncodingInfo, targets_single_value: bool) -> SourcePathInfo {
        SourcePathInfo {
            source_path: info.source_path.clone(),
            value_type: info.value_type,
            ref_type: info.ref_type.clone(),
            ref_uri_template: info.ref_uri_template.clone(),
            target_table: info.target_table.clone(),
            targets_single_value,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.source_path.as_deref() == Some(PLACEHOLDER_PATH)
    }

    pub fn value_type(mut self, value_type: impl Into<Option<ValueType>>) -> SourcePathInfo {
        self.value_type = value_type.into();
        self
    }

    pub fn ref_type(mut self, ref_type: impl Into<String>) -> SourcePathInfo {
        self.ref_type = Some(ref_type.into());
        self
    }

    pub fn ref_uri_template(mut self, template: Option<&str>) -> SourcePathInfo {
        self.ref_uri_template = template.map(str::to_string);
        self
    }

    pub fn target_table(mut self, table: impl Into<String>) -> SourcePathInfo {
        self.target_table = Some(table.into());
        self
    }
}
