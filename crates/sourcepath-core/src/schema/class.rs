use super::{Property, PropertyId, Tags};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Class {
    /// Uniquely identifies the class within the model.
    pub id: ClassId,

    pub name: String,

    /// Name of the application schema (package) owning the class.
    pub schema: String,

    pub category: Category,

    /// Properties in declaration order.
    pub properties: Vec<Property>,

    pub supertypes: Vec<ClassId>,

    pub subtypes: Vec<ClassId>,

    pub tags: Tags,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub usize);

/// Stereotyped category of a class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Feature,
    Object,
    DataType,
    Enumeration,
    CodeList,
    Union,
    Mixin,
}

impl Class {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// Properties that can be traversed from an instance of this class.
    pub fn navigable_properties(&self) -> impl Iterator<Item = &Property> + '_ {
        self.properties.iter().filter(|property| property.is_navigable)
    }

    pub fn is_data_type(&self) -> bool {
        self.category == Category::DataType
    }

    pub fn is_mixin(&self) -> bool {
        self.category == Category::Mixin
    }
}

impl ClassId {
    /// Identifies the `index`-th property of this class.
    pub fn property(self, index: usize) -> PropertyId {
        PropertyId { class: self, index }
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ClassId({})", self.0)
    }
}

impl From<&Class> for ClassId {
    fn from(value: &Class) -> Self {
        value.id
    }
}

impl From<&ClassId> for ClassId {
    fn from(value: &ClassId) -> Self {
        *value
    }
}

impl Category {
    /// Instances of these categories carry an identity and live in their own
    /// table.
    pub fn has_identity(self) -> bool {
        matches!(self, Category::Feature | Category::Object)
    }

    /// Code lists and enumerations are both sets of coded values.
    pub fn is_coded(self) -> bool {
        matches!(self, Category::Enumeration | Category::CodeList)
    }
}
