use super::{AssociationId, Cardinality, ClassId, Tags};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Property {
    /// Uniquely identifies the property within the model.
    pub id: PropertyId,

    pub name: String,

    pub value_type: ValueTypeRef,

    pub cardinality: Cardinality,

    /// True for attributes, false for association roles.
    pub is_attribute: bool,

    /// False for the non-navigable end of a unidirectional association.
    pub is_navigable: bool,

    /// True if the property identifies instances of its class.
    pub is_identifier: bool,

    /// The other end of the association, when both ends are modeled.
    pub reverse: Option<PropertyId>,

    pub association: Option<AssociationId>,

    /// Encoding rule applied when this property is mapped to a target
    /// platform.
    pub encoding_rule: Option<String>,

    pub tags: Tags,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId {
    pub class: ClassId,
    pub index: usize,
}

/// Reference to the value type of a property.
///
/// `class` is populated when the type name resolves to a class of the model.
/// Types outside the model (for example `CharacterString`) only carry a name
/// and are expected to be covered by a map entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTypeRef {
    pub name: String,
    pub class: Option<ClassId>,
}

impl Property {
    /// True if `reverse` is this property's other end and can itself be
    /// traversed.
    pub fn is_bidirectional(&self, reverse: Option<&Property>) -> bool {
        matches!(reverse, Some(reverse) if reverse.is_navigable)
    }

    /// True if the property's value type is its own owning class.
    pub fn is_reflexive(&self) -> bool {
        self.value_type.class == Some(self.id.class)
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "PropertyId({}/{})", self.class.0, self.index)
    }
}
