mod builder;
pub use builder::{AssociationDef, Builder, ClassDef, PropertyDef};

mod cardinality;
pub use cardinality::Cardinality;

mod class;
pub use class::{Category, Class, ClassId};

mod property;
pub use property::{Property, PropertyId, ValueTypeRef};

pub mod tags;
pub use tags::Tags;

use indexmap::IndexMap;

/// A read-only conceptual model: classes with their properties, associations
/// linking reverse property ends, and supertype edges.
///
/// Built once with [`Model::builder`] and shared by reference for the whole
/// resolution run.
#[derive(Debug)]
pub struct Model {
    classes: Vec<Class>,

    /// Class lookup by name. Class names are unique across the model.
    by_name: IndexMap<String, ClassId>,

    associations: Vec<Association>,
}

/// An association between two property ends.
#[derive(Debug, Clone)]
pub struct Association {
    pub id: AssociationId,

    pub name: Option<String>,

    /// The two ends, in declaration order.
    pub ends: [PropertyId; 2],

    pub tags: Tags,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssociationId(pub usize);

impl Model {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn classes(&self) -> impl ExactSizeIterator<Item = &Class> + '_ {
        self.classes.iter()
    }

    pub fn class(&self, id: impl Into<ClassId>) -> &Class {
        &self.classes[id.into().0]
    }

    pub fn class_by_name(&self, name: &str) -> Option<&Class> {
        self.by_name.get(name).map(|id| self.class(*id))
    }

    /// Properties declared on `class`, excluding inherited ones.
    pub fn properties_of(&self, class: impl Into<ClassId>) -> &[Property] {
        &self.class(class).properties
    }

    pub fn property(&self, id: PropertyId) -> &Property {
        &self.class(id.class).properties[id.index]
    }

    pub fn association(&self, id: AssociationId) -> &Association {
        &self.associations[id.0]
    }

    /// Returns the class a property's value type resolves to, if it is
    /// modeled.
    pub fn value_class(&self, property: &Property) -> Option<&Class> {
        property.value_type.class.map(|id| self.class(id))
    }

    /// Returns the class owning `property`.
    pub fn owner(&self, property: &Property) -> &Class {
        self.class(property.id.class)
    }

    /// Returns the other end of the association `property` belongs to.
    pub fn reverse_of(&self, property: &Property) -> Option<&Property> {
        property.reverse.map(|id| self.property(id))
    }

    /// Returns every property flagged as identifier on `class` or any of its
    /// supertypes, nearest class first.
    pub fn identifier_properties(&self, class: ClassId) -> Vec<&Property> {
        let mut found = vec![];
        let mut pending = vec![class];
        let mut seen = vec![];

        while let Some(id) = pending.pop() {
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);

            let class = self.class(id);
            found.extend(class.properties.iter().filter(|p| p.is_identifier));
            pending.extend(class.supertypes.iter().rev());
        }

        found
    }

    /// Returns a fully qualified name for the property.
    pub fn full_name(&self, property: &Property) -> String {
        format!("{}::{}", self.owner(property).name, property.name)
    }

    /// Returns the tags of the association `property` belongs to.
    pub fn association_tags(&self, property: &Property) -> Option<&Tags> {
        property.association.map(|id| &self.association(id).tags)
    }
}
