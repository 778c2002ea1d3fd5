use super::{
    tags, Association, AssociationId, Cardinality, Category, Class, ClassId, Model, Property,
    PropertyId, Tags, ValueTypeRef,
};
use crate::{Error, Result};
use indexmap::IndexMap;

/// Collects class and association definitions by name and links them into a
/// [`Model`].
#[derive(Debug, Default)]
pub struct Builder {
    classes: Vec<ClassDef>,
    associations: Vec<AssociationDef>,
}

#[derive(Debug, Clone)]
pub struct ClassDef {
    name: String,
    schema: String,
    category: Category,
    supertypes: Vec<String>,
    properties: Vec<PropertyDef>,
    tags: Tags,
}

#[derive(Debug, Clone)]
pub struct PropertyDef {
    name: String,
    value_type: String,
    cardinality: Cardinality,
    is_attribute: bool,
    is_navigable: bool,
    is_identifier: bool,
    encoding_rule: Option<String>,
    tags: Tags,
}

/// Pairs two role properties, given as `(class, property)` names, as reverse
/// ends of one association.
#[derive(Debug, Clone)]
pub struct AssociationDef {
    name: Option<String>,
    ends: [(String, String); 2],
    tags: Tags,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&mut self, class: ClassDef) -> &mut Self {
        self.classes.push(class);
        self
    }

    pub fn association(&mut self, association: AssociationDef) -> &mut Self {
        self.associations.push(association);
        self
    }

    pub fn build(&self) -> Result<Model> {
        let mut by_name = IndexMap::new();

        for (index, def) in self.classes.iter().enumerate() {
            if by_name.insert(def.name.clone(), ClassId(index)).is_some() {
                return Err(Error::invalid_model(format!(
                    "class `{}` is defined twice",
                    def.name
                )));
            }
        }

        let mut classes = self
            .classes
            .iter()
            .enumerate()
            .map(|(index, def)| def.to_class(ClassId(index), &by_name))
            .collect::<Result<Vec<_>>>()?;

        // Subtype edges mirror the declared supertypes
        for index in 0..classes.len() {
            for supertype in classes[index].supertypes.clone() {
                classes[supertype.0].subtypes.push(ClassId(index));
            }
        }

        let mut associations = vec![];

        for (index, def) in self.associations.iter().enumerate() {
            let id = AssociationId(index);
            let [a, b] = [&def.ends[0], &def.ends[1]].map(|end| lookup(&classes, &by_name, end));
            let (a, b) = (a?, b?);

            if a == b {
                return Err(Error::invalid_model(format!(
                    "association end `{}::{}` cannot be its own reverse",
                    def.ends[0].0, def.ends[0].1
                )));
            }

            for (end, other) in [(a, b), (b, a)] {
                let class = &mut classes[end.class.0];

                if class.properties[end.index].reverse.is_some() {
                    return Err(Error::invalid_model(format!(
                        "property `{}::{}` already belongs to an association",
                        class.name, class.properties[end.index].name
                    )));
                }

                let property = &mut class.properties[end.index];
                property.reverse = Some(other);
                property.association = Some(id);
            }

            check_table_tag(&def.tags, tags::ASSOCIATIVE_TABLE, || {
                format!("association `{}::{}`", def.ends[0].0, def.ends[0].1)
            })?;

            associations.push(Association {
                id,
                name: def.name.clone(),
                ends: [a, b],
                tags: def.tags.clone(),
            });
        }

        Ok(Model {
            classes,
            by_name,
            associations,
        })
    }
}

/// Rejects a table name tag that would not survive the path grammar.
fn check_table_tag(values: &Tags, key: &str, element: impl FnOnce() -> String) -> Result<()> {
    let Some(name) = values.get(key) else {
        return Ok(());
    };

    match tags::reserved_char(name) {
        Some(c) => Err(Error::invalid_model(format!(
            "{} has `{key}` `{name}` containing reserved `{c}`",
            element()
        ))),
        None => Ok(()),
    }
}

fn lookup(
    classes: &[Class],
    by_name: &IndexMap<String, ClassId>,
    (class, property): &(String, String),
) -> Result<PropertyId> {
    let Some(class_id) = by_name.get(class) else {
        return Err(Error::invalid_model(format!(
            "association references unknown class `{class}`"
        )));
    };

    classes[class_id.0]
        .properties
        .iter()
        .position(|p| &p.name == property)
        .map(|index| class_id.property(index))
        .ok_or_else(|| {
            Error::invalid_model(format!(
                "association references unknown property `{class}::{property}`"
            ))
        })
}

impl ClassDef {
    pub fn new(name: impl Into<String>, schema: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            category,
            supertypes: vec![],
            properties: vec![],
            tags: Tags::new(),
        }
    }

    pub fn supertype(mut self, name: impl Into<String>) -> Self {
        self.supertypes.push(name.into());
        self
    }

    pub fn property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }

    fn to_class(&self, id: ClassId, by_name: &IndexMap<String, ClassId>) -> Result<Class> {
        let supertypes = self
            .supertypes
            .iter()
            .map(|name| {
                by_name.get(name).copied().ok_or_else(|| {
                    Error::invalid_model(format!(
                        "class `{}` has unknown supertype `{name}`",
                        self.name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        check_table_tag(&self.tags, tags::TABLE_NAME, || format!("class `{}`", self.name))?;

        let mut properties: Vec<Property> = vec![];

        for (index, def) in self.properties.iter().enumerate() {
            if properties.iter().any(|p| p.name == def.name) {
                return Err(Error::invalid_model(format!(
                    "property `{}::{}` is defined twice",
                    self.name, def.name
                )));
            }

            check_table_tag(&def.tags, tags::ASSOCIATIVE_TABLE, || {
                format!("property `{}::{}`", self.name, def.name)
            })?;

            properties.push(Property {
                id: id.property(index),
                name: def.name.clone(),
                value_type: ValueTypeRef {
                    name: def.value_type.clone(),
                    class: by_name.get(&def.value_type).copied(),
                },
                cardinality: def.cardinality,
                is_attribute: def.is_attribute,
                is_navigable: def.is_navigable,
                is_identifier: def.is_identifier,
                reverse: None,
                association: None,
                encoding_rule: def.encoding_rule.clone(),
                tags: def.tags.clone(),
            });
        }

        Ok(Class {
            id,
            name: self.name.clone(),
            schema: self.schema.clone(),
            category: self.category,
            properties,
            supertypes,
            subtypes: vec![],
            tags: self.tags.clone(),
        })
    }
}

impl PropertyDef {
    /// A single-valued, navigable attribute.
    pub fn new(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            cardinality: Cardinality::ONE,
            is_attribute: true,
            is_navigable: true,
            is_identifier: false,
            encoding_rule: None,
            tags: Tags::new(),
        }
    }

    /// A single-valued association role.
    pub fn role(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            is_attribute: false,
            ..Self::new(name, value_type)
        }
    }

    pub fn cardinality(mut self, min: u32, max: Option<u32>) -> Self {
        self.cardinality = Cardinality::new(min, max);
        self
    }

    /// Shorthand for `0..*`.
    pub fn many(mut self) -> Self {
        self.cardinality = Cardinality::MANY;
        self
    }

    pub fn navigable(mut self, navigable: bool) -> Self {
        self.is_navigable = navigable;
        self
    }

    pub fn identifier(mut self) -> Self {
        self.is_identifier = true;
        self
    }

    pub fn encoding_rule(mut self, rule: impl Into<String>) -> Self {
        self.encoding_rule = Some(rule.into());
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }
}

impl AssociationDef {
    pub fn new(
        (class_a, property_a): (&str, &str),
        (class_b, property_b): (&str, &str),
    ) -> Self {
        Self {
            name: None,
            ends: [
                (class_a.to_string(), property_a.to_string()),
                (class_b.to_string(), property_b.to_string()),
            ],
            tags: Tags::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }
}
