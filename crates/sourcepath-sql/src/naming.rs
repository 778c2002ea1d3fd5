use sourcepath_core::{
    config::TargetKind,
    schema::{tags, Class, Property},
    Config, DiagnosticKind, Diagnostics, Model, VisitedChain,
};
use std_util::str;

/// Derives table and column names from the model and configuration.
///
/// Every name is a pure function of its inputs, so two properties that are
/// reverse ends of one association derive the same associative table name
/// independently.
#[derive(Debug, Copy, Clone)]
pub struct Naming<'a> {
    model: &'a Model,
    config: &'a Config,
}

/// What a foreign key column references.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ForeignKey {
    /// A type with identity.
    Identity,
    DataType,
    CodeList,
    /// The property's own class.
    Reflexive,
}

impl<'a> Naming<'a> {
    pub fn new(model: &'a Model, config: &'a Config) -> Self {
        Self { model, config }
    }

    /// Case-folds `name` and truncates it to the maximum identifier length.
    pub fn normalize(&self, name: &str) -> String {
        str::truncate(&name.to_lowercase(), self.config.max_name_length).to_string()
    }

    pub fn table_name(&self, class: &Class) -> String {
        match self.config.table_name_override(class) {
            Some(name) => name.to_string(),
            None => self.normalize(&class.name),
        }
    }

    /// Column holding a scalar property value.
    pub fn column_name(&self, property: &Property) -> String {
        self.normalize(&property.name)
    }

    /// Column on the owning table holding a reference made by `property`.
    pub fn foreign_key_column(&self, property: &Property, target: ForeignKey) -> String {
        let suffix = match target {
            ForeignKey::Identity => &self.config.foreign_key_suffix,
            ForeignKey::DataType => &self.config.foreign_key_suffix_datatype,
            ForeignKey::CodeList => &self.config.foreign_key_suffix_codelist,
            ForeignKey::Reflexive => &self.config.reflexive_suffix,
        };

        self.normalize(&format!("{}{suffix}", property.name))
    }

    /// Column in an associative or dependent table referencing `table`.
    pub fn foreign_key_to(&self, table: &str, target: ForeignKey) -> String {
        let suffix = match target {
            ForeignKey::DataType => &self.config.foreign_key_suffix_datatype,
            ForeignKey::CodeList => &self.config.foreign_key_suffix_codelist,
            ForeignKey::Identity | ForeignKey::Reflexive => &self.config.foreign_key_suffix,
        };

        self.normalize(&format!("{table}{suffix}"))
    }

    /// Identifier column of `class`.
    ///
    /// Falls back to the configured default when the class has no identifier
    /// property, or more than one, warning about the latter.
    pub fn primary_key_column(&self, class: &Class, diagnostics: &mut Diagnostics) -> String {
        match &self.model.identifier_properties(class.id)[..] {
            [identifier] => self.column_name(identifier),
            [] => self.config.default_primary_key.clone(),
            candidates => {
                let names: Vec<_> = candidates.iter().map(|p| p.name.as_str()).collect();
                diagnostics.warning(
                    DiagnosticKind::MultipleIdentifiers,
                    class.name.clone(),
                    format!(
                        "several identifier properties ({}); using `{}`",
                        names.join(", "),
                        self.config.default_primary_key
                    ),
                );
                self.config.default_primary_key.clone()
            }
        }
    }

    /// Name of the table holding the values of `property`, owned by a
    /// relationship table rather than either class.
    ///
    /// An explicit tag on the property or its association wins. Properties of
    /// data types stored in one table per usage derive the name from the path
    /// they were reached by. Otherwise both ends of a bidirectional association
    /// derive a candidate and the lexicographically smaller one is used.
    pub fn associative_table_name(&self, property: &Property, visited: &VisitedChain) -> String {
        if let Some(name) = self.associative_table_tag(property) {
            return name.to_string();
        }

        let owner = self.model.owner(property);

        if self.config.uses_several_tables(owner) {
            return self.fragment_table_name(property, visited);
        }

        let candidate = self.association_candidate(property);

        let name = match self.model.reverse_of(property) {
            Some(reverse)
                if property.is_bidirectional(Some(reverse))
                    && !self.is_link_mapped(property)
                    && !self.is_link_mapped(reverse) =>
            {
                candidate.min(self.association_candidate(reverse))
            }
            _ => candidate,
        };

        self.normalize(&name)
    }

    /// Case-folded `<class>_<property>` candidate, before truncation.
    pub fn association_candidate(&self, property: &Property) -> String {
        let owner = self.model.owner(property);
        str::fill_template(
            &self.config.associative_table_template,
            &[("class", &owner.name), ("property", &property.name)],
        )
        .to_lowercase()
    }

    /// Name of the table holding one usage of a data type stored in several
    /// tables.
    ///
    /// Walks back from `property` through the visited properties, collecting
    /// names while the owner is such a data type, and prefixes the result
    /// with the first other owner's class name.
    pub fn fragment_table_name(&self, property: &Property, visited: &VisitedChain) -> String {
        let chain = std::iter::once(property)
            .chain(visited.iter_rev().map(|id| self.model.property(id)));

        let mut parts = vec![];
        let mut prefix = None;

        for p in chain {
            let owner = self.model.owner(p);
            parts.push(p.name.as_str());
            prefix = Some(owner.name.as_str());

            if !self.config.uses_several_tables(owner) {
                break;
            }
        }

        parts.extend(prefix);
        parts.reverse();

        self.normalize(&parts.join("_"))
    }

    fn associative_table_tag<'p>(&self, property: &'p Property) -> Option<&'p str>
    where
        'a: 'p,
    {
        property.tags.get(tags::ASSOCIATIVE_TABLE).or_else(|| {
            self.model
                .association_tags(property)
                .and_then(|association| association.get(tags::ASSOCIATIVE_TABLE))
        })
    }

    /// True if `property` resolves through a link map entry. Applies the
    /// same suppression as the resolver, so both ends of an association
    /// agree on it.
    fn is_link_mapped(&self, property: &Property) -> bool {
        let owner = self.model.owner(property);
        let value = self.model.value_class(property);

        self.config
            .property_map_entry(owner, value, property)
            .and_then(|entry| entry.target_kind())
            == Some(TargetKind::Link)
    }
}
