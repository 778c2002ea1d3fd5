use crate::{
    naming::{ForeignKey, Naming},
    path::{Segment, SourcePath},
};
use sourcepath_core::{
    config::{characteristic, LinkEncoding, MapEntry, TargetKind},
    schema::{Category, Class, ClassId, Property},
    Config, DiagnosticKind, Diagnostics, EncodingContext, Model, SourcePathInfo, ValueType,
    VisitedChain,
};
use std::cmp::Ordering;

/// Derives relational source paths for properties.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Resolver<'a> {
    model: &'a Model,
    config: &'a Config,
    naming: Naming<'a>,
}

/// Branch of the decision table a property falls into.
#[derive(Debug)]
enum Case<'a> {
    /// A map entry covers the value type.
    Mapped {
        entry: &'a MapEntry,
        kind: TargetKind,
    },

    /// A map entry covers the value type but names no target.
    MappedWithoutTarget,

    /// Enumeration or code list.
    Coded { value: &'a Class, as_table: bool },

    /// Structured value without identity.
    DataType {
        value: &'a Class,
        several_tables: bool,
    },

    /// Feature or object type.
    Identity {
        value: &'a Class,
        relation: Relation<'a>,
    },

    /// Neither mapped nor modeled.
    Unresolved,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Arity {
    Single,
    Many,
}

#[derive(Debug, Copy, Clone)]
enum Relation<'a> {
    /// No navigable reverse end.
    Unidirectional,

    Bidirectional {
        reverse: &'a Property,
        reverse_arity: Arity,

        /// For 1:1 associations, true if this end holds the foreign key.
        owns_foreign_key: bool,
    },
}

/// Per-property inputs shared by the case handlers.
struct Scope<'a, 'r> {
    property: &'a Property,
    visited: &'r VisitedChain,

    /// Table holding instances of the owning type.
    table: String,

    /// Class whose identifier keys `table`.
    table_class: ClassId,

    arity: Arity,

    /// `Class::property`, for diagnostics.
    subject: String,
}

impl Arity {
    fn of(property: &Property) -> Arity {
        if property.cardinality.is_single() {
            Arity::Single
        } else {
            Arity::Many
        }
    }
}

impl Scope<'_, '_> {
    fn single(&self) -> bool {
        self.arity == Arity::Single
    }
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(model: &'a Model, config: &'a Config) -> Self {
        Self {
            model,
            config,
            naming: Naming::new(model, config),
        }
    }

    pub(crate) fn resolve(
        &self,
        property: &'a Property,
        visited: &VisitedChain,
        context: &EncodingContext,
        diagnostics: &mut Diagnostics,
    ) -> Option<SourcePathInfo> {
        let scope = self.scope(property, visited, context);
        let case = self.classify(property);

        tracing::debug!(property = %scope.subject, ?case, "resolving source path");

        match case {
            Case::Mapped { entry, kind } => self.mapped(&scope, entry, kind, diagnostics),
            Case::MappedWithoutTarget => {
                diagnostics.error(
                    DiagnosticKind::MissingTargetKind,
                    scope.subject.clone(),
                    format!(
                        "map entry for `{}` has no target type",
                        property.value_type.name
                    ),
                );
                Some(SourcePathInfo::placeholder(scope.single()))
            }
            Case::Coded { value, as_table } => self.coded(&scope, value, as_table, diagnostics),
            Case::DataType {
                value,
                several_tables,
            } => self.data_type(&scope, value, several_tables, diagnostics),
            Case::Identity { value, relation } => {
                self.identity(&scope, value, relation, diagnostics)
            }
            Case::Unresolved => {
                diagnostics.error(
                    DiagnosticKind::UnmappedValueType,
                    scope.subject.clone(),
                    format!(
                        "value type `{}` has no map entry and is not part of the model",
                        property.value_type.name
                    ),
                );
                Some(SourcePathInfo::placeholder(scope.single()))
            }
        }
    }

    fn scope<'r>(
        &self,
        property: &'a Property,
        visited: &'r VisitedChain,
        context: &EncodingContext,
    ) -> Scope<'a, 'r> {
        // Mixin contexts have no table; their properties land in the nearest
        // enclosing table.
        let (table, table_class) = std::iter::once(context)
            .chain(context.ancestors())
            .find_map(|cx| cx.source_table.clone().map(|table| (table, cx.owning_type)))
            .unwrap_or_else(|| {
                let owner = self.model.owner(property);
                (self.naming.table_name(owner), owner.id)
            });

        Scope {
            property,
            visited,
            table,
            table_class,
            arity: Arity::of(property),
            subject: self.model.full_name(property),
        }
    }

    fn classify(&self, property: &'a Property) -> Case<'a> {
        let owner = self.model.owner(property);
        let value = self.model.value_class(property);

        if let Some(entry) = self.config.property_map_entry(owner, value, property) {
            return match entry.target_kind() {
                Some(kind) => Case::Mapped { entry, kind },
                None => Case::MappedWithoutTarget,
            };
        }

        let Some(value) = value else {
            return Case::Unresolved;
        };

        match value.category {
            Category::Enumeration | Category::CodeList => Case::Coded {
                value,
                as_table: value.category == Category::CodeList && self.config.code_lists_as_tables,
            },
            Category::DataType | Category::Union | Category::Mixin => Case::DataType {
                value,
                several_tables: self.config.uses_several_tables(value),
            },
            Category::Feature | Category::Object => Case::Identity {
                value,
                relation: self.relation(property),
            },
        }
    }

    fn relation(&self, property: &'a Property) -> Relation<'a> {
        match self.model.reverse_of(property) {
            Some(reverse) if property.is_bidirectional(Some(reverse)) => Relation::Bidirectional {
                reverse,
                reverse_arity: Arity::of(reverse),
                owns_foreign_key: self.owns_foreign_key(property, reverse),
            },
            _ => Relation::Unidirectional,
        }
    }

    /// Of two single-valued ends, the one with the smaller association name
    /// candidate holds the foreign key.
    fn owns_foreign_key(&self, property: &Property, reverse: &Property) -> bool {
        let mine = self.naming.association_candidate(property);
        let theirs = self.naming.association_candidate(reverse);

        match mine.cmp(&theirs) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => property
                .association
                .is_some_and(|id| self.model.association(id).ends[0] == property.id),
        }
    }

    fn mapped(
        &self,
        scope: &Scope<'_, '_>,
        entry: &MapEntry,
        kind: TargetKind,
        diagnostics: &mut Diagnostics,
    ) -> Option<SourcePathInfo> {
        let property = scope.property;

        match kind {
            // Geometries are always single-valued columns
            TargetKind::Geometry => Some(
                SourcePathInfo::new(self.naming.column_name(property), true)
                    .value_type(ValueType::Geometry),
            ),
            TargetKind::Scalar(value_type) => {
                let column = self.naming.column_name(property);

                let info = match scope.arity {
                    Arity::Single => SourcePathInfo::new(column, true),
                    Arity::Many => {
                        let path = self
                            .associative(scope, diagnostics)
                            .then(Segment::column(column));
                        SourcePathInfo::new(path, false)
                    }
                };

                Some(info.value_type(value_type))
            }
            TargetKind::Link => self.link(scope, entry, diagnostics),
        }
    }

    fn link(
        &self,
        scope: &Scope<'_, '_>,
        entry: &MapEntry,
        diagnostics: &mut Diagnostics,
    ) -> Option<SourcePathInfo> {
        let property = scope.property;

        let ref_table = match entry.characteristic(characteristic::TABLE) {
            Some(table) => table.to_string(),
            None => self.naming.normalize(&property.value_type.name),
        };

        let id_type = entry
            .characteristic(characteristic::ID_VALUE_TYPE)
            .and_then(ValueType::from_name)
            .unwrap_or(self.config.id_value_type);

        let info = match (self.config.link_encoding, scope.arity) {
            (LinkEncoding::FeatureRef, Arity::Single) => SourcePathInfo::new(
                self.naming
                    .foreign_key_column(property, ForeignKey::Identity),
                true,
            )
            .value_type(id_type),
            (LinkEncoding::FeatureRef, Arity::Many) => {
                let column = self.naming.foreign_key_to(&ref_table, ForeignKey::Identity);
                let path = self
                    .associative(scope, diagnostics)
                    .then(Segment::column(column));
                SourcePathInfo::new(path, false).value_type(id_type)
            }
            // The linked object is inlined at type level
            (LinkEncoding::LinkObject, Arity::Single) => SourcePathInfo::empty(true),
            (LinkEncoding::LinkObject, Arity::Many) => {
                let ref_key = self.link_key(scope, entry, &ref_table, diagnostics)?;
                let column = self.naming.foreign_key_to(&ref_table, ForeignKey::Identity);
                let path = self
                    .associative(scope, diagnostics)
                    .then(Segment::join(column, ref_key, &ref_table));
                SourcePathInfo::new(path, false).target_table(ref_table)
            }
        };

        Some(
            info.ref_type(&property.value_type.name)
                .ref_uri_template(entry.characteristic(characteristic::URL_TEMPLATE)),
        )
    }

    /// Identifier column of the table a link refers to.
    fn link_key(
        &self,
        scope: &Scope<'_, '_>,
        entry: &MapEntry,
        ref_table: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        if let Some(column) = entry.characteristic(characteristic::ID_COLUMN) {
            return Some(column.to_string());
        }

        let class = self
            .model
            .class_by_name(&scope.property.value_type.name)
            .or_else(|| {
                self.model
                    .classes()
                    .find(|class| self.naming.table_name(class) == ref_table)
            });

        match class {
            Some(class) => {
                self.ensure_in_scope(scope, class, diagnostics)?;
                Some(self.naming.primary_key_column(class, diagnostics))
            }
            None => Some(self.config.default_primary_key.clone()),
        }
    }

    fn coded(
        &self,
        scope: &Scope<'_, '_>,
        value: &Class,
        as_table: bool,
        diagnostics: &mut Diagnostics,
    ) -> Option<SourcePathInfo> {
        let property = scope.property;

        if !as_table {
            let column = self.naming.column_name(property);

            let info = match scope.arity {
                Arity::Single => SourcePathInfo::new(column, true),
                Arity::Many => {
                    let path = self
                        .associative(scope, diagnostics)
                        .then(Segment::column(column));
                    SourcePathInfo::new(path, false)
                }
            };

            return Some(info.value_type(ValueType::String));
        }

        self.ensure_in_scope(scope, value, diagnostics)?;

        let info = match scope.arity {
            Arity::Single => SourcePathInfo::new(
                self.naming
                    .foreign_key_column(property, ForeignKey::CodeList),
                true,
            ),
            Arity::Many => {
                let table = self.naming.table_name(value);
                let key = &self.config.code_list_key_column;
                let column = self.naming.foreign_key_to(&table, ForeignKey::CodeList);
                let path = self
                    .associative(scope, diagnostics)
                    .then(Segment::join(column, key, &table))
                    .then(Segment::column(key));
                SourcePathInfo::new(path, false).target_table(table)
            }
        };

        Some(info.value_type(ValueType::String).ref_type(&value.name))
    }

    fn data_type(
        &self,
        scope: &Scope<'_, '_>,
        value: &Class,
        several_tables: bool,
        diagnostics: &mut Diagnostics,
    ) -> Option<SourcePathInfo> {
        let property = scope.property;

        self.ensure_in_scope(scope, value, diagnostics)?;

        if several_tables {
            // The usage-specific table refers back to its owner
            let table = self
                .naming
                .fragment_table_name(property, scope.visited);
            let column = self
                .naming
                .foreign_key_to(&scope.table, ForeignKey::Identity);
            let mut join = Segment::join(self.owner_key(scope, diagnostics), column, &table);

            if scope.arity == Arity::Many {
                join = join.sort_key(&scope.table);
            }

            let path = SourcePath::new().then(join);
            return Some(SourcePathInfo::new(path, scope.single()).target_table(table));
        }

        let table = self.naming.table_name(value);
        let key = self.naming.primary_key_column(value, diagnostics);

        let path = match scope.arity {
            Arity::Single => {
                let column = self
                    .naming
                    .foreign_key_column(property, ForeignKey::DataType);
                SourcePath::new().then(Segment::join(column, key, &table))
            }
            Arity::Many => {
                let column = self.naming.foreign_key_to(&table, ForeignKey::DataType);
                self.associative(scope, diagnostics)
                    .then(Segment::join(column, key, &table))
            }
        };

        Some(SourcePathInfo::new(path, scope.single()).target_table(table))
    }

    fn identity(
        &self,
        scope: &Scope<'_, '_>,
        value: &Class,
        relation: Relation<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Option<SourcePathInfo> {
        self.ensure_in_scope(scope, value, diagnostics)?;

        let info = match (scope.arity, relation) {
            (
                Arity::Many,
                Relation::Bidirectional {
                    reverse,
                    reverse_arity: Arity::Many,
                    ..
                },
            ) => self.many_to_many(scope, value, Some(reverse), diagnostics),
            (Arity::Many, Relation::Unidirectional) => {
                self.many_to_many(scope, value, None, diagnostics)
            }
            (
                Arity::Many,
                Relation::Bidirectional {
                    reverse,
                    reverse_arity: Arity::Single,
                    ..
                },
            )
            | (
                Arity::Single,
                Relation::Bidirectional {
                    reverse,
                    reverse_arity: Arity::Single,
                    owns_foreign_key: false,
                },
            ) => self.foreign_key_on_target(scope, value, reverse, diagnostics),
            (Arity::Single, Relation::Bidirectional { .. })
            | (Arity::Single, Relation::Unidirectional) => {
                self.foreign_key_on_source(scope, value, diagnostics)
            }
        };

        Some(info.ref_type(&value.name))
    }

    /// The foreign key is a column of this property's table.
    fn foreign_key_on_source(
        &self,
        scope: &Scope<'_, '_>,
        value: &Class,
        diagnostics: &mut Diagnostics,
    ) -> SourcePathInfo {
        let column = self
            .naming
            .foreign_key_column(scope.property, self.foreign_key_kind(scope.property));

        match self.config.link_encoding {
            LinkEncoding::FeatureRef => {
                SourcePathInfo::new(column, scope.single()).value_type(self.config.id_value_type)
            }
            // Without a title to fetch, the identifier alone suffices
            LinkEncoding::LinkObject if self.config.title_attribute(value).is_none() => {
                SourcePathInfo::empty(scope.single()).value_type(self.config.id_value_type)
            }
            LinkEncoding::LinkObject => {
                let table = self.naming.table_name(value);
                let key = self.naming.primary_key_column(value, diagnostics);
                let path = SourcePath::new().then(Segment::join(column, key, &table));
                SourcePathInfo::new(path, scope.single()).target_table(table)
            }
        }
    }

    /// The foreign key is a column of the value's table, named after the
    /// reverse end.
    fn foreign_key_on_target(
        &self,
        scope: &Scope<'_, '_>,
        value: &Class,
        reverse: &Property,
        diagnostics: &mut Diagnostics,
    ) -> SourcePathInfo {
        let table = self.naming.table_name(value);
        let column = self
            .naming
            .foreign_key_column(reverse, self.foreign_key_kind(scope.property));
        let owner_key = self.owner_key(scope, diagnostics);
        let join = Segment::join(&owner_key, column, &table);

        match self.config.link_encoding {
            LinkEncoding::FeatureRef => {
                let key = self.value_key(scope, value, owner_key, diagnostics);
                let path = SourcePath::new().then(join).then(Segment::column(key));
                SourcePathInfo::new(path, scope.single()).value_type(self.config.id_value_type)
            }
            LinkEncoding::LinkObject => {
                let path = SourcePath::new().then(join);
                SourcePathInfo::new(path, scope.single()).target_table(table)
            }
        }
    }

    fn many_to_many(
        &self,
        scope: &Scope<'_, '_>,
        value: &Class,
        reverse: Option<&Property>,
        diagnostics: &mut Diagnostics,
    ) -> SourcePathInfo {
        let property = scope.property;
        let table = self.naming.table_name(value);

        // Both columns of a reflexive table reference the same table; each is
        // named after the property whose values it holds.
        let (owner_column, value_column) = match (property.is_reflexive(), reverse) {
            (true, Some(reverse)) => (
                self.naming.foreign_key_column(reverse, ForeignKey::Reflexive),
                self.naming
                    .foreign_key_column(property, ForeignKey::Reflexive),
            ),
            (true, None) => (
                self.naming
                    .foreign_key_to(&scope.table, ForeignKey::Identity),
                self.naming
                    .foreign_key_column(property, ForeignKey::Reflexive),
            ),
            (false, _) => (
                self.naming
                    .foreign_key_to(&scope.table, ForeignKey::Identity),
                self.naming.foreign_key_to(&table, ForeignKey::Identity),
            ),
        };

        let owner_key = self.owner_key(scope, diagnostics);
        let path = SourcePath::new().then(self.associative_join(scope, &owner_key, owner_column));

        match self.config.link_encoding {
            LinkEncoding::FeatureRef => {
                let path = path.then(Segment::column(value_column));
                SourcePathInfo::new(path, false).value_type(self.config.id_value_type)
            }
            LinkEncoding::LinkObject => {
                let key = self.value_key(scope, value, owner_key, diagnostics);
                let path = path.then(Segment::join(value_column, key, &table));
                SourcePathInfo::new(path, false).target_table(table)
            }
        }
    }

    /// Path into the associative table of a multi-valued property.
    fn associative(&self, scope: &Scope<'_, '_>, diagnostics: &mut Diagnostics) -> SourcePath {
        let owner_key = self.owner_key(scope, diagnostics);
        let owner_column = self
            .naming
            .foreign_key_to(&scope.table, ForeignKey::Identity);
        SourcePath::new().then(self.associative_join(scope, &owner_key, owner_column))
    }

    fn associative_join(&self, scope: &Scope<'_, '_>, owner_key: &str, owner_column: String) -> Segment {
        let table = self
            .naming
            .associative_table_name(scope.property, scope.visited);

        Segment::join(owner_key, owner_column, table).sort_key(&scope.table)
    }

    /// Identifier column of the owning table.
    fn owner_key(&self, scope: &Scope<'_, '_>, diagnostics: &mut Diagnostics) -> String {
        let class = self.model.class(scope.table_class);
        self.naming.primary_key_column(class, diagnostics)
    }

    /// Identifier column of `value`. Reflexive references key the owning
    /// table itself, so its key is reused rather than derived twice.
    fn value_key(
        &self,
        scope: &Scope<'_, '_>,
        value: &Class,
        owner_key: String,
        diagnostics: &mut Diagnostics,
    ) -> String {
        if scope.table_class == value.id {
            owner_key
        } else {
            self.naming.primary_key_column(value, diagnostics)
        }
    }

    fn foreign_key_kind(&self, property: &Property) -> ForeignKey {
        if property.is_reflexive() {
            ForeignKey::Reflexive
        } else {
            ForeignKey::Identity
        }
    }

    fn ensure_in_scope(
        &self,
        scope: &Scope<'_, '_>,
        value: &Class,
        diagnostics: &mut Diagnostics,
    ) -> Option<()> {
        if self.config.is_schema_in_scope(&value.schema) {
            return Some(());
        }

        diagnostics.error(
            DiagnosticKind::UnresolvableReference,
            scope.subject.clone(),
            format!(
                "`{}` has no table; schema `{}` is not processed",
                value.name, value.schema
            ),
        );
        None
    }
}
