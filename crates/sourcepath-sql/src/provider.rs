use crate::{naming::Naming, resolve::Resolver};
use sourcepath_core::{
    overlay::EncodingInfos,
    schema::{ClassId, PropertyId},
    Config, Diagnostics, EncodingContext, Model, SourcePathInfo, SourcePathProvider,
    VisitedChain,
};
use std::sync::Arc;

/// Source path provider for relational backing stores.
///
/// Holds read-only references to the model, the configuration and an
/// optional encoding-info overlay for one generation run. Resolving a
/// property does not touch any shared state, so one provider can serve
/// several threads.
#[derive(Debug, Clone, Copy)]
pub struct SqlSourcePathProvider<'a> {
    model: &'a Model,
    config: &'a Config,
    overlay: Option<&'a EncodingInfos>,
}

impl<'a> SqlSourcePathProvider<'a> {
    pub fn new(model: &'a Model, config: &'a Config) -> Self {
        Self {
            model,
            config,
            overlay: None,
        }
    }

    /// Uses `overlay` in preference to derived paths wherever it records the
    /// property.
    pub fn with_overlay(mut self, overlay: &'a EncodingInfos) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn naming(&self) -> Naming<'a> {
        Naming::new(self.model, self.config)
    }

    fn lookup_overlay(
        &self,
        property: PropertyId,
        context: &EncodingContext,
    ) -> Option<Vec<SourcePathInfo>> {
        let overlay = self.overlay?;
        let property = self.model.property(property);
        let owner = self.model.owner(property);

        let entries = overlay.lookup(
            &property.name,
            &owner.name,
            &owner.schema,
            context.source_table(),
        );

        if entries.is_empty() {
            return None;
        }

        tracing::debug!(
            property = %self.model.full_name(property),
            entries = entries.len(),
            "using recorded encoding info"
        );

        let single = property.cardinality.is_single();
        Some(
            entries
                .into_iter()
                .map(|entry| SourcePathInfo::from_encoding_info(entry, single))
                .collect(),
        )
    }
}

impl SourcePathProvider for SqlSourcePathProvider<'_> {
    fn model(&self) -> &Model {
        self.model
    }

    fn create_initial_context(&self, class: ClassId, is_type_definition: bool) -> EncodingContext {
        let class = self.model.class(class);

        let has_table =
            is_type_definition && !class.is_mixin() && !self.config.uses_several_tables(class);
        let source_table = has_table.then(|| self.naming().table_name(class));

        EncodingContext::root(class.id, source_table, !is_type_definition)
    }

    fn create_child_context(
        &self,
        parent: Arc<EncodingContext>,
        value_class: ClassId,
        path_info: Option<&SourcePathInfo>,
    ) -> EncodingContext {
        let class = self.model.class(value_class);

        let source_table = match path_info.and_then(|info| info.target_table.clone()) {
            Some(table) => Some(table),
            // Mixin properties are merged into the enclosing table
            None if class.is_mixin() => parent.source_table.clone(),
            None if self.config.uses_several_tables(class) => None,
            None => Some(self.naming().table_name(class)),
        };

        EncodingContext {
            owning_type: class.id,
            source_table,
            in_fragment: parent.in_fragment,
            parent: Some(parent),
        }
    }

    fn resolve_property(
        &self,
        property: PropertyId,
        visited: &VisitedChain,
        context: &EncodingContext,
        diagnostics: &mut Diagnostics,
    ) -> Vec<SourcePathInfo> {
        if let Some(recorded) = self.lookup_overlay(property, context) {
            return recorded;
        }

        Resolver::new(self.model, self.config)
            .resolve(self.model.property(property), visited, context, diagnostics)
            .into_iter()
            .collect()
    }
}
