mod context;
pub use context::EncodingContext;

mod path_info;
pub use path_info::{SourcePathInfo, PLACEHOLDER_PATH};

mod visited;
pub use visited::VisitedChain;

use crate::{
    schema::{ClassId, Model, PropertyId},
    Diagnostics,
};
use std::sync::Arc;

/// Computes source paths for a target technology.
///
/// A generator asks for an initial context per type definition, resolves
/// each property against it, and asks for a child context when descending
/// into a structured value type. Implementations are pure: results depend
/// only on the arguments and the provider's read-only configuration.
pub trait SourcePathProvider {
    /// The model the provider resolves against.
    fn model(&self) -> &Model;

    fn create_initial_context(&self, class: ClassId, is_type_definition: bool) -> EncodingContext;

    fn create_child_context(
        &self,
        parent: Arc<EncodingContext>,
        value_class: ClassId,
        path_info: Option<&SourcePathInfo>,
    ) -> EncodingContext;

    /// Resolves one property. An empty result means the property was skipped;
    /// the reason is recorded in `diagnostics`.
    fn resolve_property(
        &self,
        property: PropertyId,
        visited: &VisitedChain,
        context: &EncodingContext,
        diagnostics: &mut Diagnostics,
    ) -> Vec<SourcePathInfo>;

    /// Resolves every navigable property of the context's owning type, in
    /// declaration order.
    fn resolve_class(
        &self,
        context: &EncodingContext,
        visited: &VisitedChain,
        diagnostics: &mut Diagnostics,
    ) -> Vec<(PropertyId, Vec<SourcePathInfo>)> {
        self.model()
            .class(context.owning_type)
            .navigable_properties()
            .map(|property| {
                let paths = self.resolve_property(property.id, visited, context, diagnostics);
                (property.id, paths)
            })
            .collect()
    }
}
