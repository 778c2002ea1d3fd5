use crate::schema::ClassId;
use std::sync::Arc;

/// Where in the table graph resolution currently is.
///
/// Contexts form an immutable chain from the innermost nested type back to
/// the type definition being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingContext {
    pub owning_type: ClassId,

    /// Table the owning type's properties are read from. Absent for mixins,
    /// which have no table of their own.
    pub source_table: Option<String>,

    /// True while resolving properties merged into a containing type.
    pub in_fragment: bool,

    pub parent: Option<Arc<EncodingContext>>,
}

impl EncodingContext {
    pub fn root(owning_type: ClassId, source_table: Option<String>, in_fragment: bool) -> Self {
        Self {
            owning_type,
            source_table,
            in_fragment,
            parent: None,
        }
    }

    /// Enclosing contexts, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &EncodingContext> + '_ {
        let mut next = self.parent.as_deref();
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent.as_deref();
            Some(current)
        })
    }

    /// Number of enclosing contexts.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    pub fn source_table(&self) -> Option<&str> {
        self.source_table.as_deref()
    }
}
