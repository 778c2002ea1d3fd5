use crate::schema::PropertyId;
use std::sync::Arc;

/// Properties consumed while descending through nested data types.
///
/// A persistent list: [`push`](VisitedChain::push) returns a new chain
/// sharing its tail with the old one, so chains can be handed to recursive
/// or concurrent callers without copying.
#[derive(Debug, Clone, Default)]
pub struct VisitedChain {
    head: Option<Arc<Node>>,
    len: usize,
}

#[derive(Debug)]
struct Node {
    property: PropertyId,
    prev: Option<Arc<Node>>,
}

impl VisitedChain {
    pub fn new() -> VisitedChain {
        VisitedChain::default()
    }

    /// Returns a chain extended by `property`.
    #[must_use]
    pub fn push(&self, property: PropertyId) -> VisitedChain {
        VisitedChain {
            head: Some(Arc::new(Node {
                property,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last(&self) -> Option<PropertyId> {
        self.head.as_ref().map(|node| node.property)
    }

    /// Walks the chain from the most recently visited property.
    pub fn iter_rev(&self) -> impl Iterator<Item = PropertyId> + '_ {
        let mut next = self.head.as_deref();
        std::iter::from_fn(move || {
            let node = next?;
            next = node.prev.as_deref();
            Some(node.property)
        })
    }

    /// Properties in visiting order.
    pub fn to_vec(&self) -> Vec<PropertyId> {
        let mut properties: Vec<_> = self.iter_rev().collect();
        properties.reverse();
        properties
    }
}

impl FromIterator<PropertyId> for VisitedChain {
    fn from_iter<T: IntoIterator<Item = PropertyId>>(iter: T) -> Self {
        iter.into_iter()
            .fold(VisitedChain::new(), |chain, property| chain.push(property))
    }
}

impl PartialEq for VisitedChain {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter_rev().eq(other.iter_rev())
    }
}

impl Eq for VisitedChain {}
