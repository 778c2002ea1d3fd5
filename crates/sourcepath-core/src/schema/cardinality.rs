use std::fmt;

/// Multiplicity of a property: `min..max`, where an absent `max` is
/// unbounded.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cardinality {
    pub min: u32,
    pub max: Option<u32>,
}

impl Cardinality {
    /// `1..1`
    pub const ONE: Cardinality = Cardinality {
        min: 1,
        max: Some(1),
    };

    /// `0..1`
    pub const OPTIONAL: Cardinality = Cardinality {
        min: 0,
        max: Some(1),
    };

    /// `0..*`
    pub const MANY: Cardinality = Cardinality { min: 0, max: None };

    pub const fn new(min: u32, max: Option<u32>) -> Cardinality {
        Cardinality { min, max }
    }

    /// True if at most one value can be held.
    pub fn is_single(&self) -> bool {
        matches!(self.max, Some(max) if max <= 1)
    }

    pub fn is_many(&self) -> bool {
        !self.is_single()
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Cardinality::ONE
    }
}

impl fmt::Debug for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}..*", self.min),
        }
    }
}
