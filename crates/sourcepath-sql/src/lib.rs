//! Relational source paths: which tables to join and which columns to read
//! for every property of a conceptual model.

mod naming;
pub use naming::{ForeignKey, Naming};

pub mod path;
pub use path::SourcePath;

mod provider;
pub use provider::SqlSourcePathProvider;

mod resolve;
