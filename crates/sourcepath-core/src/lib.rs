pub mod config;
pub use config::Config;

mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Severity};

mod error;
pub use error::{Error, IntoError};

pub mod overlay;

pub mod provider;
pub use provider::{EncodingContext, SourcePathInfo, SourcePathProvider, VisitedChain};

pub mod schema;
pub use schema::Model;

mod value_type;
pub use value_type::ValueType;

/// A Result type alias that uses this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
