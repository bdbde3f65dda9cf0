//! Terminal output helpers.

mod diagnostic;
pub mod table;

pub use diagnostic::{KeyDiagnostic, TemplateDiagnostic};
