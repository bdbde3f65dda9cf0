//! Template and key parsers.
//!
//! Templates are scanned by a single-pass state machine that never fails:
//! malformed placeholders degrade to literal text and are reported on the
//! template. Keys use a small `winnow` grammar.

mod error;
mod key;
mod template;

pub use error::ParseError;
pub use key::parse_key;
pub use template::{ALIGNMENT_FUNCTION, FORMAT_FUNCTION, build_template, parse_template};
