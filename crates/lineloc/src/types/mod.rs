mod expression;
mod line_key;
mod locale_id;
mod plural_case;
mod status;
mod template;
mod value;

pub use expression::{BinaryOp, Expression, TrinaryOp, UnaryOp};
pub use line_key::{CULTURE_PARAMETER, KEY_PARAMETER, LineKey, plural_parameter_name};
pub use locale_id::LocaleId;
pub(crate) use locale_id::ROOT_LOCALE;
pub use plural_case::PluralCase;
pub use status::{
    FormatStatus, LocaleStatus, PluralityStatus, ResolveStatus, Severity, Status, StatusAxis,
};
pub use template::{Malformed, MalformedReason, ParsedTemplate, Part, Placeholder, Template, TextPart};
pub use value::{Arguments, ObjectValue, Value};
