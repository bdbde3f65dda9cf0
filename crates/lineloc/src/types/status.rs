//! Multi-axis resolution status.
//!
//! A [`Status`] packs four independent axes into one `u64`, eight bits each:
//!
//! | Axis | Bits | Describes |
//! |------|------|-----------|
//! | Resolve | 0..8 | where the template came from |
//! | Locale | 8..16 | which locale strategy matched |
//! | Format | 16..24 | template syntax and evaluation |
//! | Plurality | 24..32 | plural variant selection |
//!
//! Within an axis a larger code is more specific or more severe, so merging
//! two statuses takes the per-axis maximum. The code bands define severity:
//! `0x00..0x20` ok, `0x20..0x40` warning, `0x40..0x60` error, `0x60..` failed.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Severity class of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Error,
    Failed,
}

impl Severity {
    fn from_code(code: u8) -> Self {
        match code {
            0x00..0x20 => Severity::Ok,
            0x20..0x40 => Severity::Warning,
            0x40..0x60 => Severity::Error,
            _ => Severity::Failed,
        }
    }
}

/// One axis of a [`Status`].
pub trait StatusAxis: Copy + Eq {
    /// Bit offset of this axis inside the packed status.
    const SHIFT: u32;
    /// Axis name used in the textual form.
    const NAME: &'static str;

    fn code(self) -> u8;

    fn from_code(code: u8) -> Self;

    fn name(self) -> &'static str;

    fn severity(self) -> Severity {
        Severity::from_code(self.code())
    }
}

macro_rules! status_axis {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal, $shift:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
        #[repr(u8)]
        pub enum $name {
            #[default]
            Unset = 0x00,
            $( $(#[$vmeta])* $variant = $code, )+
        }

        impl StatusAxis for $name {
            const SHIFT: u32 = $shift;
            const NAME: &'static str = $label;

            fn code(self) -> u8 {
                self as u8
            }

            fn from_code(code: u8) -> Self {
                match code {
                    $( $code => $name::$variant, )+
                    _ => $name::Unset,
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $name::Unset => "Unset",
                    $( $name::$variant => stringify!($variant), )+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                write!(f, "{}.{}", $label, self.name())
            }
        }
    };
}

status_axis! {
    /// Where the winning template came from.
    ResolveStatus, "Resolve", 0 {
        /// Found in a value source.
        FoundInSource = 0x08,
        /// Found in an inline override map.
        FoundInline = 0x09,
        /// No source had it; the key's own literal value was used.
        FoundAsKeyItself = 0x20,
        /// Nothing found anywhere.
        NoResult = 0x60,
        /// Evaluation failed with an error that was folded into the status.
        FailedUnexpected = 0x7f,
    }
}

status_axis! {
    /// Which locale strategy produced the match.
    LocaleStatus, "Locale", 8 {
        /// Lookup did not involve a locale.
        NotUsed = 0x01,
        /// Matched the key's explicit culture.
        MatchedExplicit = 0x08,
        /// Matched one of the culture policy's locales.
        MatchedPolicy = 0x09,
        /// No locale produced a match.
        NoMatch = 0x40,
    }
}

status_axis! {
    /// Template syntax and placeholder evaluation outcome.
    FormatStatus, "Format", 16 {
        Ok = 0x01,
        /// A placeholder was malformed and rendered as literal text.
        ErrorMalformed = 0x40,
        /// A function call named in a placeholder could not be resolved.
        ErrorFunctionResolveFailed = 0x50,
        /// A placeholder expression could not be evaluated.
        ErrorEvaluationFailed = 0x58,
        /// The template text was null.
        FailedNull = 0x60,
    }
}

status_axis! {
    /// Plural variant selection outcome.
    PluralityStatus, "Plurality", 24 {
        /// No placeholder carries a plural category.
        NotUsed = 0x01,
        /// A plural-qualified variant replaced the template.
        Ok = 0x08,
        /// No plural-qualified variant matched; the unqualified template stands.
        ErrorNoMatch = 0x40,
        /// A plural placeholder's value is not a number.
        ErrorNotNumeric = 0x44,
        /// Plural rules are missing or do not know the category.
        ErrorRulesResolveFailed = 0x48,
    }
}

/// A packed multi-axis outcome code.
///
/// # Example
///
/// ```
/// use lineloc::{LocaleStatus, ResolveStatus, Severity, Status};
///
/// let status = Status::new()
///     .with(ResolveStatus::FoundInSource)
///     .with(LocaleStatus::MatchedPolicy);
/// assert_eq!(status.resolve(), ResolveStatus::FoundInSource);
/// assert_eq!(status.severity(), Severity::Ok);
///
/// // Merging never lowers an axis.
/// let merged = status.merge(Status::new().with(ResolveStatus::NoResult));
/// assert_eq!(merged.resolve(), ResolveStatus::NoResult);
/// assert_eq!(merged.locale(), LocaleStatus::MatchedPolicy);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Status(u64);

impl Status {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Read one axis.
    pub fn get<A: StatusAxis>(self) -> A {
        A::from_code(((self.0 >> A::SHIFT) & 0xff) as u8)
    }

    /// Raise one axis to `value` unless it already holds a more specific code.
    #[must_use]
    pub fn with<A: StatusAxis>(self, value: A) -> Self {
        if self.get::<A>().code() >= value.code() {
            return self;
        }
        self.replace(value)
    }

    /// Overwrite one axis regardless of its current code.
    #[must_use]
    pub fn replace<A: StatusAxis>(self, value: A) -> Self {
        let mask = 0xffu64 << A::SHIFT;
        Self((self.0 & !mask) | (u64::from(value.code()) << A::SHIFT))
    }

    /// Per-axis maximum of two statuses.
    #[must_use]
    pub fn merge(self, other: Status) -> Self {
        self.with(other.resolve())
            .with(other.locale())
            .with(other.format())
            .with(other.plurality())
    }

    pub fn resolve(self) -> ResolveStatus {
        self.get()
    }

    pub fn locale(self) -> LocaleStatus {
        self.get()
    }

    pub fn format(self) -> FormatStatus {
        self.get()
    }

    pub fn plurality(self) -> PluralityStatus {
        self.get()
    }

    /// The most severe class across all axes.
    pub fn severity(self) -> Severity {
        [
            self.resolve().severity(),
            self.locale().severity(),
            self.format().severity(),
            self.plurality().severity(),
        ]
        .into_iter()
        .max()
        .unwrap_or(Severity::Ok)
    }

    pub fn is_ok(self) -> bool {
        self.severity() == Severity::Ok
    }

    pub fn is_failed(self) -> bool {
        self.severity() == Severity::Failed
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let axes = [
            (self.resolve().code(), self.resolve().to_string()),
            (self.locale().code(), self.locale().to_string()),
            (self.format().code(), self.format().to_string()),
            (self.plurality().code(), self.plurality().to_string()),
        ];
        let mut first = true;
        for (code, text) in axes {
            if code == 0 {
                continue;
            }
            if !first {
                write!(f, " | ")?;
            }
            write!(f, "{text}")?;
            first = false;
        }
        if first {
            write!(f, "Unset")?;
        }
        Ok(())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Status", 5)?;
        state.serialize_field("resolve", self.resolve().name())?;
        state.serialize_field("locale", self.locale().name())?;
        state.serialize_field("format", self.format().name())?;
        state.serialize_field("plurality", self.plurality().name())?;
        state.serialize_field("severity", &self.severity())?;
        state.end()
    }
}
