//! Integration tests for the packed multi-axis status.

use lineloc::{
    FormatStatus, LocaleStatus, PluralityStatus, ResolveStatus, Severity, Status, StatusAxis,
};

// =============================================================================
// Axes
// =============================================================================

#[test]
fn test_axes_are_independent() {
    let status = Status::new()
        .with(ResolveStatus::FoundInSource)
        .with(LocaleStatus::MatchedPolicy)
        .with(FormatStatus::ErrorMalformed)
        .with(PluralityStatus::Ok);
    assert_eq!(status.resolve(), ResolveStatus::FoundInSource);
    assert_eq!(status.locale(), LocaleStatus::MatchedPolicy);
    assert_eq!(status.format(), FormatStatus::ErrorMalformed);
    assert_eq!(status.plurality(), PluralityStatus::Ok);
}

#[test]
fn test_with_never_lowers() {
    let status = Status::new()
        .with(FormatStatus::ErrorMalformed)
        .with(FormatStatus::Ok);
    assert_eq!(status.format(), FormatStatus::ErrorMalformed);
}

#[test]
fn test_replace_overwrites() {
    let status = Status::new()
        .with(FormatStatus::ErrorMalformed)
        .replace(FormatStatus::Ok);
    assert_eq!(status.format(), FormatStatus::Ok);
}

#[test]
fn test_merge_is_per_axis_max() {
    let a = Status::new()
        .with(ResolveStatus::FoundInSource)
        .with(PluralityStatus::ErrorNoMatch);
    let b = Status::new()
        .with(ResolveStatus::FoundInline)
        .with(LocaleStatus::NotUsed);
    let merged = a.merge(b);
    assert_eq!(merged.resolve(), ResolveStatus::FoundInline);
    assert_eq!(merged.locale(), LocaleStatus::NotUsed);
    assert_eq!(merged.plurality(), PluralityStatus::ErrorNoMatch);
    assert_eq!(merged, b.merge(a));
}

#[test]
fn test_bits_round_trip() {
    let status = Status::new().with(ResolveStatus::NoResult);
    assert_eq!(Status::from_bits(status.bits()), status);
    assert_eq!(status.bits(), u64::from(ResolveStatus::NoResult.code()));
}

// =============================================================================
// Severity
// =============================================================================

#[test]
fn test_severity_bands() {
    assert_eq!(ResolveStatus::FoundInSource.severity(), Severity::Ok);
    assert_eq!(ResolveStatus::FoundAsKeyItself.severity(), Severity::Warning);
    assert_eq!(PluralityStatus::ErrorNoMatch.severity(), Severity::Error);
    assert_eq!(ResolveStatus::NoResult.severity(), Severity::Failed);
}

#[test]
fn test_status_severity_is_worst_axis() {
    let status = Status::new()
        .with(ResolveStatus::FoundInSource)
        .with(FormatStatus::ErrorMalformed);
    assert_eq!(status.severity(), Severity::Error);
    assert!(!status.is_ok());
    assert!(!status.is_failed());
    assert!(Status::new().is_ok());
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_display() {
    let status = Status::new()
        .with(ResolveStatus::FoundInSource)
        .with(LocaleStatus::MatchedPolicy)
        .with(FormatStatus::Ok)
        .with(PluralityStatus::NotUsed);
    insta::assert_snapshot!(status, @"Resolve.FoundInSource | Locale.MatchedPolicy | Format.Ok | Plurality.NotUsed");
    insta::assert_snapshot!(Status::new(), @"Unset");
}

#[test]
fn test_serialize() {
    let status = Status::new()
        .with(ResolveStatus::NoResult)
        .with(LocaleStatus::NotUsed);
    let json = serde_json::to_string(&status).unwrap();
    insta::assert_snapshot!(json, @r#"{"resolve":"NoResult","locale":"NotUsed","format":"Unset","plurality":"Unset","severity":"failed"}"#);
}
