//! Integration tests for the process-wide current culture.

#![cfg(feature = "global-culture")]

use std::sync::Arc;

use lineloc::global::{CurrentCulturePolicy, current_culture, set_current_culture};
use lineloc::interpreter::{CulturePolicy, MemorySource};
use lineloc::{Arguments, Line, LocaleId};

// The current culture is shared by every test in this binary, so the
// scenarios run in one test.
#[test]
fn test_current_culture_drives_resolution() {
    assert_eq!(current_culture(), LocaleId::root());
    assert_eq!(CurrentCulturePolicy.ordered_locales(), vec![LocaleId::root()]);

    let mut source = MemorySource::new();
    source.insert_str("Culture:fi:Key:yes", "kyllä").unwrap();
    source.insert_str("Culture:sv:Key:yes", "ja").unwrap();
    source.insert_str("Key:yes", "yes").unwrap();
    let line = Line::root()
        .source(Arc::new(source))
        .culture_policy(Arc::new(CurrentCulturePolicy))
        .key("yes");

    assert_eq!(line.text(&Arguments::new()), "yes");

    set_current_culture("fi-FI");
    assert_eq!(
        CurrentCulturePolicy.ordered_locales(),
        vec![LocaleId::new("fi-FI"), LocaleId::new("fi"), LocaleId::root()]
    );
    assert_eq!(line.text(&Arguments::new()), "kyllä");

    set_current_culture("sv_SE");
    assert_eq!(current_culture(), LocaleId::new("sv-SE"));
    assert_eq!(line.text(&Arguments::new()), "ja");

    set_current_culture(LocaleId::root());
}
