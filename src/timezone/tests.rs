use crate::timezone::{resolve, FixedTimezone, SystemTimezone, TimezoneSource};
use anyhow::{bail, Result};

struct BrokenTimezone;

impl TimezoneSource for BrokenTimezone {
    fn timezone(&self) -> Result<String> {
        bail!("no locale data")
    }
}

#[test]
fn test_resolved_name_is_used() {
    let source = FixedTimezone("Europe/Berlin".to_string());
    assert_eq!("Europe/Berlin", resolve(&source));
}

#[test]
fn test_failure_falls_back_to_utc() {
    assert_eq!("UTC", resolve(&BrokenTimezone));
}

#[test]
fn test_empty_name_falls_back_to_utc() {
    let source = FixedTimezone(String::new());
    assert_eq!("UTC", resolve(&source));
}

#[test]
fn test_system_timezone_is_never_empty() {
    assert!(!resolve(&SystemTimezone).is_empty());
}
