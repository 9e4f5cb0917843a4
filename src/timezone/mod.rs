use anyhow::Result;

#[cfg(test)]
mod tests;

pub const FALLBACK_TIMEZONE: &str = "UTC";

pub trait TimezoneSource: Send + Sync {
    /// The IANA name of the caller's timezone, e.g. `Europe/Berlin`.
    fn timezone(&self) -> Result<String>;
}

/// Asks the operating system for the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimezone;

impl TimezoneSource for SystemTimezone {
    fn timezone(&self) -> Result<String> {
        Ok(iana_time_zone::get_timezone()?)
    }
}

#[derive(Debug, Clone)]
pub struct FixedTimezone(pub String);

impl TimezoneSource for FixedTimezone {
    fn timezone(&self) -> Result<String> {
        let FixedTimezone(name) = self;
        Ok(name.clone())
    }
}

/// Resolves the `X-Timezone` header value. Never fails and never returns an
/// empty string.
pub fn resolve(source: &dyn TimezoneSource) -> String {
    match source.timezone() {
        Ok(name) if !name.trim().is_empty() => name,
        Ok(_) => FALLBACK_TIMEZONE.to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "timezone resolution failed, using {}", FALLBACK_TIMEZONE);
            FALLBACK_TIMEZONE.to_string()
        }
    }
}
