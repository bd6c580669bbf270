//! Validation for linked WordPress sites.

use url::Url;

use crate::error::CoreError;

/// Maximum length of a site display name.
pub const MAX_SITE_NAME_LEN: usize = 120;

/// Validate a site display name and return it trimmed.
pub fn validate_site_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Site name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_SITE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Site name must be at most {MAX_SITE_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a site URL and return it without a trailing slash.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
pub fn normalize_site_url(raw: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| CoreError::Validation(format!("Invalid site URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CoreError::Validation(
            "Site URL must use http or https".into(),
        ));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(CoreError::Validation("Site URL must include a host".into()));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
