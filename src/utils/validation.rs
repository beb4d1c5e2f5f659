use crate::utils::error::{RadarError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> RadarError {
    RadarError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Search endpoints must be absolute http(s) URLs.
pub fn validate_endpoint(field_name: &str, endpoint: &str) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(invalid(field_name, endpoint, "URL cannot be empty"));
    }

    let url = Url::parse(endpoint)
        .map_err(|e| invalid(field_name, endpoint, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            endpoint,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_min(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// The bundle is written under the output directory, so its name must be a
/// bare `.zip` file name.
pub fn validate_bundle_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty(field_name, name)?;

    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(invalid(field_name, name, "Bundle name must be a file name, not a path"));
    }

    if !name.to_lowercase().ends_with(".zip") || name.len() == ".zip".len() {
        return Err(invalid(field_name, name, "Bundle name must end in .zip"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_endpoint("search.endpoint", "https://google.serper.dev/search").is_ok());
        assert!(validate_endpoint("search.endpoint", "http://127.0.0.1:8080/search").is_ok());
        assert!(validate_endpoint("search.endpoint", "").is_err());
        assert!(validate_endpoint("search.endpoint", "invalid-url").is_err());
        assert!(validate_endpoint("search.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_min() {
        assert!(validate_min("cache.capacity", 32, 1).is_ok());
        assert!(validate_min("cache.capacity", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("search.query", "vagas").is_ok());
        assert!(validate_non_empty("search.query", "   ").is_err());
    }

    #[test]
    fn test_validate_bundle_name() {
        let cases = [
            ("trampo_local_report.zip", true),
            ("Radar.ZIP", true),
            ("", false),
            (".zip", false),
            ("report.csv", false),
            ("out/report.zip", false),
            ("..\\report.zip", false),
        ];

        for (name, ok) in cases {
            assert_eq!(validate_bundle_name("load.bundle_name", name).is_ok(), ok, "{}", name);
        }
    }

    #[test]
    fn test_error_names_the_field() {
        match validate_bundle_name("load.bundle_name", "a/b.zip") {
            Err(RadarError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "load.bundle_name");
                assert_eq!(value, "a/b.zip");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
