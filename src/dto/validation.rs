//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a version is dotted numeric, with one to three parts.
///
/// # Examples
///
/// ```ignore
/// validate_version("1.0.0") // Ok
/// validate_version("2")     // Ok
/// validate_version("v1.0")  // Err - prefix
/// validate_version("1..0")  // Err - empty part
/// ```
pub fn validate_version(version: &str) -> Result<(), ValidationError> {
    let parts: Vec<&str> = version.split('.').collect();
    let well_formed = parts.len() <= 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

    if !well_formed {
        let mut err = ValidationError::new("version_format");
        err.message = Some(
            format!("version must look like `1.2.3` (got `{version}`)").into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Rejects text made only of whitespace; length limits catch the empty string.
pub fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if !text.is_empty() && text.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must contain non-whitespace characters".into());
        return Err(err);
    }

    Ok(())
}

/// Validates an endpoint path: leading slash, no whitespace, balanced `{param}` segments.
pub fn validate_endpoint_path(path: &str) -> Result<(), ValidationError> {
    if !path.starts_with('/') {
        let mut err = ValidationError::new("path_leading_slash");
        err.message = Some(format!("path `{path}` must start with `/`").into());
        return Err(err);
    }

    if path.chars().any(char::is_whitespace) {
        let mut err = ValidationError::new("path_whitespace");
        err.message = Some(format!("path `{path}` must not contain whitespace").into());
        return Err(err);
    }

    let mut open = false;
    for c in path.chars() {
        match c {
            '{' if open => return Err(unbalanced(path)),
            '{' => open = true,
            '}' if !open => return Err(unbalanced(path)),
            '}' => open = false,
            '/' if open => return Err(unbalanced(path)),
            _ => {}
        }
    }
    if open || path.contains("{}") {
        return Err(unbalanced(path));
    }

    Ok(())
}

fn unbalanced(path: &str) -> ValidationError {
    let mut err = ValidationError::new("path_parameters");
    err.message = Some(format!("path `{path}` has a malformed `{{param}}` segment").into());
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_version_valid() {
        assert!(validate_version("1.0.0").is_ok());
        assert!(validate_version("2.10").is_ok());
        assert!(validate_version("3").is_ok());
    }

    #[test]
    fn test_validate_version_invalid() {
        assert!(validate_version("").is_err());
        assert!(validate_version("v1.0.0").is_err());
        assert!(validate_version("1..0").is_err());
        assert!(validate_version("1.0.0.0").is_err());
        assert!(validate_version("1.0-beta").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Blog API").is_ok());
        assert!(validate_not_blank("  padded  ").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("\n\t").is_err());
    }

    #[test]
    fn test_validate_endpoint_path_valid() {
        assert!(validate_endpoint_path("/").is_ok());
        assert!(validate_endpoint_path("/api/users").is_ok());
        assert!(validate_endpoint_path("/api/users/{user_id}/posts/{post_id}").is_ok());
    }

    #[test]
    fn test_validate_endpoint_path_invalid() {
        assert!(validate_endpoint_path("api/users").is_err()); // no leading slash
        assert!(validate_endpoint_path("/api/my users").is_err()); // whitespace
        assert!(validate_endpoint_path("/api/users/{id").is_err()); // unclosed
        assert!(validate_endpoint_path("/api/users/id}").is_err()); // stray close
        assert!(validate_endpoint_path("/api/users/{}").is_err()); // empty name
        assert!(validate_endpoint_path("/api/{a/b}").is_err()); // slash inside
    }
}
