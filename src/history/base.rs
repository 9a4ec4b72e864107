//! Base path handling.
//!
//! The application may be mounted below a prefix (for example `/app`).
//! Locations handled by the router never include that prefix; hrefs and
//! server requests always do.

use url::Url;

/// Normalize a configured base path.
///
/// `""` and `"/"` both mean "mounted at the root" and normalize to `""`.
/// An absolute URL contributes only its path.
pub fn normalize_base(base: &str) -> String {
    let base = base.trim();
    let path = match Url::parse(base) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => base.to_string(),
    };

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Remove a normalized base from the front of a URL.
///
/// Returns `None` when the URL is not under the base.
pub fn strip_base(base: &str, url: &str) -> Option<String> {
    let rest = url.strip_prefix(base)?;
    match rest.chars().next() {
        None => Some("/".to_string()),
        Some('/') => Some(rest.to_string()),
        Some('?') | Some('#') => Some(format!("/{}", rest)),
        Some(_) => None,
    }
}

/// Prefix a location with a normalized base.
pub fn create_href(base: &str, location: &str) -> String {
    format!("{}{}", base, location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("/"), "");
        assert_eq!(normalize_base("/app/"), "/app");
        assert_eq!(normalize_base("app"), "/app");
        assert_eq!(normalize_base("/nested/app//"), "/nested/app");
        assert_eq!(normalize_base("https://scanner.local/ui/"), "/ui");
    }

    #[test]
    fn test_strip_base() {
        assert_eq!(strip_base("", "/settings").as_deref(), Some("/settings"));
        assert_eq!(strip_base("", "").as_deref(), Some("/"));
        assert_eq!(strip_base("/app", "/app").as_deref(), Some("/"));
        assert_eq!(strip_base("/app", "/app/results/1").as_deref(), Some("/results/1"));
        assert_eq!(strip_base("/app", "/app?x=1").as_deref(), Some("/?x=1"));
        assert_eq!(strip_base("/app", "/application"), None);
        assert_eq!(strip_base("/app", "/other"), None);
    }

    #[test]
    fn test_create_href() {
        assert_eq!(create_href("", "/settings"), "/settings");
        assert_eq!(create_href("/app", "/results/1"), "/app/results/1");
    }
}
