use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// Show folder convention: "<name> (<year>)"
// Examples: "Foo (1999)", "The Office (2005)"
static SHOW_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+ \(\d{4}\)$").unwrap());

// Release-style names that carry a year: "Foo.1999", "Foo_1999", "Foo [1999]",
// "Foo - 1999", "Foo (1999) 1080p"
static DERIVABLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)[\s._-]*[\[(]?((?:19|20)\d{2})[\])]?(?:[\s._-].*)?$").unwrap()
});

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NamingError {
    #[error("\"{0}\" does not match \"<name> (<year>)\"")]
    Convention(String),

    #[error("\"{0}\" contains characters not allowed in folder names")]
    InvalidCharacters(String),
}

/// Whether a show folder name follows the `"<name> (<year>)"` convention.
pub fn is_properly_named(name: &str) -> bool {
    SHOW_NAME_REGEX.is_match(name)
}

/// Check a user-supplied folder name.
pub fn validate_show_name(name: &str) -> Result<(), NamingError> {
    if name.contains(FORBIDDEN_CHARS) || name.chars().any(char::is_control) {
        return Err(NamingError::InvalidCharacters(name.to_string()));
    }
    if !is_properly_named(name) {
        return Err(NamingError::Convention(name.to_string()));
    }
    Ok(())
}

/// Derive a conventional name from a release-style folder name, if it
/// carries a plausible year.
pub fn derive_conventional_name(name: &str) -> Option<String> {
    let captures = DERIVABLE_REGEX.captures(name.trim())?;

    let raw_title = captures.get(1)?.as_str().replace(['.', '_'], " ");
    let title = WHITESPACE_REGEX.replace_all(raw_title.trim(), " ");
    let title = title.trim_end_matches(|c: char| c == '-' || c == '(' || c == '[' || c.is_whitespace());
    if title.is_empty() {
        return None;
    }

    let year = captures.get(2)?.as_str();
    let derived = format!("{} ({})", title, year);

    validate_show_name(&derived).ok().map(|_| derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properly_named() {
        assert!(is_properly_named("Foo (1999)"));
        assert!(is_properly_named("The Office (US) (2005)"));
    }

    #[test]
    fn test_not_properly_named() {
        assert!(!is_properly_named("Foo"));
        assert!(!is_properly_named("Foo(1999)"));
        assert!(!is_properly_named("Foo (99)"));
        assert!(!is_properly_named("Foo (1999) extra"));
        assert!(!is_properly_named(" (1999)"));
    }

    #[test]
    fn test_validate_show_name() {
        assert!(validate_show_name("Foo (1999)").is_ok());
        assert_eq!(
            validate_show_name("Foo"),
            Err(NamingError::Convention("Foo".to_string()))
        );
        assert_eq!(
            validate_show_name("Foo/Bar (1999)"),
            Err(NamingError::InvalidCharacters("Foo/Bar (1999)".to_string()))
        );
    }

    #[test]
    fn test_derive_from_release_names() {
        let cases = [
            ("Foo.1999", "Foo (1999)"),
            ("Foo_1999", "Foo (1999)"),
            ("Foo 1999", "Foo (1999)"),
            ("Foo [1999]", "Foo (1999)"),
            ("Foo - 1999", "Foo (1999)"),
            ("Foo (1999) 1080p", "Foo (1999)"),
            ("Breaking.Bad.2008.S01.1080p", "Breaking Bad (2008)"),
            ("Foo(1999)", "Foo (1999)"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                derive_conventional_name(input).as_deref(),
                Some(expected),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_derive_without_year() {
        assert_eq!(derive_conventional_name("Foo"), None);
        assert_eq!(derive_conventional_name("Foo 42"), None);
        assert_eq!(derive_conventional_name("1999"), None);
    }
}
