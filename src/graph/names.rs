// src/graph/names.rs
//! Identifier hygiene: npm package-name validation and text sanitizing.

const BLACKLIST: &[&str] = &["node_modules", "favicon.ico"];

/// Returns true if `name` is accepted by npm's rule for pre-existing packages.
///
/// Rules that npm only warns about for old packages (uppercase letters, length
/// above 214, core module names, `~'!()*`) are accepted. A name containing
/// `/.` is rejected outright.
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.starts_with('.') || name.starts_with('_') {
        return false;
    }
    if name.trim() != name || name.contains("/.") {
        return false;
    }
    if BLACKLIST.iter().any(|b| b.eq_ignore_ascii_case(name)) {
        return false;
    }

    if name.chars().all(is_uri_component_safe) {
        return true;
    }

    // `encodeURIComponent` would escape the slash; only the scoped form may have one.
    scoped_parts(name).is_some_and(|(scope, pkg)| {
        scope.chars().all(is_uri_component_safe) && pkg.chars().all(is_uri_component_safe)
    })
}

/// Splits `@scope/name` into its parts.
#[must_use]
pub fn scoped_parts(name: &str) -> Option<(&str, &str)> {
    let rest = name.strip_prefix('@')?;
    let (scope, pkg) = rest.split_once('/')?;
    if scope.is_empty() || pkg.is_empty() {
        return None;
    }
    Some((scope, pkg))
}

/// Strips control characters from a free-text identifier.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Characters `encodeURIComponent` leaves untouched.
fn is_uri_component_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
}
