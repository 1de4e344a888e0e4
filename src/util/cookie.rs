//! Cookie lookup for the CSRF token.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Find `name` in a `document.cookie` string and percent-decode its value.
///
/// A value that is not valid percent-encoding is returned as stored.
#[must_use]
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    cookies.split(';').find_map(|pair| {
        let value = pair.trim().strip_prefix(name)?.strip_prefix('=')?;
        Some(match urlencoding::decode(value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value.to_owned(),
        })
    })
}
