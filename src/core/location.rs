/// Extract the country token from a free-text "City, Country" location
///
/// The token is whatever follows the last comma (or the whole string when there is
/// no comma), trimmed and lower-cased. This is a coarse heuristic, not geocoding:
/// "Portland, Oregon, USA" yields "usa" and "Iceland" yields "iceland".
///
/// # Returns
/// The token, or an empty string for a missing location
pub fn country_token(location: Option<&str>) -> String {
    location
        .and_then(|loc| loc.rsplit(',').next())
        .map(|country| country.trim().to_lowercase())
        .unwrap_or_default()
}

/// Check whether two locations resolve to the same non-empty country token
#[inline]
pub fn same_country(a: Option<&str>, b: Option<&str>) -> bool {
    let a = country_token(a);
    !a.is_empty() && a == country_token(b)
}
