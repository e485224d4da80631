//! URL parsing and path segment extraction.

/// Parses `url` the way libcurl interprets user input.
///
/// A URL without a scheme is parsed as `http://...`. That includes
/// `host:port/...`, which `url::Url` alone would read as scheme `host`.
/// Returns None when even the `http://` form does not parse.
pub fn parse_url(url: &str) -> Option<url::Url> {
    let url = url.trim();
    match url::Url::parse(url) {
        Ok(parsed) if !is_host_port(&parsed) => Some(parsed),
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            url::Url::parse(&format!("http://{}", url)).ok()
        }
        Err(_) => None,
    }
}

/// True for `localhost:8080/x`-style input: an opaque "scheme" followed by a
/// run of digits up to the first `/`.
fn is_host_port(parsed: &url::Url) -> bool {
    if !parsed.cannot_be_a_base() {
        return false;
    }
    let port = parsed.path().split('/').next().unwrap_or("");
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the path segments of `url`, in order, keeping a trailing empty
/// segment when the path ends in `/`.
///
/// Query string and fragment are never part of the result. Unparseable or
/// non-hierarchical URLs yield no segments.
pub fn path_segments(url: &str) -> Vec<String> {
    parse_url(url)
        .and_then(|parsed| {
            parsed
                .path_segments()
                .map(|segments| segments.map(str::to_string).collect())
        })
        .unwrap_or_default()
}
