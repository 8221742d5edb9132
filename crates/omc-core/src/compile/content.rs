//! Content negotiation: effective MIME lists and the request content type.

/// Media-type prefix that selects the JSON handling strategies.
pub const JSON_MIME: &str = "application/json";

const UTF8_CHARSET: &str = "; charset=utf-8";

/// Operation-level list if non-empty, else the service-wide default.
pub fn effective<'a>(operation: &'a [String], service: &'a [String]) -> &'a [String] {
    if operation.is_empty() { service } else { operation }
}

/// Case-insensitive "starts with the JSON media type".
pub fn is_json(entry: &str) -> bool {
    entry
        .get(..JSON_MIME.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(JSON_MIME))
}

pub fn produces_json(produces: &[String]) -> bool {
    produces.iter().any(|entry| is_json(entry))
}

/// Derive the request content type from the effective consume list: the
/// first entry, unless a JSON entry is present, which always wins. JSON
/// content types gain a UTF-8 charset parameter unless one is already
/// declared.
pub fn request_content_type(consumes: &[String]) -> Option<String> {
    let chosen = consumes
        .iter()
        .find(|entry| is_json(entry))
        .or_else(|| consumes.first())?;

    let mut content_type = chosen.clone();
    if is_json(&content_type) && !content_type.to_ascii_lowercase().contains("charset") {
        content_type.push_str(UTF8_CHARSET);
    }
    Some(content_type)
}
