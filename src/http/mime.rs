//! Extension to MIME type table.

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("xml", "text/xml"),
    ("gif", "image/gif"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
    ("pdf", "application/pdf"),
];

/// Content type for a request URI, keyed on the lowercased extension of its
/// last path segment. `None` when the URI has no extension or it is unmapped.
pub fn content_type_for(uri: &str) -> Option<&'static str> {
    let segment = uri.rsplit('/').next().unwrap_or(uri);
    let (_, ext) = segment.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();

    CONTENT_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(content_type_for("/INDEX.HTML"), Some("text/html"));
    }

    #[test]
    fn dots_in_directories_are_ignored() {
        assert_eq!(content_type_for("/v1.2/README"), None);
        assert_eq!(content_type_for("/v1.2/notes.txt"), Some("text/plain"));
    }
}
