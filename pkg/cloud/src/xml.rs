//! Minimal scanning of the XML documents Blob Storage returns. Only flat
//! element text is ever needed, so no XML parser is pulled in.

/// Text of the first `<tag>...</tag>` in `body`.
pub(crate) fn element_text<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = body.find(&open)? + open.len();
    let end = body[start..].find(&close)?;
    Some(&body[start..start + end])
}

/// Every `<Name>` inside a `<Blob>` element, in document order.
pub(crate) fn blob_names(body: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = body;
    while let Some(start) = rest.find("<Blob>") {
        let blob = &rest[start..];
        let Some(end) = blob.find("</Blob>") else {
            break;
        };
        if let Some(name) = element_text(&blob[..end], "Name") {
            names.push(unescape(name));
        }
        rest = &blob[end..];
    }
    names
}

/// Continuation marker of a List Blobs page; `None` on the last page.
pub(crate) fn next_marker(body: &str) -> Option<String> {
    element_text(body, "NextMarker")
        .filter(|m| !m.is_empty())
        .map(unescape)
}

/// Decode the five predefined XML entities.
pub(crate) fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
