/// Turns a title into a URL-safe id: lowercase ASCII alphanumerics separated
/// by single hyphens. Returns an empty string when nothing usable remains.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Sanitizes a caller-supplied id the same way titles are.
pub fn sanitize_id(id: &str) -> String {
    slugify(id)
}
