/// Canonical caller-facing reference for a document plus an optional link
/// target: the vault-relative path without its markdown extension, suffixed
/// with `#target` when a target exists.
#[must_use]
pub fn build_link_path(path: &str, link_target: &str) -> String {
    let base = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".markdown"))
        .unwrap_or(path);
    if link_target.is_empty() {
        return base.to_string();
    }
    format!("{base}#{link_target}")
}

/// Wikilink insertion string: `[[link_path|label]]`, or `[[link_path]]` when
/// no label is given.
#[must_use]
pub fn compose_wikilink(link_path: &str, label: &str) -> String {
    if label.is_empty() {
        return format!("[[{link_path}]]");
    }
    format!("[[{link_path}|{label}]]")
}
