/// Maximum length of one sanitized filename component
pub const MAX_COMPONENT_LEN: usize = 100;

/// Makes a string safe to use as part of a filename
///
/// Trims, replaces each whitespace run with `_`, keeps only alphanumeric
/// characters, `_`, `-` and `.`, and truncates to `max_len` characters.
///
/// # Examples
///
/// ```
/// use catalog_harvest::assets::sanitize_for_filename;
///
/// assert_eq!(sanitize_for_filename("  Sapiens: A Brief History ", 100), "Sapiens_A_Brief_History");
/// assert_eq!(sanitize_for_filename("Add a comment", 5), "Add_a");
/// ```
pub fn sanitize_for_filename(s: &str, max_len: usize) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .take(max_len)
        .collect()
}

/// Deterministic image filename for an item
///
/// Empty components fall back to `book` and `no_upc`.
pub fn image_filename(title: &str, upc: &str) -> String {
    let title = sanitize_for_filename(title, MAX_COMPONENT_LEN);
    let upc = sanitize_for_filename(upc, MAX_COMPONENT_LEN);

    let title = if title.is_empty() { "book".to_string() } else { title };
    let upc = if upc.is_empty() { "no_upc".to_string() } else { upc };

    format!("{}_{}.jpg", title, upc)
}
