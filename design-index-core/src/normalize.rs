//! Raw upstream file record → [`NormalizedEntry`]. Pure, no I/O.

use crate::types::{EntryStatus, NormalizedEntry, ProjectName, RawFile};

/// Title used when the upstream record has no (or an empty) name.
pub const UNTITLED: &str = "Untitled";

/// Base of the derived `figmaUrl`.
pub const DESIGN_URL_BASE: &str = "https://www.figma.com/design";

/// `https://www.figma.com/design/{key}/{escaped title}`. Only the title is escaped.
pub fn design_url(key: &str, title: &str) -> String {
    format!("{DESIGN_URL_BASE}/{key}/{}", escape_component(title))
}

/// Percent-encode one URL component.
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` as-is, the same unreserved set as
/// ECMAScript's `encodeURIComponent`; everything else is UTF-8 percent-encoded.
pub fn escape_component(raw: &str) -> String {
    // urlencoding keeps only `- _ . ~`; every `%` it emits starts a triple, so
    // these replacements cannot match across escapes.
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}

/// Map one raw file of `project` into the output schema.
pub fn normalize(file: RawFile, project: Option<&ProjectName>, org: &str) -> NormalizedEntry {
    let title = file
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNTITLED.to_owned());
    let figma_url = design_url(&file.key, &title);

    NormalizedEntry {
        id: file.key,
        title,
        org: org.to_owned(),
        brand_key: None,
        category: Vec::new(),
        path: Vec::new(),
        status: EntryStatus::Active,
        tags: Vec::new(),
        thumb: None,
        figma_url,
        updated_at: file.last_modified,
        project: project.map(|p| p.0.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(key: &str, name: Option<&str>) -> RawFile {
        RawFile {
            key: key.into(),
            name: name.map(str::to_owned),
            last_modified: Some("2024-06-01T12:00:00Z".into()),
            thumbnail_url: Some("https://example.invalid/thumb.png".into()),
        }
    }

    #[test]
    fn url_escapes_title_only() {
        let entry = normalize(raw("abc123", Some("My File")), None, "figma");
        assert_eq!(entry.figma_url, "https://www.figma.com/design/abc123/My%20File");
    }

    #[test]
    fn component_escape_keeps_marks_and_encodes_separators() {
        assert_eq!(escape_component("Logo (v2)!"), "Logo%20(v2)!");
        assert_eq!(escape_component("a/b c"), "a%2Fb%20c");
        assert_eq!(escape_component("100%"), "100%25");
        assert_eq!(escape_component("%28"), "%2528");
    }

    #[test]
    fn missing_name_becomes_untitled() {
        let entry = normalize(raw("k1", None), None, "figma");
        assert_eq!(entry.title, "Untitled");
        assert!(entry.figma_url.ends_with("/k1/Untitled"));
    }

    #[test]
    fn empty_name_becomes_untitled() {
        let entry = normalize(raw("k1", Some("")), None, "figma");
        assert_eq!(entry.title, UNTITLED);
    }

    #[test]
    fn reserved_fields_are_empty_and_thumbnail_is_dropped() {
        let entry = normalize(raw("k1", Some("A")), Some(&ProjectName::from("Beta")), "acme");
        assert_eq!(entry.org, "acme");
        assert_eq!(entry.brand_key, None);
        assert_eq!(entry.thumb, None);
        assert!(entry.category.is_empty() && entry.path.is_empty() && entry.tags.is_empty());
        assert_eq!(entry.status, EntryStatus::Active);
        assert_eq!(entry.project.as_deref(), Some("Beta"));
    }

    #[test]
    fn timestamp_passes_through_unchanged() {
        let mut file = raw("k1", Some("A"));
        file.last_modified = Some("not a date".into());
        let entry = normalize(file, None, "figma");
        assert_eq!(entry.updated_at.as_deref(), Some("not a date"));

        let mut file = raw("k2", Some("B"));
        file.last_modified = None;
        assert_eq!(normalize(file, None, "figma").updated_at, None);
    }
}
