//! Helpers for the transformed form markup.

use std::sync::LazyLock;

use regex::Regex;

static FORM_TITLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"<\s*h3\s[^>]*id="form-title"[^>]*>([^<]*)<"#).ok()
});

/// Text of the `<h3 id="form-title">` element, if present
pub fn title_from_form(form: &str) -> Option<String> {
    let regex = FORM_TITLE.as_ref()?;
    regex
        .captures(form)
        .and_then(|captures| captures.get(1))
        .map(|title| title.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}
