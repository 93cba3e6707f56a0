//! Locale resolution from a language hint.

/// Pick a supported locale for a language hint.
///
/// The hint may be a bare tag (`"zh-CN"`) or an `Accept-Language` value
/// (`"en-US,en;q=0.9"`); only its first entry counts. `zh*` maps to `zh`
/// and `en*` to `en` when supported; everything else, including a missing
/// hint, falls back to `default_locale`.
pub fn resolve_locale(hint: Option<&str>, supported: &[String], default_locale: &str) -> String {
    let lang = hint
        .and_then(|h| h.split(',').next())
        .map(|h| h.split(';').next().unwrap_or(h).trim().to_ascii_lowercase())
        .unwrap_or_default();

    let is_supported = |code: &str| supported.iter().any(|s| s == code);
    let locale = if lang.starts_with("zh") && is_supported("zh") {
        "zh"
    } else if lang.starts_with("en") && is_supported("en") {
        "en"
    } else {
        default_locale
    };
    locale.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both() -> Vec<String> {
        vec!["en".to_string(), "zh".to_string()]
    }

    #[test]
    fn resolves_language_families() {
        assert_eq!(resolve_locale(Some("zh-CN"), &both(), "en"), "zh");
        assert_eq!(resolve_locale(Some("EN-us"), &both(), "zh"), "en");
    }

    #[test]
    fn uses_first_accept_language_entry() {
        assert_eq!(
            resolve_locale(Some("zh-TW,zh;q=0.9,en;q=0.8"), &both(), "en"),
            "zh"
        );
        assert_eq!(resolve_locale(Some("en;q=0.8,zh"), &both(), "zh"), "en");
    }

    #[test]
    fn unknown_or_missing_falls_back() {
        assert_eq!(resolve_locale(Some("fr-FR"), &both(), "en"), "en");
        assert_eq!(resolve_locale(None, &both(), "zh"), "zh");
        assert_eq!(resolve_locale(Some(""), &both(), "en"), "en");
    }

    #[test]
    fn unsupported_family_falls_back() {
        let only_en = vec!["en".to_string()];
        assert_eq!(resolve_locale(Some("zh"), &only_en, "en"), "en");
    }
}
