//! Translation of stable machine labels into user-facing messages.
//!
//! The classifier never produces localized text. The boundary layer turns a
//! sentinel outcome into a message through a [`Translator`]; this crate
//! ships [`LocaleCatalog`], which reads flat `<locale>.json` string maps.

mod catalog;
mod locale;

pub use catalog::LocaleCatalog;
pub use locale::resolve_locale;

use crate::types::{Classification, Taxonomy};

/// Message key for "could not determine the intent".
pub const ERROR_GET_INTENT: &str = "error.get_intent";

/// Message key for "could not determine the action".
pub const ERROR_GET_ACTION: &str = "error.get_action";

/// Message key for an empty input text.
pub const ERROR_EMPTY_INPUT: &str = "error.empty_input";

/// Message key for a provider that failed to load.
pub const ERROR_MODEL_UNAVAILABLE: &str = "error.model_unavailable";

/// The translation contract: `translate(key, locale) -> string`.
///
/// Implementations return the key itself when nothing matches, so callers
/// always get something printable.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, locale: &str) -> String;
}

/// Message key for a below-threshold result in `taxonomy`.
pub fn sentinel_message_key(taxonomy: Taxonomy) -> &'static str {
    match taxonomy {
        Taxonomy::Intent => ERROR_GET_INTENT,
        Taxonomy::Action => ERROR_GET_ACTION,
    }
}

/// Message key to show for a classification, `None` for a match.
pub fn message_key(classification: &Classification) -> Option<&'static str> {
    match classification {
        Classification::Matched { .. } => None,
        Classification::BelowThreshold { taxonomy, .. } => Some(sentinel_message_key(*taxonomy)),
        Classification::EmptyInput { .. } => Some(ERROR_EMPTY_INPUT),
    }
}

/// Substitute `{name}` placeholders from `ctx`.
///
/// `{{` and `}}` produce literal braces. If any placeholder has no value in
/// `ctx`, or a brace is unbalanced, the template is returned unchanged.
pub fn format_template(template: &str, ctx: &[(&str, &str)]) -> String {
    render(template, ctx).unwrap_or_else(|| template.to_string())
}

fn render(template: &str, ctx: &[(&str, &str)]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        ch => name.push(ch),
                    }
                }
                let (_, value) = ctx.iter().find(|(k, _)| *k == name)?;
                out.push_str(value);
            }
            '}' => return None,
            _ => out.push(c),
        }
    }
    Some(out)
}
