//! JSON-backed translation catalog.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use std::time::SystemTime;

use tracing::{debug, info, warn};

use super::{Translator, format_template, resolve_locale};
use crate::config::I18nConfig;
use crate::error::{Result, SemanticError};

type Messages = HashMap<String, String>;

struct State {
    locales: HashMap<String, Messages>,
    last_mtime: Option<SystemTime>,
}

/// Flat `key -> message` maps per locale, loaded from `<dir>/<locale>.json`.
///
/// With `hot_reload` enabled every lookup compares the newest `*.json`
/// modification time in the directory with the one seen at the last load,
/// and reloads (re-checking under the write lock) when files changed.
pub struct LocaleCatalog {
    config: I18nConfig,
    state: RwLock<State>,
}

impl LocaleCatalog {
    /// Load every supported locale. A missing file yields an empty map.
    pub fn load(config: I18nConfig) -> Result<Self> {
        let locales = load_locales(&config.locales_dir, &config.supported)?;
        let last_mtime = dir_mtime(&config.locales_dir);
        info!(
            dir = %config.locales_dir.display(),
            locales = ?config.supported,
            hot_reload = config.hot_reload,
            "translation catalog loaded"
        );
        Ok(Self {
            config,
            state: RwLock::new(State {
                locales,
                last_mtime,
            }),
        })
    }

    /// Build an in-memory catalog; nothing is read from disk.
    pub fn from_messages(default_locale: &str, locales: HashMap<String, Messages>) -> Self {
        let config = I18nConfig {
            supported: locales.keys().cloned().collect(),
            default_locale: default_locale.to_string(),
            hot_reload: false,
            ..Default::default()
        };
        Self {
            config,
            state: RwLock::new(State {
                locales,
                last_mtime: None,
            }),
        }
    }

    /// Translate and fill `{name}` placeholders from `ctx`.
    pub fn translate_with(&self, key: &str, locale: &str, ctx: &[(&str, &str)]) -> String {
        format_template(&self.translate(key, locale), ctx)
    }

    /// Resolve a language hint against this catalog's supported locales.
    pub fn resolve_locale(&self, hint: Option<&str>) -> String {
        resolve_locale(hint, &self.config.supported, &self.config.default_locale)
    }

    pub fn supported(&self) -> &[String] {
        &self.config.supported
    }

    pub fn default_locale(&self) -> &str {
        &self.config.default_locale
    }

    /// Re-read all locale files now, regardless of modification times.
    pub fn reload(&self) -> Result<()> {
        let locales = load_locales(&self.config.locales_dir, &self.config.supported)?;
        let mut state = self
            .state
            .write()
            .map_err(|_| SemanticError::LockPoisoned("locale catalog"))?;
        state.locales = locales;
        state.last_mtime = dir_mtime(&self.config.locales_dir);
        Ok(())
    }

    fn maybe_hot_reload(&self) {
        if !self.config.hot_reload {
            return;
        }
        let current = dir_mtime(&self.config.locales_dir);
        let stale = self
            .state
            .read()
            .map(|state| current > state.last_mtime)
            .unwrap_or(false);
        if !stale {
            return;
        }

        let Ok(mut state) = self.state.write() else {
            return;
        };
        // Second check, another caller may have reloaded already
        let current = dir_mtime(&self.config.locales_dir);
        if current <= state.last_mtime {
            return;
        }
        match load_locales(&self.config.locales_dir, &self.config.supported) {
            Ok(locales) => {
                state.locales = locales;
                debug!(dir = %self.config.locales_dir.display(), "translation catalog reloaded");
            }
            Err(e) => {
                warn!(error = %e, "translation reload failed, keeping previous messages");
            }
        }
        state.last_mtime = current;
    }
}

impl Translator for LocaleCatalog {
    fn translate(&self, key: &str, locale: &str) -> String {
        self.maybe_hot_reload();
        let Ok(state) = self.state.read() else {
            return key.to_string();
        };
        [locale, self.config.default_locale.as_str()]
            .iter()
            .find_map(|l| state.locales.get(*l).and_then(|m| m.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn load_locales(dir: &Path, supported: &[String]) -> Result<HashMap<String, Messages>> {
    let mut data = HashMap::with_capacity(supported.len());
    for lang in supported {
        let path = dir.join(format!("{lang}.json"));
        if !path.exists() {
            data.insert(lang.clone(), Messages::new());
            continue;
        }
        let content = fs::read_to_string(&path).map_err(|e| {
            SemanticError::Configuration(format!("Failed to read locale file {path:?}: {e}"))
        })?;
        let messages: Messages = serde_json::from_str(&content)?;
        data.insert(lang.clone(), messages);
    }
    Ok(data)
}

/// Newest modification time among `*.json` files in `dir`.
fn dir_mtime(dir: &Path) -> Option<SystemTime> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|entry| entry.metadata().ok()?.modified().ok())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LocaleCatalog {
        let en = HashMap::from([
            ("greeting".to_string(), "Hello {name}".to_string()),
            ("only_en".to_string(), "English only".to_string()),
        ]);
        let zh = HashMap::from([("greeting".to_string(), "你好 {name}".to_string())]);
        LocaleCatalog::from_messages(
            "en",
            HashMap::from([("en".to_string(), en), ("zh".to_string(), zh)]),
        )
    }

    #[test]
    fn translates_per_locale() {
        let c = catalog();
        assert_eq!(c.translate("greeting", "zh"), "你好 {name}");
        assert_eq!(c.translate_with("greeting", "en", &[("name", "Ada")]), "Hello Ada");
    }

    #[test]
    fn falls_back_to_default_locale_then_key() {
        let c = catalog();
        assert_eq!(c.translate("only_en", "zh"), "English only");
        assert_eq!(c.translate("missing.key", "zh"), "missing.key");
        assert_eq!(c.translate("greeting", "fr"), "Hello {name}");
    }
}
