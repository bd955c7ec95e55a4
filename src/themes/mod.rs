//! Named highlighting themes available to callers.
//!
//! Rendering itself only ever sees a [`Theme`] value; names are resolved here,
//! at the edges (configuration and the command line).

mod monokai;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use syntect::highlighting::{Theme, ThemeSet};
use thiserror::Error;
use two_face::theme::EmbeddedThemeName;

/// Name of the theme used by the shared default renderer.
pub const DEFAULT_THEME_NAME: &str = "monokai";

const EMBEDDED_THEMES: [(&str, EmbeddedThemeName); 9] = [
    (
        "monokai-extended-origin",
        EmbeddedThemeName::MonokaiExtendedOrigin,
    ),
    ("monokai-extended", EmbeddedThemeName::MonokaiExtended),
    ("monokai-extended-light", EmbeddedThemeName::MonokaiExtendedLight),
    ("dracula", EmbeddedThemeName::Dracula),
    ("nord", EmbeddedThemeName::Nord),
    ("gruvbox-dark", EmbeddedThemeName::GruvboxDark),
    ("gruvbox-light", EmbeddedThemeName::GruvboxLight),
    ("one-half-dark", EmbeddedThemeName::OneHalfDark),
    ("one-half-light", EmbeddedThemeName::OneHalfLight),
];

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown theme `{name}`")]
    Unknown { name: String },
}

/// Immutable lookup table of themes keyed by name.
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
    default: Theme,
}

impl ThemeRegistry {
    fn load() -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let embedded = two_face::theme::extra();
        for (name, theme) in EMBEDDED_THEMES {
            themes.insert(name.to_string(), embedded.get(theme).clone());
        }
        let default = monokai::theme();
        themes.insert(DEFAULT_THEME_NAME.to_string(), default.clone());

        Self { themes, default }
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn resolve(&self, name: &str) -> Result<&Theme, ThemeError> {
        self.get(name).ok_or_else(|| ThemeError::Unknown {
            name: name.to_string(),
        })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn default_theme(&self) -> &Theme {
        &self.default
    }
}

static REGISTRY: Lazy<ThemeRegistry> = Lazy::new(ThemeRegistry::load);

/// Shared registry, loaded on first use.
pub fn registry() -> &'static ThemeRegistry {
    &REGISTRY
}

pub fn default_theme() -> &'static Theme {
    registry().default_theme()
}

#[cfg(test)]
mod tests {
    use syntect::highlighting::Color;

    use super::*;

    #[test]
    fn default_theme_uses_monokai_palette() {
        let theme = default_theme();
        assert_eq!(
            theme.settings.foreground,
            Some(Color {
                r: 0xf8,
                g: 0xf8,
                b: 0xf2,
                a: 0xff
            })
        );
        assert_eq!(
            theme.settings.background,
            Some(Color {
                r: 0x27,
                g: 0x28,
                b: 0x22,
                a: 0xff
            })
        );
    }

    #[test]
    fn registry_contains_bundled_and_embedded_themes() {
        let registry = registry();
        for name in [
            DEFAULT_THEME_NAME,
            "monokai-extended-origin",
            "nord",
            "base16-ocean.dark",
            "InspiredGitHub",
        ] {
            assert!(registry.get(name).is_some(), "{name}");
        }
    }

    #[test]
    fn default_theme_is_registered_under_its_name() {
        let registered = registry().resolve(DEFAULT_THEME_NAME).expect("default theme");
        assert_eq!(registered.scopes.len(), default_theme().scopes.len());
        assert_eq!(registered.name, default_theme().name);
    }

    #[test]
    fn names_are_sorted() {
        let names: Vec<_> = registry().names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn unknown_theme_is_reported_by_name() {
        let err = registry().resolve("no-such-theme").err().expect("unknown");
        assert_eq!(err.to_string(), "unknown theme `no-such-theme`");
    }
}
