use syntect::highlighting::Theme;
use thiserror::Error;

use crate::themes;

/// Knobs for a [`Renderer`](super::Renderer). Anything not set explicitly keeps
/// the value used by the shared default renderer.
#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Theme the embedded stylesheet is generated from.
    pub theme: Theme,
    /// Prepend a `<style>` block with the theme's token rules to every document.
    pub embed_css: bool,
    /// Guess the grammar from the first line when a code block has no language.
    pub autodetect: bool,
}

impl RendererOptions {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_embed_css(mut self, embed_css: bool) -> Self {
        self.embed_css = embed_css;
        self
    }

    pub fn with_autodetect(mut self, autodetect: bool) -> Self {
        self.autodetect = autodetect;
        self
    }
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            theme: themes::default_theme().clone(),
            embed_css: true,
            autodetect: true,
        }
    }
}

/// Failures raised inside the pipeline. Public render entry points absorb
/// them so callers always receive HTML.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markdown serialisation failed: {message}")]
    Markdown { message: String },
    #[error("syntax highlighting failed: {language}: {message}")]
    Highlighting { language: String, message: String },
}
