//! Markdown to HTML rendering with highlighted code blocks.
//!
//! The pipeline is pure: comrak parses the document, every code block node is
//! replaced by pre-highlighted HTML, and the tree is serialised. When CSS
//! embedding is on, the theme stylesheet is prepended as a `<style>` block.
//! Nothing here performs I/O.

mod config;
mod highlight;
mod rewrite;
mod stylesheet;
mod tokens;
mod types;

use comrak::{Arena, format_html, nodes::AstNode};
use once_cell::sync::Lazy;
use syntect::{highlighting::Theme, parsing::SyntaxSet};
use tracing::{debug, error};

pub use tokens::TokenCategory;
pub use types::{RenderError, RendererOptions};

use config::default_options;
use rewrite::rewrite_ast;
use stylesheet::{style_block, stylesheet_for_theme};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(two_face::syntax::extra_newlines);

static DEFAULT_RENDERER: Lazy<Renderer> = Lazy::new(Renderer::default);

/// Grammars shared by every renderer.
pub(crate) fn syntax_set() -> &'static SyntaxSet {
    &SYNTAX_SET
}

/// Shared renderer using the default theme with CSS embedding enabled.
pub fn default_renderer() -> &'static Renderer {
    &DEFAULT_RENDERER
}

/// Render `markdown` with the default theme.
pub fn render(markdown: &str) -> String {
    default_renderer().render(markdown)
}

/// Render `markdown` with `theme`, keeping every other default option. A fresh
/// renderer is built for each call.
pub fn render_with_theme(markdown: &str, theme: &Theme) -> String {
    Renderer::new(RendererOptions::default().with_theme(theme.clone())).render(markdown)
}

/// A configured Markdown renderer. Immutable once built, so a single instance
/// can serve concurrent callers.
pub struct Renderer {
    options: RendererOptions,
    markdown: comrak::options::Options<'static>,
    stylesheet: String,
    style_block: String,
}

impl Renderer {
    pub fn new(options: RendererOptions) -> Self {
        let stylesheet = stylesheet_for_theme(&options.theme);
        let style_block = if options.embed_css {
            style_block(&stylesheet)
        } else {
            String::new()
        };

        debug!(
            target = "fencemark::render",
            theme = options.theme.name.as_deref().unwrap_or("unnamed"),
            embed_css = options.embed_css,
            autodetect = options.autodetect,
            "renderer constructed"
        );

        Self {
            options,
            markdown: default_options(),
            stylesheet,
            style_block,
        }
    }

    /// Render a document. Never fails: malformed Markdown degrades to literal
    /// text and code the grammar engine rejects is emitted unhighlighted.
    pub fn render(&self, markdown: &str) -> String {
        let arena = Arena::new();
        let root = comrak::parse_document(&arena, markdown, &self.markdown);

        let outcome = rewrite_ast(root, syntax_set(), self.options.autodetect);

        let mut html = String::with_capacity(self.style_block.len() + markdown.len() * 2);
        html.push_str(&self.style_block);
        if let Err(err) = render_html_stage(root, &self.markdown, &mut html) {
            error!(
                target = "fencemark::render",
                error = %err,
                "document serialisation stopped early"
            );
        }

        debug!(
            target = "fencemark::render",
            code_blocks = outcome.code_blocks,
            fallbacks = outcome.fallbacks,
            bytes = html.len(),
            "document rendered"
        );

        html
    }

    /// Stylesheet rules for the configured theme, without the `<style>` wrapper.
    /// Available even when embedding is disabled.
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererOptions::default())
    }
}

fn render_html_stage<'a>(
    root: &'a AstNode<'a>,
    options: &comrak::options::Options<'static>,
    html: &mut String,
) -> Result<(), RenderError> {
    format_html(root, options, html).map_err(|err| RenderError::Markdown {
        message: err.to_string(),
    })
}
