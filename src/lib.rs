//! Markdown to HTML with syntax-highlighted code blocks.
//!
//! [`render`] uses a shared renderer configured with the default theme;
//! [`render_with_theme`] builds one for the given [`syntect::highlighting::Theme`].
//! Both prepend a `<style>` block whose rules map token-category classes
//! (`.k`, `.s2`, `.c1`, …) to the theme's colors.

pub mod config;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod themes;

pub use render::{
    RenderError, Renderer, RendererOptions, TokenCategory, default_renderer, render,
    render_with_theme,
};
