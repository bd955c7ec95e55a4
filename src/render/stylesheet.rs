use syntect::highlighting::{Color, FontStyle, Highlighter, StyleModifier, Theme};

use super::tokens::TokenCategory;

/// Root class placed on every highlighted `<pre>`; token rules are scoped under it.
pub(crate) const ROOT_CLASS: &str = "chroma";

const LINE_HIGHLIGHT_LAYOUT: &str = "display: block; width: 100%;";
const LINE_NUMBER_LAYOUT: &str = "margin-right: 0.4em; padding: 0 0.4em 0 0.4em;";

/// Build the CSS rules for `theme`: the background rule, then one rule per
/// token category in [`TokenCategory::ALL`] order, with the line-number layout
/// rules after the error rule.
///
/// A category the theme does not style takes its parent's rule, and failing
/// that the theme's foreground, so every class the highlighter emits has a rule.
pub(crate) fn stylesheet_for_theme(theme: &Theme) -> String {
    let highlighter = Highlighter::new(theme);
    let mut rules = Vec::with_capacity(TokenCategory::ALL.len() + 6);

    let background = background_declarations(theme);
    if !background.is_empty() {
        rules.push(format!(
            "/* Background */ .{ROOT_CLASS} {{ {} }}",
            background.join("; ")
        ));
    }

    let fallback = theme
        .settings
        .foreground
        .map(|foreground| vec![format!("color: {}", css_color(foreground))]);

    for category in TokenCategory::ALL {
        let declarations =
            category_declarations(&highlighter, category).or_else(|| fallback.clone());
        if let Some(declarations) = declarations {
            rules.push(rule(
                category.name(),
                category.class(),
                &declarations.join("; "),
            ));
        }
        if category == TokenCategory::Error {
            rules.extend(layout_rules(theme));
        }
    }

    rules.join("\n")
}

fn category_declarations(
    highlighter: &Highlighter<'_>,
    category: TokenCategory,
) -> Option<Vec<String>> {
    category
        .scopes()
        .map(|scope| modifier_declarations(&highlighter.style_mod_for_stack(&[scope])))
        .find(|declarations| !declarations.is_empty())
        .or_else(|| {
            category
                .parent()
                .and_then(|parent| category_declarations(highlighter, parent))
        })
}

fn layout_rules(theme: &Theme) -> [String; 5] {
    let line_numbers = with_color(LINE_NUMBER_LAYOUT, "color", theme.settings.gutter_foreground);
    [
        rule(
            "LineTableTD",
            "lntd",
            "vertical-align: top; padding: 0; margin: 0; border: 0;",
        ),
        rule(
            "LineTable",
            "lntable",
            "border-spacing: 0; padding: 0; margin: 0; border: 0; width: auto; overflow: auto; display: block;",
        ),
        rule(
            "LineHighlight",
            "hl",
            &with_color(
                LINE_HIGHLIGHT_LAYOUT,
                "background-color",
                theme.settings.line_highlight,
            ),
        ),
        rule("LineNumbersTable", "lnt", &line_numbers),
        rule("LineNumbers", "ln", &line_numbers),
    ]
}

fn with_color(layout: &str, property: &str, color: Option<Color>) -> String {
    match color {
        Some(color) => format!("{layout}{property}: {}", css_color(color)),
        None => layout.trim_end_matches(';').to_string(),
    }
}

fn rule(name: &str, class: &str, declarations: &str) -> String {
    format!("/* {name} */ .{ROOT_CLASS} .{class} {{ {declarations} }}")
}

/// Wrap stylesheet rules in the `<style>` element prepended to documents.
pub(crate) fn style_block(stylesheet: &str) -> String {
    format!("<style>{stylesheet}\n</style>")
}

fn background_declarations(theme: &Theme) -> Vec<String> {
    let mut declarations = Vec::new();
    if let Some(foreground) = theme.settings.foreground {
        declarations.push(format!("color: {}", css_color(foreground)));
    }
    if let Some(background) = theme.settings.background {
        declarations.push(format!("background-color: {}", css_color(background)));
    }
    declarations
}

fn modifier_declarations(modifier: &StyleModifier) -> Vec<String> {
    let mut declarations = Vec::new();
    if let Some(foreground) = modifier.foreground {
        declarations.push(format!("color: {}", css_color(foreground)));
    }
    if let Some(background) = modifier.background {
        declarations.push(format!("background-color: {}", css_color(background)));
    }
    if let Some(font_style) = modifier.font_style {
        if font_style.contains(FontStyle::BOLD) {
            declarations.push("font-weight: bold".to_string());
        }
        if font_style.contains(FontStyle::ITALIC) {
            declarations.push("font-style: italic".to_string());
        }
        if font_style.contains(FontStyle::UNDERLINE) {
            declarations.push("text-decoration: underline".to_string());
        }
    }
    declarations
}

fn css_color(color: Color) -> String {
    if color.a == 0xff {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color.r, color.g, color.b, color.a
        )
    }
}
