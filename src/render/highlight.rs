use syntect::{
    parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet},
    util::LinesWithEndings,
};

use super::{
    stylesheet::ROOT_CLASS,
    tokens::{TokenCategory, classifier},
    types::RenderError,
};

/// Highlight `code` into a complete `<pre>` element whose spans carry
/// token-category classes.
pub(crate) fn highlight_code(
    language: Option<&str>,
    code: &str,
    syntax_set: &SyntaxSet,
    autodetect: bool,
) -> Result<String, RenderError> {
    let syntax = select_syntax(syntax_set, language, code, autodetect);
    let classifier = classifier();

    let mut state = ParseState::new(syntax);
    let mut stack = ScopeStack::new();
    let mut writer = SpanWriter::default();

    for line in LinesWithEndings::from(code) {
        let ops = state
            .parse_line(line, syntax_set)
            .map_err(|err| highlighting_error(language, err.to_string()))?;

        let mut cursor = 0;
        for (index, op) in ops {
            if index > cursor {
                writer.push(classifier.classify(stack.as_slice()), &line[cursor..index]);
                cursor = index;
            }
            stack
                .apply(&op)
                .map_err(|err| highlighting_error(language, format!("{err:?}")))?;
        }
        if cursor < line.len() {
            writer.push(classifier.classify(stack.as_slice()), &line[cursor..]);
        }
    }

    Ok(wrap_code(language, &writer.finish()))
}

/// Escaped, unhighlighted rendition used when the grammar engine gives up.
pub(crate) fn plain_code_block(language: Option<&str>, code: &str) -> String {
    let mut body = String::with_capacity(code.len());
    escape_html(&mut body, code);
    wrap_code(language, &body)
}

fn wrap_code(language: Option<&str>, body: &str) -> String {
    let mut html = format!("<pre class=\"{ROOT_CLASS}\">");
    match language {
        Some(language) => {
            let language = escape_attribute(language);
            html.push_str(&format!(
                "<code class=\"language-{language}\" data-lang=\"{language}\">"
            ));
        }
        None => html.push_str("<code>"),
    }
    html.push_str(body);
    html.push_str("</code></pre>\n");
    html
}

fn select_syntax<'s>(
    syntax_set: &'s SyntaxSet,
    language: Option<&str>,
    code: &str,
    autodetect: bool,
) -> &'s SyntaxReference {
    let found = match language {
        Some(token) => find_syntax(syntax_set, token),
        None if autodetect => code
            .lines()
            .next()
            .and_then(|first_line| syntax_set.find_syntax_by_first_line(first_line)),
        None => None,
    };
    found.unwrap_or_else(|| syntax_set.find_syntax_plain_text())
}

/// Fence tokens are matched case-insensitively: `RUST`, `Rust` and `rust` all
/// select the same grammar.
fn find_syntax<'a>(syntax_set: &'a SyntaxSet, token: &str) -> Option<&'a SyntaxReference> {
    let lowercase = token.to_ascii_lowercase();
    syntax_set
        .find_syntax_by_token(&lowercase)
        .or_else(|| syntax_set.find_syntax_by_name(&lowercase))
        .or_else(|| syntax_set.find_syntax_by_extension(&lowercase))
}

fn highlighting_error(language: Option<&str>, message: String) -> RenderError {
    RenderError::Highlighting {
        language: language.unwrap_or("text").to_string(),
        message,
    }
}

/// Accumulates escaped code, opening a span only when the category changes.
#[derive(Default)]
struct SpanWriter {
    html: String,
    open: Option<TokenCategory>,
}

impl SpanWriter {
    fn push(&mut self, category: Option<TokenCategory>, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.open != category {
            if self.open.is_some() {
                self.html.push_str("</span>");
            }
            if let Some(category) = category {
                self.html.push_str("<span class=\"");
                self.html.push_str(category.class());
                self.html.push_str("\">");
            }
            self.open = category;
        }
        escape_html(&mut self.html, text);
    }

    fn finish(mut self) -> String {
        if self.open.is_some() {
            self.html.push_str("</span>");
        }
        self.html
    }
}

fn escape_html(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\n' | '\r' | '\t' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}
