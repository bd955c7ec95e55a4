use comrak::options::Options;

/// Markdown dialect shared by every renderer: CommonMark plus the common
/// GitHub-style extensions (tables, strikethrough, autolinks, definition lists).
pub(crate) fn default_options() -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options);
    options
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.tagfilter = false;
    ext.table = true;
    ext.autolink = true;
    ext.description_lists = true;

    let render = &mut options.render;
    // Highlighted code blocks are spliced in as raw HTML blocks.
    render.r#unsafe = true;
}

#[cfg(test)]
mod tests {
    use super::default_options;

    #[test]
    fn github_extensions_are_enabled() {
        let html = comrak::markdown_to_html(
            "| a |\n|---|\n| b |\n\n~~gone~~ https://example.com\n",
            &default_options(),
        );
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<a href=\"https://example.com\">https://example.com</a>"));
    }

    #[test]
    fn raw_html_passes_through() {
        let html = comrak::markdown_to_html("<div class=\"note\">hi</div>\n", &default_options());
        assert_eq!(html, "<div class=\"note\">hi</div>\n");
    }
}
