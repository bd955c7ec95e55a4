use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use syntect::parsing::SyntaxSet;
use tracing::warn;

use super::highlight;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RewriteOutcome {
    pub(crate) code_blocks: usize,
    pub(crate) fallbacks: usize,
}

/// Replace every code block under `root` with pre-rendered, highlighted HTML.
pub(crate) fn rewrite_ast<'a>(
    root: &'a AstNode<'a>,
    syntax_set: &SyntaxSet,
    autodetect: bool,
) -> RewriteOutcome {
    let mut walker = RewriteWalker {
        syntax_set,
        autodetect,
        outcome: RewriteOutcome::default(),
    };
    walker.visit_nodes(root);
    walker.outcome
}

struct RewriteWalker<'a> {
    syntax_set: &'a SyntaxSet,
    autodetect: bool,
    outcome: RewriteOutcome,
}

impl RewriteWalker<'_> {
    fn visit_nodes(&mut self, node: &AstNode<'_>) {
        if let Some((info, literal)) = extract_code_block(node) {
            let language = info.split_whitespace().next();
            let html = match highlight::highlight_code(
                language,
                &literal,
                self.syntax_set,
                self.autodetect,
            ) {
                Ok(html) => html,
                Err(err) => {
                    warn!(
                        target = "fencemark::render::highlight",
                        language = language.unwrap_or("text"),
                        error = %err,
                        "falling back to plain code block"
                    );
                    self.outcome.fallbacks += 1;
                    highlight::plain_code_block(language, &literal)
                }
            };
            self.outcome.code_blocks += 1;

            let mut data = node.data.borrow_mut();
            data.value = NodeValue::HtmlBlock(NodeHtmlBlock {
                block_type: 0,
                literal: html,
            });
            // Code blocks are leaves.
            return;
        }

        let mut child = node.first_child();
        while let Some(next) = child {
            self.visit_nodes(next);
            child = next.next_sibling();
        }
    }
}

fn extract_code_block(node: &AstNode<'_>) -> Option<(String, String)> {
    let data = node.data.borrow();
    if let NodeValue::CodeBlock(block) = &data.value {
        Some((block.info.trim().to_string(), block.literal.clone()))
    } else {
        None
    }
}
