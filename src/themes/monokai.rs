//! Monokai with the palette and rule set of the chroma/Pygments `monokai`
//! style, expressed as a syntect theme keyed by each category's first selector.

use std::str::FromStr;

use syntect::highlighting::{
    Color, FontStyle, ScopeSelectors, StyleModifier, Theme, ThemeItem, ThemeSettings,
};

use crate::render::TokenCategory;

const FOREGROUND: Color = rgb(0xf8f8f2);
const BACKGROUND: Color = rgb(0x272822);
const LINE_HIGHLIGHT: Color = rgb(0x3c3d38);
const LINE_NUMBERS: Color = rgb(0x7f7f7f);

const BLUE: u32 = 0x66d9ef;
const PINK: u32 = 0xf92672;
const GREEN: u32 = 0xa6e22e;
const PURPLE: u32 = 0xae81ff;
const YELLOW: u32 = 0xe6db74;
const GRAY: u32 = 0x75715e;

const fn rgb(hex: u32) -> Color {
    Color {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
        a: 0xff,
    }
}

pub(super) fn theme() -> Theme {
    let scopes = TokenCategory::ALL
        .iter()
        .filter_map(|category| {
            let selector = category.selectors().first()?;
            let scope = ScopeSelectors::from_str(selector).ok()?;
            Some(ThemeItem {
                scope,
                style: category_style(*category),
            })
        })
        .collect();

    Theme {
        name: Some("Monokai".to_string()),
        settings: ThemeSettings {
            foreground: Some(FOREGROUND),
            background: Some(BACKGROUND),
            line_highlight: Some(LINE_HIGHLIGHT),
            gutter_foreground: Some(LINE_NUMBERS),
            ..ThemeSettings::default()
        },
        scopes,
        ..Theme::default()
    }
}

fn category_style(category: TokenCategory) -> StyleModifier {
    use TokenCategory::*;

    let color = match category {
        Error => {
            return StyleModifier {
                foreground: Some(rgb(0x960050)),
                background: Some(rgb(0x1e0010)),
                font_style: None,
            };
        }
        GenericEmph => return font(FontStyle::ITALIC),
        GenericStrong => return font(FontStyle::BOLD),
        Keyword | KeywordConstant | KeywordDeclaration | KeywordPseudo | KeywordReserved
        | KeywordType | NameConstant => BLUE,
        KeywordNamespace | NameTag | Operator | OperatorWord | GenericDeleted => PINK,
        NameAttribute | NameClass | NameDecorator | NameException | NameFunction | NameOther
        | GenericInserted => GREEN,
        Literal | LiteralStringEscape | LiteralNumber | LiteralNumberBin | LiteralNumberFloat
        | LiteralNumberHex | LiteralNumberInteger | LiteralNumberIntegerLong
        | LiteralNumberOct => PURPLE,
        LiteralDate | LiteralString | LiteralStringAffix | LiteralStringBacktick
        | LiteralStringChar | LiteralStringDelimiter | LiteralStringDoc | LiteralStringDouble
        | LiteralStringHeredoc | LiteralStringInterpol | LiteralStringOther
        | LiteralStringRegex | LiteralStringSingle | LiteralStringSymbol => YELLOW,
        Comment | CommentHashbang | CommentMultiline | CommentSingle | CommentSpecial
        | CommentPreproc | CommentPreprocFile | GenericSubheading => GRAY,
    };

    StyleModifier {
        foreground: Some(rgb(color)),
        background: None,
        font_style: None,
    }
}

fn font(font_style: FontStyle) -> StyleModifier {
    StyleModifier {
        foreground: None,
        background: None,
        font_style: Some(font_style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_an_entry() {
        assert_eq!(theme().scopes.len(), TokenCategory::ALL.len());
    }

    #[test]
    fn editor_colors_are_set() {
        let theme = theme();
        assert_eq!(theme.settings.foreground, Some(FOREGROUND));
        assert_eq!(theme.settings.background, Some(BACKGROUND));
        assert_eq!(theme.settings.line_highlight, Some(LINE_HIGHLIGHT));
        assert_eq!(theme.settings.gutter_foreground, Some(LINE_NUMBERS));
    }
}
