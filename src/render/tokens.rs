use once_cell::sync::Lazy;
use syntect::parsing::Scope;

/// Token categories emitted as CSS classes on highlighted spans.
///
/// Class names follow the short Pygments/Chroma convention (`k`, `s2`, `c1`, …)
/// so stylesheets written for those tools keep working. Declaration order is
/// the order rules appear in the generated stylesheet. Only categories a
/// stylesheet can style are listed: tokens outside them are left as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Error,
    Keyword,
    KeywordConstant,
    KeywordDeclaration,
    KeywordNamespace,
    KeywordPseudo,
    KeywordReserved,
    KeywordType,
    NameAttribute,
    NameClass,
    NameConstant,
    NameDecorator,
    NameException,
    NameFunction,
    NameOther,
    NameTag,
    Literal,
    LiteralDate,
    LiteralString,
    LiteralStringAffix,
    LiteralStringBacktick,
    LiteralStringChar,
    LiteralStringDelimiter,
    LiteralStringDoc,
    LiteralStringDouble,
    LiteralStringEscape,
    LiteralStringHeredoc,
    LiteralStringInterpol,
    LiteralStringOther,
    LiteralStringRegex,
    LiteralStringSingle,
    LiteralStringSymbol,
    LiteralNumber,
    LiteralNumberBin,
    LiteralNumberFloat,
    LiteralNumberHex,
    LiteralNumberInteger,
    LiteralNumberIntegerLong,
    LiteralNumberOct,
    Operator,
    OperatorWord,
    Comment,
    CommentHashbang,
    CommentMultiline,
    CommentSingle,
    CommentSpecial,
    CommentPreproc,
    CommentPreprocFile,
    GenericDeleted,
    GenericEmph,
    GenericInserted,
    GenericStrong,
    GenericSubheading,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 53] = [
        TokenCategory::Error,
        TokenCategory::Keyword,
        TokenCategory::KeywordConstant,
        TokenCategory::KeywordDeclaration,
        TokenCategory::KeywordNamespace,
        TokenCategory::KeywordPseudo,
        TokenCategory::KeywordReserved,
        TokenCategory::KeywordType,
        TokenCategory::NameAttribute,
        TokenCategory::NameClass,
        TokenCategory::NameConstant,
        TokenCategory::NameDecorator,
        TokenCategory::NameException,
        TokenCategory::NameFunction,
        TokenCategory::NameOther,
        TokenCategory::NameTag,
        TokenCategory::Literal,
        TokenCategory::LiteralDate,
        TokenCategory::LiteralString,
        TokenCategory::LiteralStringAffix,
        TokenCategory::LiteralStringBacktick,
        TokenCategory::LiteralStringChar,
        TokenCategory::LiteralStringDelimiter,
        TokenCategory::LiteralStringDoc,
        TokenCategory::LiteralStringDouble,
        TokenCategory::LiteralStringEscape,
        TokenCategory::LiteralStringHeredoc,
        TokenCategory::LiteralStringInterpol,
        TokenCategory::LiteralStringOther,
        TokenCategory::LiteralStringRegex,
        TokenCategory::LiteralStringSingle,
        TokenCategory::LiteralStringSymbol,
        TokenCategory::LiteralNumber,
        TokenCategory::LiteralNumberBin,
        TokenCategory::LiteralNumberFloat,
        TokenCategory::LiteralNumberHex,
        TokenCategory::LiteralNumberInteger,
        TokenCategory::LiteralNumberIntegerLong,
        TokenCategory::LiteralNumberOct,
        TokenCategory::Operator,
        TokenCategory::OperatorWord,
        TokenCategory::Comment,
        TokenCategory::CommentHashbang,
        TokenCategory::CommentMultiline,
        TokenCategory::CommentSingle,
        TokenCategory::CommentSpecial,
        TokenCategory::CommentPreproc,
        TokenCategory::CommentPreprocFile,
        TokenCategory::GenericDeleted,
        TokenCategory::GenericEmph,
        TokenCategory::GenericInserted,
        TokenCategory::GenericStrong,
        TokenCategory::GenericSubheading,
    ];

    /// Human-readable name used in stylesheet comments.
    pub fn name(self) -> &'static str {
        match self {
            TokenCategory::Error => "Error",
            TokenCategory::Keyword => "Keyword",
            TokenCategory::KeywordConstant => "KeywordConstant",
            TokenCategory::KeywordDeclaration => "KeywordDeclaration",
            TokenCategory::KeywordNamespace => "KeywordNamespace",
            TokenCategory::KeywordPseudo => "KeywordPseudo",
            TokenCategory::KeywordReserved => "KeywordReserved",
            TokenCategory::KeywordType => "KeywordType",
            TokenCategory::NameAttribute => "NameAttribute",
            TokenCategory::NameClass => "NameClass",
            TokenCategory::NameConstant => "NameConstant",
            TokenCategory::NameDecorator => "NameDecorator",
            TokenCategory::NameException => "NameException",
            TokenCategory::NameFunction => "NameFunction",
            TokenCategory::NameOther => "NameOther",
            TokenCategory::NameTag => "NameTag",
            TokenCategory::Literal => "Literal",
            TokenCategory::LiteralDate => "LiteralDate",
            TokenCategory::LiteralString => "LiteralString",
            TokenCategory::LiteralStringAffix => "LiteralStringAffix",
            TokenCategory::LiteralStringBacktick => "LiteralStringBacktick",
            TokenCategory::LiteralStringChar => "LiteralStringChar",
            TokenCategory::LiteralStringDelimiter => "LiteralStringDelimiter",
            TokenCategory::LiteralStringDoc => "LiteralStringDoc",
            TokenCategory::LiteralStringDouble => "LiteralStringDouble",
            TokenCategory::LiteralStringEscape => "LiteralStringEscape",
            TokenCategory::LiteralStringHeredoc => "LiteralStringHeredoc",
            TokenCategory::LiteralStringInterpol => "LiteralStringInterpol",
            TokenCategory::LiteralStringOther => "LiteralStringOther",
            TokenCategory::LiteralStringRegex => "LiteralStringRegex",
            TokenCategory::LiteralStringSingle => "LiteralStringSingle",
            TokenCategory::LiteralStringSymbol => "LiteralStringSymbol",
            TokenCategory::LiteralNumber => "LiteralNumber",
            TokenCategory::LiteralNumberBin => "LiteralNumberBin",
            TokenCategory::LiteralNumberFloat => "LiteralNumberFloat",
            TokenCategory::LiteralNumberHex => "LiteralNumberHex",
            TokenCategory::LiteralNumberInteger => "LiteralNumberInteger",
            TokenCategory::LiteralNumberIntegerLong => "LiteralNumberIntegerLong",
            TokenCategory::LiteralNumberOct => "LiteralNumberOct",
            TokenCategory::Operator => "Operator",
            TokenCategory::OperatorWord => "OperatorWord",
            TokenCategory::Comment => "Comment",
            TokenCategory::CommentHashbang => "CommentHashbang",
            TokenCategory::CommentMultiline => "CommentMultiline",
            TokenCategory::CommentSingle => "CommentSingle",
            TokenCategory::CommentSpecial => "CommentSpecial",
            TokenCategory::CommentPreproc => "CommentPreproc",
            TokenCategory::CommentPreprocFile => "CommentPreprocFile",
            TokenCategory::GenericDeleted => "GenericDeleted",
            TokenCategory::GenericEmph => "GenericEmph",
            TokenCategory::GenericInserted => "GenericInserted",
            TokenCategory::GenericStrong => "GenericStrong",
            TokenCategory::GenericSubheading => "GenericSubheading",
        }
    }

    /// CSS class carried by spans of this category.
    pub fn class(self) -> &'static str {
        match self {
            TokenCategory::Error => "err",
            TokenCategory::Keyword => "k",
            TokenCategory::KeywordConstant => "kc",
            TokenCategory::KeywordDeclaration => "kd",
            TokenCategory::KeywordNamespace => "kn",
            TokenCategory::KeywordPseudo => "kp",
            TokenCategory::KeywordReserved => "kr",
            TokenCategory::KeywordType => "kt",
            TokenCategory::NameAttribute => "na",
            TokenCategory::NameClass => "nc",
            TokenCategory::NameConstant => "no",
            TokenCategory::NameDecorator => "nd",
            TokenCategory::NameException => "ne",
            TokenCategory::NameFunction => "nf",
            TokenCategory::NameOther => "nx",
            TokenCategory::NameTag => "nt",
            TokenCategory::Literal => "l",
            TokenCategory::LiteralDate => "ld",
            TokenCategory::LiteralString => "s",
            TokenCategory::LiteralStringAffix => "sa",
            TokenCategory::LiteralStringBacktick => "sb",
            TokenCategory::LiteralStringChar => "sc",
            TokenCategory::LiteralStringDelimiter => "dl",
            TokenCategory::LiteralStringDoc => "sd",
            TokenCategory::LiteralStringDouble => "s2",
            TokenCategory::LiteralStringEscape => "se",
            TokenCategory::LiteralStringHeredoc => "sh",
            TokenCategory::LiteralStringInterpol => "si",
            TokenCategory::LiteralStringOther => "sx",
            TokenCategory::LiteralStringRegex => "sr",
            TokenCategory::LiteralStringSingle => "s1",
            TokenCategory::LiteralStringSymbol => "ss",
            TokenCategory::LiteralNumber => "m",
            TokenCategory::LiteralNumberBin => "mb",
            TokenCategory::LiteralNumberFloat => "mf",
            TokenCategory::LiteralNumberHex => "mh",
            TokenCategory::LiteralNumberInteger => "mi",
            TokenCategory::LiteralNumberIntegerLong => "il",
            TokenCategory::LiteralNumberOct => "mo",
            TokenCategory::Operator => "o",
            TokenCategory::OperatorWord => "ow",
            TokenCategory::Comment => "c",
            TokenCategory::CommentHashbang => "ch",
            TokenCategory::CommentMultiline => "cm",
            TokenCategory::CommentSingle => "c1",
            TokenCategory::CommentSpecial => "cs",
            TokenCategory::CommentPreproc => "cp",
            TokenCategory::CommentPreprocFile => "cpf",
            TokenCategory::GenericDeleted => "gd",
            TokenCategory::GenericEmph => "ge",
            TokenCategory::GenericInserted => "gi",
            TokenCategory::GenericStrong => "gs",
            TokenCategory::GenericSubheading => "gu",
        }
    }

    /// Grammar scope selectors that map onto this category, in the order the
    /// stylesheet tries them against a theme.
    pub fn selectors(self) -> &'static [&'static str] {
        match self {
            TokenCategory::Error => &["invalid"],
            TokenCategory::Keyword => &["keyword", "keyword.control", "storage.modifier"],
            TokenCategory::KeywordConstant => &["constant.language"],
            TokenCategory::KeywordDeclaration => &[
                "storage.type.function",
                "storage.type.class",
                "keyword.declaration",
            ],
            TokenCategory::KeywordNamespace => &[
                "keyword.control.import",
                "keyword.other.import",
                "keyword.other.use",
            ],
            TokenCategory::KeywordPseudo => &["variable.language"],
            TokenCategory::KeywordReserved => &["keyword.reserved", "keyword.other.reserved"],
            TokenCategory::KeywordType => &["storage.type", "support.type"],
            TokenCategory::NameAttribute => &["entity.other.attribute-name"],
            TokenCategory::NameClass => &[
                "entity.name.class",
                "entity.name.type",
                "entity.name.struct",
                "entity.name.enum",
                "entity.name.trait",
                "entity.other.inherited-class",
                "support.class",
            ],
            TokenCategory::NameConstant => &["constant.other", "variable.other.constant"],
            TokenCategory::NameDecorator => &[
                "entity.name.function.decorator",
                "storage.type.annotation",
            ],
            TokenCategory::NameException => &["support.class.exception", "entity.name.exception"],
            TokenCategory::NameFunction => &[
                "entity.name.function",
                "variable.function",
                "support.function",
            ],
            TokenCategory::NameOther => &["entity.name", "entity.other"],
            TokenCategory::NameTag => &["entity.name.tag"],
            TokenCategory::Literal => &["constant"],
            TokenCategory::LiteralDate => &["constant.other.date", "constant.other.time"],
            TokenCategory::LiteralString => &["string"],
            TokenCategory::LiteralStringAffix => &["storage.type.string"],
            TokenCategory::LiteralStringBacktick => &["string.quoted.backtick", "string.template"],
            TokenCategory::LiteralStringChar => &[
                "constant.character",
                "string.quoted.single.char",
            ],
            TokenCategory::LiteralStringDelimiter => &[
                "keyword.control.heredoc-token",
                "string.unquoted.heredoc.delimiter",
            ],
            TokenCategory::LiteralStringDoc => &[
                "string.quoted.docstring",
                "comment.block.documentation.python",
            ],
            TokenCategory::LiteralStringDouble => &["string.quoted.double"],
            TokenCategory::LiteralStringEscape => &["constant.character.escape"],
            TokenCategory::LiteralStringHeredoc => &[
                "string.unquoted.heredoc",
                "string.quoted.heredoc",
            ],
            TokenCategory::LiteralStringInterpol => &["meta.interpolation", "string.interpolated"],
            TokenCategory::LiteralStringOther => &["string.other", "string.unquoted"],
            TokenCategory::LiteralStringRegex => &["string.regexp"],
            TokenCategory::LiteralStringSingle => &["string.quoted.single"],
            TokenCategory::LiteralStringSymbol => &["constant.other.symbol"],
            TokenCategory::LiteralNumber => &["constant.numeric"],
            TokenCategory::LiteralNumberBin => &[
                "constant.numeric.binary",
                "constant.numeric.integer.binary",
            ],
            TokenCategory::LiteralNumberFloat => &["constant.numeric.float"],
            TokenCategory::LiteralNumberHex => &[
                "constant.numeric.hex",
                "constant.numeric.integer.hexadecimal",
            ],
            TokenCategory::LiteralNumberInteger => &[
                "constant.numeric.integer",
                "constant.numeric.decimal",
            ],
            TokenCategory::LiteralNumberIntegerLong => &["constant.numeric.integer.long"],
            TokenCategory::LiteralNumberOct => &[
                "constant.numeric.octal",
                "constant.numeric.integer.octal",
            ],
            TokenCategory::Operator => &["keyword.operator"],
            TokenCategory::OperatorWord => &["keyword.operator.word"],
            TokenCategory::Comment => &["comment"],
            TokenCategory::CommentHashbang => &["comment.line.shebang", "meta.shebang"],
            TokenCategory::CommentMultiline => &["comment.block"],
            TokenCategory::CommentSingle => &["comment.line"],
            TokenCategory::CommentSpecial => &["comment.special"],
            TokenCategory::CommentPreproc => &["meta.preprocessor", "keyword.directive"],
            TokenCategory::CommentPreprocFile => &[
                "string.quoted.other.lt-gt.include",
                "string.quoted.double.include",
            ],
            TokenCategory::GenericDeleted => &["markup.deleted"],
            TokenCategory::GenericEmph => &["markup.italic"],
            TokenCategory::GenericInserted => &["markup.inserted"],
            TokenCategory::GenericStrong => &["markup.bold"],
            TokenCategory::GenericSubheading => &["meta.diff.range", "meta.diff.header"],
        }
    }

    /// Broader category whose style applies when a theme has nothing more
    /// specific for this one.
    pub fn parent(self) -> Option<TokenCategory> {
        match self {
            TokenCategory::KeywordConstant
            | TokenCategory::KeywordDeclaration
            | TokenCategory::KeywordNamespace
            | TokenCategory::KeywordPseudo
            | TokenCategory::KeywordReserved
            | TokenCategory::KeywordType => Some(TokenCategory::Keyword),
            TokenCategory::LiteralDate
            | TokenCategory::LiteralString
            | TokenCategory::LiteralNumber => Some(TokenCategory::Literal),
            TokenCategory::LiteralStringAffix
            | TokenCategory::LiteralStringBacktick
            | TokenCategory::LiteralStringChar
            | TokenCategory::LiteralStringDelimiter
            | TokenCategory::LiteralStringDoc
            | TokenCategory::LiteralStringDouble
            | TokenCategory::LiteralStringEscape
            | TokenCategory::LiteralStringHeredoc
            | TokenCategory::LiteralStringInterpol
            | TokenCategory::LiteralStringOther
            | TokenCategory::LiteralStringRegex
            | TokenCategory::LiteralStringSingle
            | TokenCategory::LiteralStringSymbol => Some(TokenCategory::LiteralString),
            TokenCategory::LiteralNumberBin
            | TokenCategory::LiteralNumberFloat
            | TokenCategory::LiteralNumberHex
            | TokenCategory::LiteralNumberInteger
            | TokenCategory::LiteralNumberIntegerLong
            | TokenCategory::LiteralNumberOct => Some(TokenCategory::LiteralNumber),
            TokenCategory::OperatorWord => Some(TokenCategory::Operator),
            TokenCategory::CommentHashbang
            | TokenCategory::CommentMultiline
            | TokenCategory::CommentSingle
            | TokenCategory::CommentSpecial
            | TokenCategory::CommentPreproc => Some(TokenCategory::Comment),
            TokenCategory::CommentPreprocFile => Some(TokenCategory::CommentPreproc),
            TokenCategory::Error
            | TokenCategory::Keyword
            | TokenCategory::NameAttribute
            | TokenCategory::NameClass
            | TokenCategory::NameConstant
            | TokenCategory::NameDecorator
            | TokenCategory::NameException
            | TokenCategory::NameFunction
            | TokenCategory::NameOther
            | TokenCategory::NameTag
            | TokenCategory::Literal
            | TokenCategory::Operator
            | TokenCategory::Comment
            | TokenCategory::GenericDeleted
            | TokenCategory::GenericEmph
            | TokenCategory::GenericInserted
            | TokenCategory::GenericStrong
            | TokenCategory::GenericSubheading => None,
        }
    }

    pub(crate) fn scopes(self) -> impl Iterator<Item = Scope> {
        self.selectors()
            .iter()
            .filter_map(|selector| Scope::new(selector).ok())
    }
}

/// Maps grammar scope stacks onto [`TokenCategory`] values.
///
/// Scopes without a category (punctuation, `meta.*` wrappers) are looked
/// through, so delimiters and separators take the category of the construct
/// that encloses them.
pub(crate) struct Classifier {
    selectors: Vec<(Scope, TokenCategory)>,
}

static CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::new);

pub(crate) fn classifier() -> &'static Classifier {
    &CLASSIFIER
}

impl Classifier {
    fn new() -> Self {
        let selectors = TokenCategory::ALL
            .iter()
            .flat_map(|category| category.scopes().map(move |scope| (scope, *category)))
            .collect();

        Self { selectors }
    }

    /// Category of the innermost classifiable scope, or `None` for plain text.
    pub(crate) fn classify(&self, stack: &[Scope]) -> Option<TokenCategory> {
        stack
            .iter()
            .rev()
            .find_map(|scope| self.best_match(*scope))
    }

    fn best_match(&self, scope: Scope) -> Option<TokenCategory> {
        self.selectors
            .iter()
            .filter(|(selector, _)| selector.is_prefix_of(scope))
            .max_by_key(|(selector, _)| selector.len())
            .map(|(_, category)| *category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(scopes: &[&str]) -> Vec<Scope> {
        scopes
            .iter()
            .map(|scope| Scope::new(scope).expect("valid scope"))
            .collect()
    }

    #[test]
    fn most_specific_selector_wins() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify(&stack(&["source.rust", "keyword.operator.arithmetic.rust"])),
            Some(TokenCategory::Operator)
        );
        assert_eq!(
            classifier.classify(&stack(&["source.rust", "keyword.control.rust"])),
            Some(TokenCategory::Keyword)
        );
        assert_eq!(
            classifier.classify(&stack(&[
                "source.rust",
                "constant.numeric.integer.hexadecimal.rust"
            ])),
            Some(TokenCategory::LiteralNumberHex)
        );
        assert_eq!(
            classifier.classify(&stack(&["source.c", "constant.character.escape.c"])),
            Some(TokenCategory::LiteralStringEscape)
        );
    }

    #[test]
    fn delimiters_inherit_enclosing_category() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify(&stack(&[
                "source.rust",
                "string.quoted.double.rust",
                "punctuation.definition.string.begin.rust",
            ])),
            Some(TokenCategory::LiteralStringDouble)
        );
        assert_eq!(
            classifier.classify(&stack(&[
                "source.rust",
                "comment.line.double-slash.rust",
                "punctuation.definition.comment.rust",
            ])),
            Some(TokenCategory::CommentSingle)
        );
    }

    #[test]
    fn decimal_point_stays_inside_the_number() {
        assert_eq!(
            classifier().classify(&stack(&[
                "source.go",
                "constant.numeric.float.decimal.go",
                "punctuation.separator.decimal.go",
            ])),
            Some(TokenCategory::LiteralNumberFloat)
        );
    }

    #[test]
    fn bare_punctuation_is_plain() {
        assert_eq!(
            classifier().classify(&stack(&["source.rust", "punctuation.terminator.rust"])),
            None
        );
        assert_eq!(
            classifier().classify(&stack(&[
                "source.rust",
                "meta.block.rust",
                "punctuation.section.block.begin.rust",
            ])),
            None
        );
    }

    #[test]
    fn unmatched_scopes_are_plain() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify(&stack(&["source.rust", "meta.block.rust"])),
            None
        );
        assert_eq!(classifier.classify(&stack(&["text.plain"])), None);
        assert_eq!(classifier.classify(&[]), None);
    }

    #[test]
    fn classes_are_unique() {
        let mut classes: Vec<_> = TokenCategory::ALL.iter().map(|c| c.class()).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), TokenCategory::ALL.len());
    }

    #[test]
    fn every_selector_parses() {
        for category in TokenCategory::ALL {
            assert_eq!(
                category.scopes().count(),
                category.selectors().len(),
                "{}",
                category.name()
            );
        }
    }

    #[test]
    fn parents_precede_children() {
        for (index, category) in TokenCategory::ALL.iter().enumerate() {
            if let Some(parent) = category.parent() {
                let parent_index = TokenCategory::ALL
                    .iter()
                    .position(|candidate| *candidate == parent)
                    .expect("parent listed");
                assert!(parent_index < index, "{}", category.name());
            }
        }
    }
}
