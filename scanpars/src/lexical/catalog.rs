//! Built-in token rules
//!
//! [`RuleBuilder`] assembles the catalog section by section. Whatever order
//! the sections are requested in, [`RuleBuilder::build`] lays them out as
//! custom rules, whitespace, strings, comments, numbers, words, operators.
//! That order is what makes first-match-wins produce the expected tokens:
//! `"""` must be tried before `"`, `(*` and complex literals before `(`,
//! prefixed and decimal numbers before plain integers, and signed numbers
//! before the bare `-` and `+` operators.

use super::pattern::{CharSet, Pattern};
use super::rules::{RuleTable, TokenRule};
use crate::tokens::TokenType;

/// Type labels assigned by the built-in catalog
pub mod kinds {
    use crate::tokens::TokenType;

    // Whitespace
    pub const LF: TokenType = TokenType::new_static("LF");
    pub const TAB: TokenType = TokenType::new_static("TAB");
    pub const TABED: TokenType = TokenType::new_static("TABED");
    pub const BLANK: TokenType = TokenType::new_static("BLANK");

    // Strings
    pub const QUOTED: TokenType = TokenType::new_static("QUOTED");
    pub const DBLQUOTED: TokenType = TokenType::new_static("DBLQUOTED");
    pub const TRIPLEQUOTED: TokenType = TokenType::new_static("TRIPLEQUOTED");

    // Comments
    pub const BLOCK_COMMENT: TokenType = TokenType::new_static("BLOCK_COMMENT");
    pub const BLOCK_ROUND_COMMENT: TokenType = TokenType::new_static("BLOCK_ROUND_COMMENT");
    pub const EOL_COMMENT_PY: TokenType = TokenType::new_static("EOL_COMMENT_PY");

    // Numbers
    pub const COMPLEX_NUM: TokenType = TokenType::new_static("COMPLEX_NUM");
    pub const HEXNUM: TokenType = TokenType::new_static("HEXNUM");
    pub const BINNUM: TokenType = TokenType::new_static("BINNUM");
    pub const OCTNUM: TokenType = TokenType::new_static("OCTNUM");
    pub const FLOAT: TokenType = TokenType::new_static("FLOAT");
    pub const INT: TokenType = TokenType::new_static("INT");
    pub const UINT: TokenType = TokenType::new_static("UINT");

    pub const WORD: TokenType = TokenType::new_static("WORD");

    // Operators and punctuation
    pub const MINUS: TokenType = TokenType::new_static("MINUS");
    pub const PLUS: TokenType = TokenType::new_static("PLUS");
    pub const LPAREN: TokenType = TokenType::new_static("LPAREN");
    pub const RPAREN: TokenType = TokenType::new_static("RPAREN");
    pub const LBRACKET: TokenType = TokenType::new_static("LBRACKET");
    pub const RBRACKET: TokenType = TokenType::new_static("RBRACKET");
    pub const LBRACE: TokenType = TokenType::new_static("LBRACE");
    pub const RBRACE: TokenType = TokenType::new_static("RBRACE");
    pub const COMMA: TokenType = TokenType::new_static("COMMA");
    pub const DOT: TokenType = TokenType::new_static("DOT");
    pub const COLON: TokenType = TokenType::new_static("COLON");
    pub const SEMICOLON: TokenType = TokenType::new_static("SEMICOLON");
    pub const EQUALS: TokenType = TokenType::new_static("EQUALS");
    pub const STAR: TokenType = TokenType::new_static("STAR");
    pub const SLASH: TokenType = TokenType::new_static("SLASH");
    pub const PERCENT: TokenType = TokenType::new_static("PERCENT");
    pub const LT: TokenType = TokenType::new_static("LT");
    pub const GT: TokenType = TokenType::new_static("GT");
    pub const BANG: TokenType = TokenType::new_static("BANG");
    pub const QUESTION: TokenType = TokenType::new_static("QUESTION");
    pub const AMP: TokenType = TokenType::new_static("AMP");
    pub const PIPE: TokenType = TokenType::new_static("PIPE");
    pub const CARET: TokenType = TokenType::new_static("CARET");
    pub const TILDE: TokenType = TokenType::new_static("TILDE");
    pub const AT: TokenType = TokenType::new_static("AT");
    pub const DOLLAR: TokenType = TokenType::new_static("DOLLAR");
    pub const BACKSLASH: TokenType = TokenType::new_static("BACKSLASH");
    pub const BACKTICK: TokenType = TokenType::new_static("BACKTICK");

    pub const WHITESPACE: &[TokenType] = &[LF, TAB, TABED, BLANK];
    pub const COMMENTS: &[TokenType] = &[BLOCK_COMMENT, BLOCK_ROUND_COMMENT, EOL_COMMENT_PY];
    pub const NUMBERS: &[TokenType] = &[COMPLEX_NUM, HEXNUM, BINNUM, OCTNUM, FLOAT, INT, UINT];
    pub const STRINGS: &[TokenType] = &[TRIPLEQUOTED, QUOTED, DBLQUOTED];
}

/// Single-character punctuation in catalog order
const PUNCTUATION: &[(char, TokenType)] = &[
    ('(', kinds::LPAREN),
    (')', kinds::RPAREN),
    ('[', kinds::LBRACKET),
    (']', kinds::RBRACKET),
    ('{', kinds::LBRACE),
    ('}', kinds::RBRACE),
    (',', kinds::COMMA),
    ('.', kinds::DOT),
    (':', kinds::COLON),
    (';', kinds::SEMICOLON),
    ('=', kinds::EQUALS),
    ('*', kinds::STAR),
    ('/', kinds::SLASH),
    ('%', kinds::PERCENT),
    ('<', kinds::LT),
    ('>', kinds::GT),
    ('!', kinds::BANG),
    ('?', kinds::QUESTION),
    ('&', kinds::AMP),
    ('|', kinds::PIPE),
    ('^', kinds::CARET),
    ('~', kinds::TILDE),
    ('@', kinds::AT),
    ('$', kinds::DOLLAR),
    ('\\', kinds::BACKSLASH),
    ('`', kinds::BACKTICK),
];

/// Assembles a [`RuleTable`] from catalog sections and custom rules
#[derive(Debug, Clone, Default)]
pub struct RuleBuilder {
    custom: Vec<TokenRule>,
    whitespace: bool,
    strings: bool,
    comments: bool,
    numbers: bool,
    words: bool,
    operators: bool,
}

impl RuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom rules take priority over every catalog section, in the order added
    pub fn add_rule(mut self, pattern: Pattern, kind: impl Into<TokenType>) -> Self {
        self.custom.push(TokenRule::new(pattern, kind.into()));
        self
    }

    pub fn add_whitespace(mut self) -> Self {
        self.whitespace = true;
        self
    }

    pub fn add_strings(mut self) -> Self {
        self.strings = true;
        self
    }

    pub fn add_comments(mut self) -> Self {
        self.comments = true;
        self
    }

    pub fn add_numbers(mut self) -> Self {
        self.numbers = true;
        self
    }

    pub fn add_words(mut self) -> Self {
        self.words = true;
        self
    }

    pub fn add_operators(mut self) -> Self {
        self.operators = true;
        self
    }

    pub fn add_all(self) -> Self {
        self.add_whitespace()
            .add_strings()
            .add_comments()
            .add_numbers()
            .add_words()
            .add_operators()
    }

    pub fn build(self) -> RuleTable {
        let mut table: RuleTable = self.custom.into_iter().collect();
        if self.whitespace {
            table.extend(whitespace_rules());
        }
        if self.strings {
            table.extend(string_rules());
        }
        if self.comments {
            table.extend(comment_rules());
        }
        if self.numbers {
            table.extend(number_rules());
        }
        if self.words {
            table.extend(word_rules());
        }
        if self.operators {
            table.extend(operator_rules());
        }
        table
    }
}

/// The complete built-in catalog
pub fn default_rule_table() -> RuleTable {
    RuleBuilder::new().add_all().build()
}

// ============================================================================
// SECTIONS
// ============================================================================

fn whitespace_rules() -> Vec<TokenRule> {
    vec![
        TokenRule::new(
            Pattern::alt(vec![
                Pattern::literal("\r\n"),
                Pattern::literal("\n"),
                Pattern::literal("\r"),
            ]),
            kinds::LF,
        ),
        TokenRule::new(Pattern::literal("\t"), kinds::TAB),
        TokenRule::new(Pattern::literal("    "), kinds::TABED),
        TokenRule::new(Pattern::literal(" "), kinds::BLANK),
    ]
}

fn string_rules() -> Vec<TokenRule> {
    vec![
        TokenRule::new(
            delimited(Pattern::literal(r#"""""#), Pattern::not_literal(r#"""""#)),
            kinds::TRIPLEQUOTED,
        ),
        TokenRule::new(quoted('\''), kinds::QUOTED),
        TokenRule::new(quoted('"'), kinds::DBLQUOTED),
    ]
}

fn comment_rules() -> Vec<TokenRule> {
    vec![
        TokenRule::new(block("/*", "*/"), kinds::BLOCK_COMMENT),
        TokenRule::new(block("(*", "*)"), kinds::BLOCK_ROUND_COMMENT),
        TokenRule::new(
            Pattern::seq(vec![
                Pattern::literal("#"),
                Pattern::zero_or_more(Pattern::not_in_set(CharSet::of("\r\n"))),
            ]),
            kinds::EOL_COMMENT_PY,
        ),
    ]
}

fn number_rules() -> Vec<TokenRule> {
    let complex = Pattern::seq(vec![
        Pattern::literal("("),
        Pattern::optional(sign()),
        real(),
        sign(),
        real(),
        Pattern::in_set(CharSet::of("jJ")),
        Pattern::literal(")"),
    ]);

    let fractional = Pattern::seq(vec![
        Pattern::optional(sign()),
        Pattern::alt(vec![
            Pattern::seq(vec![
                digits(),
                Pattern::literal("."),
                Pattern::zero_or_more(Pattern::in_set(CharSet::digits())),
            ]),
            Pattern::seq(vec![Pattern::literal("."), digits()]),
        ]),
        Pattern::optional(exponent()),
    ]);
    let scientific = Pattern::seq(vec![Pattern::optional(sign()), digits(), exponent()]);

    vec![
        TokenRule::new(complex, kinds::COMPLEX_NUM),
        TokenRule::new(
            prefixed('x', CharSet::digits().with_range('a', 'f').with_range('A', 'F')),
            kinds::HEXNUM,
        ),
        TokenRule::new(prefixed('b', CharSet::of("01")), kinds::BINNUM),
        // Octal lexemes take any decimal digit; decoding rejects 8 and 9
        TokenRule::new(prefixed('o', CharSet::digits()), kinds::OCTNUM),
        TokenRule::new(Pattern::alt(vec![fractional, scientific]), kinds::FLOAT),
        TokenRule::new(Pattern::seq(vec![sign(), digits()]), kinds::INT),
        TokenRule::new(digits(), kinds::UINT),
    ]
}

fn word_rules() -> Vec<TokenRule> {
    vec![TokenRule::new(
        Pattern::one_or_more(Pattern::in_set(CharSet::word())),
        kinds::WORD,
    )]
}

fn operator_rules() -> Vec<TokenRule> {
    let mut rules = vec![
        TokenRule::new(Pattern::literal("-"), kinds::MINUS),
        TokenRule::new(Pattern::literal("+"), kinds::PLUS),
    ];
    rules.extend(
        PUNCTUATION
            .iter()
            .map(|(ch, kind)| TokenRule::new(Pattern::literal(ch.to_string()), kind.clone())),
    );
    rules
}

// ============================================================================
// PATTERN HELPERS
// ============================================================================

fn digits() -> Pattern {
    Pattern::one_or_more(Pattern::in_set(CharSet::digits()))
}

fn sign() -> Pattern {
    Pattern::in_set(CharSet::of("+-"))
}

fn exponent() -> Pattern {
    Pattern::seq(vec![
        Pattern::in_set(CharSet::of("eE")),
        Pattern::optional(sign()),
        digits(),
    ])
}

/// `1`, `1.`, `1.5`, `.5`, each with an optional exponent
fn real() -> Pattern {
    Pattern::seq(vec![
        Pattern::alt(vec![
            Pattern::seq(vec![
                digits(),
                Pattern::optional(Pattern::seq(vec![
                    Pattern::literal("."),
                    Pattern::zero_or_more(Pattern::in_set(CharSet::digits())),
                ])),
            ]),
            Pattern::seq(vec![Pattern::literal("."), digits()]),
        ]),
        Pattern::optional(exponent()),
    ])
}

/// `0x`/`0X` style prefix followed by at least one character of `digits`
fn prefixed(marker: char, digits: CharSet) -> Pattern {
    let upper = marker.to_ascii_uppercase().to_string();
    Pattern::seq(vec![
        Pattern::literal("0"),
        Pattern::in_set(CharSet::of(&upper).with_chars(&marker.to_string())),
        Pattern::one_or_more(Pattern::in_set(digits)),
    ])
}

/// Quote, then escaped pairs or non-quote characters, then the closing quote
fn quoted(quote: char) -> Pattern {
    let mut stop = String::from('\\');
    stop.push(quote);
    delimited(
        Pattern::literal(quote.to_string()),
        Pattern::not_in_set(CharSet::of(&stop)),
    )
}

fn delimited(fence: Pattern, body: Pattern) -> Pattern {
    Pattern::seq(vec![
        fence.clone(),
        Pattern::zero_or_more(Pattern::alt(vec![
            Pattern::seq(vec![Pattern::literal("\\"), Pattern::any()]),
            body,
        ])),
        fence,
    ])
}

/// Multi-line comment ending at the nearest `close`
fn block(open: &str, close: &str) -> Pattern {
    Pattern::seq(vec![
        Pattern::literal(open),
        Pattern::zero_or_more(Pattern::not_literal(close)),
        Pattern::literal(close),
    ])
}
