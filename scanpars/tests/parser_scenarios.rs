//! Productions over lexed input, checked through the flattened tree

use assert_matches::assert_matches;
use scanpars::lexical::{kinds, sanitizer, tokenize};
use scanpars::syntax::{Element, GrammarError, Parser, SyntaxError};
use scanpars::GrammarRule;

fn parser_for(text: &str) -> Parser {
    let mut parser = Parser::new();
    parser.set_input(sanitizer::whitespace(tokenize(text).unwrap(), &[]));
    parser
}

/// `number` as an ordered choice of the ten digit lexemes
fn digit_choice() -> GrammarRule {
    GrammarRule::or((0..10).map(|d| GrammarRule::terminal(d.to_string())).collect())
}

fn flat(root: &Element) -> Vec<String> {
    root.flatten().iter().map(ToString::to_string).collect()
}

fn token(lexeme: &str, kind: &str) -> String {
    format!("({:?}, {})", lexeme, kind)
}

#[test]
fn single_number() {
    let mut parser = parser_for("1");
    parser.production("number", digit_choice()).unwrap();
    let root = parser.run().unwrap();
    assert_eq!(flat(&root), vec!["---root---".to_string(), "number".into(), token("1", "UINT")]);
}

#[test]
fn unparsable_suffix_is_no_solution() {
    let mut parser = parser_for("1a");
    parser.production("number", digit_choice()).unwrap();
    assert_matches!(parser.run(), Err(SyntaxError::NoSolution { position: 1, .. }));
}

#[test]
fn many_numbers() {
    let mut parser = parser_for("1 2 3 4");
    parser.production("number", digit_choice()).unwrap();
    let root = parser.run().unwrap();
    assert_eq!(root.tail.len(), 4);
    assert!(root.children().all(|e| e.head == "number"));
}

#[test]
fn words_and_numbers() {
    let mut parser = parser_for("this is 1 first test 2 3 4");
    parser.production("number", digit_choice()).unwrap();
    parser
        .production("words", GrammarRule::repeat(GrammarRule::terminal_type(kinds::WORD)))
        .unwrap();

    let root = parser.run().unwrap();
    assert_eq!(
        flat(&root),
        vec![
            "---root---".to_string(),
            "words".into(),
            token("this", "WORD"),
            token("is", "WORD"),
            "number".into(),
            token("1", "UINT"),
            "words".into(),
            token("first", "WORD"),
            token("test", "WORD"),
            "number".into(),
            token("2", "UINT"),
            "number".into(),
            token("3", "UINT"),
            "number".into(),
            token("4", "UINT"),
        ]
    );
}

#[test]
fn repeat_of_a_call_is_wrapped_and_ties_prefer_earlier_productions() {
    let mut parser = parser_for("this is 1 first test 2 3 4 only three words");
    let number = parser.production("number", digit_choice()).unwrap();
    let words = parser
        .production("words", GrammarRule::repeat(GrammarRule::terminal_type(kinds::WORD)))
        .unwrap();
    parser
        .production(
            "words_numbers",
            GrammarRule::and(vec![parser.call(&words), GrammarRule::repeat(&number)]),
        )
        .unwrap();

    let root = parser.run().unwrap();
    assert_eq!(
        flat(&root),
        vec![
            "---root---".to_string(),
            "words_numbers".into(),
            "words".into(),
            token("this", "WORD"),
            token("is", "WORD"),
            "*number".into(),
            "number".into(),
            token("1", "UINT"),
            "words_numbers".into(),
            "words".into(),
            token("first", "WORD"),
            token("test", "WORD"),
            "*number".into(),
            "number".into(),
            token("2", "UINT"),
            "number".into(),
            token("3", "UINT"),
            "number".into(),
            token("4", "UINT"),
            "words".into(),
            token("only", "WORD"),
            token("three", "WORD"),
            token("words", "WORD"),
        ]
    );
}

#[test]
fn optional_minus_before_number() {
    let mut parser = parser_for("1 - 2 3 4");
    let minus = parser
        .production("minus", GrammarRule::terminal_type(kinds::MINUS))
        .unwrap();
    let number = parser.production("number", digit_choice()).unwrap();
    parser
        .production(
            "opt_minus_number",
            GrammarRule::and(vec![GrammarRule::optional(&minus), parser.call(&number)]),
        )
        .unwrap();

    let root = parser.run().unwrap();
    assert_eq!(
        flat(&root),
        vec![
            "---root---".to_string(),
            "number".into(),
            token("1", "UINT"),
            "opt_minus_number".into(),
            "minus".into(),
            token("-", "MINUS"),
            "number".into(),
            token("2", "UINT"),
            "number".into(),
            token("3", "UINT"),
            "number".into(),
            token("4", "UINT"),
        ]
    );
}

#[test]
fn optional_sign_choice_before_number() {
    let mut parser = parser_for("1 - 2 3 + 4 5");
    let minus = parser
        .production("minus", GrammarRule::terminal_type(kinds::MINUS))
        .unwrap();
    let plus = parser
        .production("plus", GrammarRule::terminal_type(kinds::PLUS))
        .unwrap();
    let number = parser.production("number", digit_choice()).unwrap();
    parser
        .production(
            "opt_minus_plus_number",
            GrammarRule::and(vec![
                GrammarRule::optional(GrammarRule::or(vec![parser.call(&minus), parser.call(&plus)])),
                parser.call(&number),
            ]),
        )
        .unwrap();

    let heads: Vec<String> = parser
        .run()
        .unwrap()
        .children()
        .map(|e| e.head.clone())
        .collect();
    assert_eq!(
        heads,
        vec!["number", "opt_minus_plus_number", "number", "opt_minus_plus_number", "number"]
    );
}

#[test]
fn named_repeat_of_signs() {
    let mut parser = parser_for("1 - 2 3 + - 4 5");
    let minus = parser
        .production("minus", GrammarRule::terminal_type(kinds::MINUS))
        .unwrap();
    let plus = parser
        .production("plus", GrammarRule::terminal_type(kinds::PLUS))
        .unwrap();
    let number = parser.production("number", digit_choice()).unwrap();
    parser
        .production(
            "opt_repeat_minus_plus_number",
            GrammarRule::and(vec![
                GrammarRule::optional(GrammarRule::repeat_named(
                    GrammarRule::or(vec![parser.call(&minus), parser.call(&plus)]),
                    "opt_sign",
                )),
                parser.call(&number),
            ]),
        )
        .unwrap();

    let root = parser.run().unwrap();
    assert_eq!(
        flat(&root),
        vec![
            "---root---".to_string(),
            "number".into(),
            token("1", "UINT"),
            "opt_repeat_minus_plus_number".into(),
            "*opt_sign".into(),
            "minus".into(),
            token("-", "MINUS"),
            "number".into(),
            token("2", "UINT"),
            "number".into(),
            token("3", "UINT"),
            "opt_repeat_minus_plus_number".into(),
            "*opt_sign".into(),
            "plus".into(),
            token("+", "PLUS"),
            "minus".into(),
            token("-", "MINUS"),
            "number".into(),
            token("4", "UINT"),
            "number".into(),
            token("5", "UINT"),
        ]
    );
}

#[test]
fn recursive_production() {
    // list = '[' (item (',' item)*)? ']' ; item = UINT | list
    let mut parser = parser_for("[1, [2, 3], []]");
    parser
        .production(
            "list",
            GrammarRule::and(vec![
                GrammarRule::terminal("["),
                GrammarRule::optional(GrammarRule::and(vec![
                    GrammarRule::call("item"),
                    GrammarRule::repeat_named(
                        GrammarRule::and(vec![GrammarRule::terminal(","), GrammarRule::call("item")]),
                        "more",
                    ),
                ])),
                GrammarRule::terminal("]"),
            ]),
        )
        .unwrap();
    parser
        .production(
            "item",
            GrammarRule::or(vec![
                GrammarRule::terminal_type(kinds::UINT),
                GrammarRule::call("list"),
            ]),
        )
        .unwrap();

    let root = parser.run().unwrap();
    assert_eq!(root.tail.len(), 1);
    assert_eq!(root.tokens().len(), 12);
    assert_eq!(
        flat(&root),
        vec![
            "---root---".to_string(),
            "list".into(),
            token("[", "LBRACKET"),
            "item".into(),
            token("1", "UINT"),
            "*more".into(),
            token(",", "COMMA"),
            "item".into(),
            "list".into(),
            token("[", "LBRACKET"),
            "item".into(),
            token("2", "UINT"),
            "*more".into(),
            token(",", "COMMA"),
            "item".into(),
            token("3", "UINT"),
            token("]", "RBRACKET"),
            token(",", "COMMA"),
            "item".into(),
            "list".into(),
            token("[", "LBRACKET"),
            token("]", "RBRACKET"),
            token("]", "RBRACKET"),
        ]
    );
}

#[test]
fn not_guards_a_terminal() {
    // a word that is not the keyword `end`
    let mut parser = parser_for("alpha beta end");
    parser
        .production(
            "name",
            GrammarRule::and(vec![
                GrammarRule::not(GrammarRule::terminal("end")),
                GrammarRule::terminal_type(kinds::WORD),
            ]),
        )
        .unwrap();
    parser.production("end", GrammarRule::terminal("end")).unwrap();

    let heads: Vec<String> = parser.run().unwrap().children().map(|e| e.head.clone()).collect();
    assert_eq!(heads, vec!["name", "name", "end"]);
}

#[test]
fn nullable_repeat_is_rejected_before_matching() {
    let mut parser = parser_for("1");
    parser
        .production("maybe", GrammarRule::optional(GrammarRule::terminal("1")))
        .unwrap();
    parser
        .production("many", GrammarRule::repeat(GrammarRule::call("maybe")))
        .unwrap();
    assert_matches!(
        parser.run(),
        Err(SyntaxError::Grammar(GrammarError::NullableRepeat { production })) if production == "many"
    );
}

#[test]
fn left_recursion_is_bounded() {
    let mut parser = parser_for("1 + 2");
    parser
        .production(
            "sum",
            GrammarRule::or(vec![
                GrammarRule::and(vec![
                    GrammarRule::call("sum"),
                    GrammarRule::terminal("+"),
                    GrammarRule::terminal_type(kinds::UINT),
                ]),
                GrammarRule::terminal_type(kinds::UINT),
            ]),
        )
        .unwrap();
    assert_matches!(parser.run(), Err(SyntaxError::MaxRecursionDepth { .. }));
}

#[test]
fn parse_twice_gives_same_tree() {
    let mut parser = parser_for("1 - 2");
    let minus = parser
        .production("minus", GrammarRule::terminal_type(kinds::MINUS))
        .unwrap();
    let number = parser.production("number", digit_choice()).unwrap();
    parser
        .production(
            "opt_minus_number",
            GrammarRule::and(vec![GrammarRule::optional(&minus), parser.call(&number)]),
        )
        .unwrap();
    assert_eq!(parser.run().unwrap(), parser.run().unwrap());
}
