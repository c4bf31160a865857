//! Parse trees
//!
//! An [`Element`] is a production name (or a `*name` repeat wrapper) with an
//! ordered tail of child elements and raw tokens. [`Element::flatten`] walks
//! it depth-first, pre-order, which is also how it is displayed.

use crate::tokens::Token;
use serde::Serialize;
use std::fmt;

/// Head of the element returned by a parser run
pub const ROOT_LABEL: &str = "---root---";

/// Prefix marking a repeat wrapper's head
pub const REPEAT_PREFIX: char = '*';

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Token(Token),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Node::Token(token) => Some(token),
            Node::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Token(token)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub head: String,
    pub tail: Vec<Node>,
}

/// One entry of a flattened tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flat<'a> {
    Head(&'a str),
    Token(&'a Token),
}

impl fmt::Display for Flat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flat::Head(head) => f.write_str(head),
            Flat::Token(token) => write!(f, "{}", token),
        }
    }
}

impl Element {
    pub fn new(head: impl Into<String>, tail: Vec<Node>) -> Self {
        Self {
            head: head.into(),
            tail,
        }
    }

    pub fn root(tail: Vec<Node>) -> Self {
        Self::new(ROOT_LABEL, tail)
    }

    pub fn is_root(&self) -> bool {
        self.head == ROOT_LABEL
    }

    pub fn is_repeat(&self) -> bool {
        self.head.starts_with(REPEAT_PREFIX)
    }

    /// Child elements, skipping raw tokens
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.tail.iter().filter_map(Node::as_element)
    }

    /// Every token under this element, in source order
    pub fn tokens(&self) -> Vec<&Token> {
        self.flatten()
            .into_iter()
            .filter_map(|item| match item {
                Flat::Token(token) => Some(token),
                Flat::Head(_) => None,
            })
            .collect()
    }

    /// First descendant (or self) with the given head, depth-first
    pub fn find(&self, head: &str) -> Option<&Element> {
        if self.head == head {
            return Some(self);
        }
        self.children().find_map(|child| child.find(head))
    }

    /// Head followed by the flattened children, depth-first, pre-order
    pub fn flatten(&self) -> Vec<Flat<'_>> {
        let mut out = Vec::new();
        let mut stack = vec![Walk::Element(self)];
        while let Some(entry) = stack.pop() {
            match entry {
                Walk::Element(element) => {
                    out.push(Flat::Head(&element.head));
                    stack.extend(element.tail.iter().rev().map(Walk::from));
                }
                Walk::Token(token) => out.push(Flat::Token(token)),
            }
        }
        out
    }
}

/// Explicit stack entry so deep trees flatten without recursion
enum Walk<'a> {
    Element(&'a Element),
    Token(&'a Token),
}

impl<'a> From<&'a Node> for Walk<'a> {
    fn from(node: &'a Node) -> Self {
        match node {
            Node::Element(element) => Walk::Element(element),
            Node::Token(token) => Walk::Token(token),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.flatten().iter().map(ToString::to_string).collect();
        write!(f, "{}", items.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::kinds;

    fn number(lexeme: &str) -> Node {
        Element::new("number", vec![Token::bare(lexeme, kinds::UINT).into()]).into()
    }

    #[test]
    fn test_flatten_is_preorder() {
        let tree = Element::root(vec![
            number("1"),
            Element::new("*number", vec![number("2"), number("3")]).into(),
        ]);
        let rendered: Vec<String> = tree.flatten().iter().map(|f| f.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "---root---",
                "number",
                "(\"1\", UINT)",
                "*number",
                "number",
                "(\"2\", UINT)",
                "number",
                "(\"3\", UINT)",
            ]
        );
        assert_eq!(tree.to_string(), rendered.join(", "));
    }

    #[test]
    fn test_queries() {
        let tree = Element::root(vec![Element::new("*number", vec![number("7")]).into()]);
        assert!(tree.is_root());
        assert!(tree.find("*number").map_or(false, Element::is_repeat));
        assert_eq!(tree.find("number").map(|e| e.tail.len()), Some(1));
        assert!(tree.find("missing").is_none());
        assert_eq!(tree.tokens().len(), 1);
        assert_eq!(tree.children().count(), 1);
    }

    #[test]
    fn test_serializes_heads_and_tokens() {
        let tree = Element::root(vec![number("1")]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["head"], "---root---");
        assert_eq!(json["tail"][0]["head"], "number");
        assert_eq!(json["tail"][0]["tail"][0]["lexeme"], "1");
        assert_eq!(json["tail"][0]["tail"][0]["type"], "UINT");
    }
}
