/*
    This module matches input text against a compiled Grammar

    Matching is backtracking recursive descent: every alternative of a
    symbol is tried in declaration order, and of the alternatives that
    succeed, the one consuming the most input wins. There is no memoization,
    so ambiguous grammars can take exponential time, and grammars with
    indirect recursion cycles only stop at the recursion limit.
*/

use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::*;

// Nested nonterminal expansions allowed before a parse is abandoned
pub const DEFAULT_RECURSION_LIMIT: usize = 256;

#[derive(Debug, PartialEq)]
pub enum MatchError {
    RecursionLimitExceeded(String),
}

impl Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::RecursionLimitExceeded(symbol) => write!(f, "Recursion limit exceeded while expanding `{}`", symbol),
        }
    }
}

// A child of a parse tree node: matched literal text or a subtree
#[derive(Debug, PartialEq)]
pub enum Node {
    Leaf(String),
    Tree(ParseTree),
}

#[derive(Debug, PartialEq)]
pub struct ParseTree {
    pub symbol: String,
    pub children: Vec<Node>,
}

#[derive(Debug, PartialEq)]
pub struct Match {
    pub remainder: String,
    pub tree: ParseTree,
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.symbol, self.children.iter().format(", "))
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Leaf(text) => write!(f, "{:?}", text),
            Node::Tree(tree) => write!(f, "{}", tree),
        }
    }
}

impl Grammar {
    // Matches text from the start symbol. Ok(None) means the grammar simply
    // does not match; Err is reserved for hitting the recursion limit.
    pub fn parse(&self, text: &str) -> Result<Option<Match>, MatchError> {
        self.parse_with_limit(text, DEFAULT_RECURSION_LIMIT)
    }

    pub fn parse_with_limit(&self, text: &str, depth_limit: usize) -> Result<Option<Match>, MatchError> {
        let consumed = consume(self, text, &self.start_symbol, depth_limit)?;

        Ok(consumed.map(|(remainder, tree)| Match {
            remainder: remainder.to_string(),
            tree,
        }))
    }
}

// Matches one symbol against the text, returning the unconsumed suffix and
// the tree of the best candidate
fn consume<'a>(grammar: &Grammar, text: &'a str, symbol: &str, depth: usize) -> Result<Option<(&'a str, ParseTree)>, MatchError> {
    if depth == 0 {
        return Err(MatchError::RecursionLimitExceeded(symbol.to_string()));
    }

    // Only the start symbol can miss: every nonterminal token was checked
    // against the rule map when the grammar was compiled
    let Some(rewrite) = grammar.rules.get(symbol) else {
        return Ok(None);
    };

    // Surrounding whitespace is dropped once per symbol, never between the
    // tokens of an alternative
    let trimmed = text.trim();
    log::trace!("matching `{}` against {:?}", symbol, trimmed);

    let mut candidates = Vec::new();
    for alternative in rewrite {
        if let Some((remainder, children)) = consume_alternative(grammar, alternative, trimmed, depth)? {
            candidates.push((remainder, children));
        }
    }

    // Longest match wins; the first declared alternative breaks ties
    let best = candidates.iter().position_min_by_key(|(remainder, _)| remainder.len());

    Ok(best.map(|index| {
        let (remainder, children) = candidates.swap_remove(index);
        (remainder, ParseTree { symbol: symbol.to_string(), children })
    }))
}

// Consumes the tokens of a single alternative in order. The whole
// alternative fails on the first token that does not match; a nonterminal
// sub-match is committed once made, so no backtracking happens within an
// alternative.
fn consume_alternative<'a>(grammar: &Grammar, alternative: &Alternative, text: &'a str, depth: usize) -> Result<Option<(&'a str, Vec<Node>)>, MatchError> {
    let mut remainder = text;
    let mut children = Vec::new();

    for part in alternative {
        match part {
            Symbol::Epsilon => children.push(Node::Leaf(grammar.epsilon_token.clone())),
            Symbol::Nonterminal(symbol) => match consume(grammar, remainder, symbol, depth - 1)? {
                Some((rest, tree)) => {
                    remainder = rest;
                    children.push(Node::Tree(tree));
                }
                None => return Ok(None),
            },
            Symbol::Terminal(literal) => match remainder.strip_prefix(literal.as_str()) {
                Some(rest) => {
                    remainder = rest;
                    children.push(Node::Leaf(literal.clone()));
                }
                None => return Ok(None),
            },
        }
    }

    return Ok(Some((remainder, children)));
}
