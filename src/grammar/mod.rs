/*
    This module is for storing compiled grammars
*/

use std::collections::HashMap;

// The base unit in a grammar rule. Which variant a token becomes is decided
// once, at compile time: the epsilon spelling wins, then membership in the
// rule map, and anything else is a terminal.
#[derive(Debug, PartialEq)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
    Epsilon,
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule, in declaration order
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq)]
pub struct Grammar {
    pub start_symbol: String,
    pub epsilon_token: String,
    pub rules: HashMap<String, Rewrite>,
}
