/*
    This module compiles grammar notation into a Grammar

    The notation is line oriented: `SYMBOL -> TOK TOK | TOK`, with one
    declaration per line. Declaring the same symbol twice appends its
    alternatives. Lines without an arrow, or with nothing after the arrow,
    are skipped.
*/

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug, PartialEq)]
pub enum CompileErrorType {
    // An alternative rewrites a symbol to itself in leading position
    LeftRecursion(String),
}

impl ErrorType for CompileErrorType {}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::LeftRecursion(symbol) => write!(f, "Left recursion detected in the rules for `{}`", symbol),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileResult = Result<Grammar, CompileError>;

#[derive(Debug, PartialEq, Clone)]
pub struct CompileOptions {
    pub start_symbol: String,
    pub epsilon_token: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            start_symbol: "START".to_string(),
            epsilon_token: "ε".to_string(),
        }
    }
}

// One declaration line, before terminals and nonterminals are told apart
struct RawRule<'a> {
    symbol: &'a str,
    alternatives: Vec<Vec<&'a str>>,
}

// Splits a line into its declared symbol and the text of its alternatives.
// Everything after the first arrow belongs to the alternatives.
fn split_declaration(line: &str) -> Option<(&str, &str)> {
    let (symbol, rhs) = line.split_once("->")?;
    let (symbol, rhs) = (symbol.trim(), rhs.trim());

    if rhs.is_empty() {
        return None;
    }
    Some((symbol, rhs))
}

fn split_alternatives(rhs: &str) -> Vec<Vec<&str>> {
    rhs.split('|')
        .map(|alternative| alternative.split_whitespace().collect())
        .collect()
}

// Collects the raw rules of every declaration line, rejecting the whole
// grammar as soon as one alternative starts with its own symbol
fn scan_rules(grammar_text: &str) -> Result<Vec<RawRule>, CompileError> {
    let mut rules = Vec::new();

    for (num, line) in grammar_text.lines().enumerate() {
        let Some((symbol, rhs)) = split_declaration(line) else {
            continue;
        };

        let alternatives = split_alternatives(rhs);
        if alternatives.iter().any(|alternative| alternative.first() == Some(&symbol)) {
            return Err(CompileError {
                location: Location { line: num + 1 },
                error: CompileErrorType::LeftRecursion(symbol.to_string()),
            });
        }

        rules.push(RawRule { symbol, alternatives });
    }

    return Ok(rules);
}

// The epsilon spelling outranks a declared rule of the same name
fn classify(token: &str, declared: &HashSet<&str>, epsilon_token: &str) -> Symbol {
    if token == epsilon_token {
        Symbol::Epsilon
    } else if declared.contains(token) {
        Symbol::Nonterminal(token.to_string())
    } else {
        Symbol::Terminal(token.to_string())
    }
}

pub fn compile(grammar_text: &str, options: CompileOptions) -> CompileResult {
    let raw_rules = scan_rules(grammar_text)?;

    // Classification resolves against every declared symbol, so a rule
    // declared further down the text still counts as a nonterminal here
    let declared: HashSet<&str> = raw_rules.iter().map(|rule| rule.symbol).collect();

    let mut rules: HashMap<String, Rewrite> = HashMap::new();
    for raw in &raw_rules {
        let rewrite = rules.entry(raw.symbol.to_string()).or_default();
        for alternative in &raw.alternatives {
            rewrite.push(
                alternative.iter()
                    .map(|token| classify(token, &declared, &options.epsilon_token))
                    .collect(),
            );
        }
    }

    log::debug!("compiled {} symbols from {} declarations", rules.len(), raw_rules.len());

    return Ok(Grammar {
        start_symbol: options.start_symbol,
        epsilon_token: options.epsilon_token,
        rules,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    fn options(start_symbol: &str, epsilon_token: &str) -> CompileOptions {
        CompileOptions {
            start_symbol: start_symbol.to_string(),
            epsilon_token: epsilon_token.to_string(),
        }
    }

    #[test]
    fn compile_expression_grammar() {
        let grammar = compile(
            "START -> EXPR\nEXPR -> NUM | NUM OP EXPR\nNUM -> 0 | 1 | 2 | 3 | 4\nOP -> + | - | * | /",
            CompileOptions::default(),
        ).unwrap();

        assert_eq!(grammar.start_symbol, "START");
        assert_eq!(grammar.epsilon_token, "ε");

        let mut rules = HashMap::new();
        rules.insert("START".to_string(), vec![vec![s_nonterminal("EXPR")]]);
        rules.insert("EXPR".to_string(), vec![
            vec![s_nonterminal("NUM")],
            vec![s_nonterminal("NUM"), s_nonterminal("OP"), s_nonterminal("EXPR")],
        ]);
        rules.insert("NUM".to_string(), (0..5).map(|n| vec![s_terminal(&n.to_string())]).collect());
        rules.insert("OP".to_string(), ["+", "-", "*", "/"].into_iter().map(|op| vec![s_terminal(op)]).collect());

        assert_eq!(grammar.rules, rules);
    }

    #[test]
    fn classify_epsilon_and_phantom_tokens() {
        let grammar = compile(
            "START -> PARTS\nPARTS -> PART PARTS | ε\nPART -> A | B C | D",
            CompileOptions::default(),
        ).unwrap();

        assert_eq!(grammar.rules["PARTS"], vec![
            vec![s_nonterminal("PART"), s_nonterminal("PARTS")],
            vec![Symbol::Epsilon],
        ]);
        // A, B, C and D are never declared, so they are plain terminals
        assert_eq!(grammar.rules["PART"], vec![
            vec![s_terminal("A")],
            vec![s_terminal("B"), s_terminal("C")],
            vec![s_terminal("D")],
        ]);
    }

    #[test]
    fn merge_repeated_declarations() {
        let split = compile("NUM -> 0 | 1\nNUM -> 2", CompileOptions::default()).unwrap();
        let joined = compile("NUM -> 0 | 1 | 2", CompileOptions::default()).unwrap();

        assert_eq!(split.rules, joined.rules);
        assert_eq!(split.rules["NUM"], vec![
            vec![s_terminal("0")],
            vec![s_terminal("1")],
            vec![s_terminal("2")],
        ]);
    }

    #[test]
    fn skip_lines_without_a_declaration() {
        let grammar = compile(
            "; a comment line\n\nSTART -> A\nnot a rule at all\nEMPTY ->\n",
            CompileOptions::default(),
        ).unwrap();

        assert_eq!(grammar.rules.len(), 1);
        // EMPTY never made it into the rules, so A stays a terminal
        assert_eq!(grammar.rules["START"], vec![vec![s_terminal("A")]]);
    }

    #[test]
    fn reject_left_recursion() {
        let error = compile(
            "START -> ITEMS\nITEMS -> ITEM | ITEMS ITEM\nITEM -> 'X",
            CompileOptions::default(),
        ).unwrap_err();

        assert_eq!(error, CompileError {
            location: Location { line: 2 },
            error: CompileErrorType::LeftRecursion("ITEMS".to_string()),
        });
    }

    #[test]
    fn reject_left_recursion_across_declarations() {
        // The valid first declaration does not save the symbol
        let error = compile("X -> a\nX -> X b", options("X", "ε")).unwrap_err();

        assert_eq!(error, CompileError {
            location: Location { line: 2 },
            error: CompileErrorType::LeftRecursion("X".to_string()),
        });
    }

    #[test]
    fn forward_references_are_nonterminals() {
        let grammar = compile("START -> LAST\nLAST -> x", CompileOptions::default()).unwrap();

        assert_eq!(grammar.rules["START"], vec![vec![s_nonterminal("LAST")]]);
    }
}
