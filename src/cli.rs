use std::path::PathBuf;

use clap::Parser;

use muncher::matcher::DEFAULT_RECURSION_LIMIT;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Text to match (default: read standard input)
    pub text: Option<String>,

    /// Start symbol
    #[arg(short, long, value_name = "SYMBOL", default_value = "START")]
    pub start: String,

    /// Spelling of the epsilon token
    #[arg(short, long, value_name = "TOKEN", default_value = "ε")]
    pub epsilon: String,

    /// Nested expansions allowed before a parse is abandoned
    #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_RECURSION_LIMIT)]
    pub depth_limit: usize,

    /// Log more (-v: warnings, -vv: info, -vvv: debug, -vvvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
