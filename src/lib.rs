/*
    Muncher compiles BNF-style grammars and matches text against them

    A grammar is compiled once with compiler::compile and is immutable from
    then on, so it can be shared freely; every Grammar::parse call keeps its
    matching state on its own stack.
*/

pub mod compiler;
pub mod error_handling;
pub mod grammar;
pub mod matcher;
