//! CSS front end
//!
//! Parses stylesheets with tree-sitter-css and exposes them as an owned tree of
//! rules, at-rules and declarations.

pub mod constants;
pub mod parser;
pub mod stylesheet;
pub mod tree_reader;
