//! CSS Parser using tree-sitter-css
//!
//! Wraps the tree-sitter parser and turns its syntax tree into the owned
//! [`Stylesheet`] model the extractor works on.

use log::debug;
use tree_sitter::{Parser, Tree};

use crate::css::stylesheet::Stylesheet;
use crate::css::tree_reader::read_stylesheet;
use crate::error::{ExtractError, ExtractResult};

/// CSS parser wrapper around tree-sitter-css
pub struct CssParser {
    parser: Parser,
}

impl CssParser {
    /// Create a new CSS parser
    pub fn new() -> ExtractResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_css::LANGUAGE.into())
            .map_err(|e| ExtractError::TreeSitterLanguage {
                message: e.to_string(),
            })?;

        Ok(Self { parser })
    }

    /// Parse CSS content and return the raw syntax tree
    pub fn parse_tree(&mut self, content: &str, old_tree: Option<&Tree>) -> Option<Tree> {
        self.parser.parse(content, old_tree)
    }

    /// Parse CSS content into a stylesheet
    pub fn parse(&mut self, content: &str) -> ExtractResult<Stylesheet> {
        let tree = self.parse_tree(content, None).ok_or_else(|| ExtractError::Parse {
            message: "tree-sitter returned no syntax tree".to_string(),
        })?;
        Ok(read_stylesheet(tree.root_node(), content))
    }

    /// Parse several sources into one stylesheet, keeping their order
    pub fn parse_all(&mut self, sources: &[&str]) -> ExtractResult<Stylesheet> {
        let mut stylesheet = Stylesheet::new();
        for (index, source) in sources.iter().enumerate() {
            debug!("Parsing source {} of {}", index + 1, sources.len());
            stylesheet.append(self.parse(source)?);
        }
        Ok(stylesheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_creation() {
        let parser = CssParser::new();
        assert!(parser.is_ok());
    }

    #[test]
    fn test_basic_parsing() {
        let mut parser = CssParser::new().unwrap();
        let content = ".my-class { color: red; }";
        let tree = parser.parse_tree(content, None).unwrap();
        let root = tree.root_node();
        assert!(!root.has_error());
        assert_eq!(root.kind(), "stylesheet");

        let rule = root.child(0).unwrap();
        assert_eq!(rule.kind(), "rule_set");
    }

    #[test]
    fn test_parse_all_merges_in_order() {
        let mut parser = CssParser::new().unwrap();
        let sheet = parser.parse_all(&["a { color: red; }", "b { color: blue; }"]).unwrap();
        let selectors: Vec<&str> = sheet.rules().iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec!["a", "b"]);
    }
}
