//! Conversion from tree-sitter-css syntax trees to the stylesheet model
//!
//! The grammar has a dedicated node kind for most at-rules (`media_statement`,
//! `keyframes_statement`, ...) and a generic `at_rule` for the rest. All of them
//! are read the same way: the first child is the `@keyword`, an optional body
//! (`block` or `keyframe_block_list`) comes last, and everything in between is
//! the prelude. Keyframe blocks become rules whose selector is their offset.

use log::{debug, warn};
use tree_sitter::Node;

use crate::css::constants::*;
use crate::css::stylesheet::{AtRule, Declaration, Rule, SourcePosition, StyleNode, Stylesheet};

/// Build a stylesheet from the root node of a tree-sitter-css tree
pub fn read_stylesheet(root: Node, content: &str) -> Stylesheet {
    if root.has_error() {
        warn!("Stylesheet contains syntax errors, erroneous nodes are skipped");
    }

    Stylesheet {
        nodes: read_items(root, content),
    }
}

/// Read the child items of a stylesheet, block or keyframe list
fn read_items(parent: Node, content: &str) -> Vec<StyleNode> {
    let mut nodes = Vec::new();
    let mut cursor = parent.walk();
    for child in parent.children(&mut cursor) {
        if let Some(node) = read_item(child, content) {
            nodes.push(node);
        }
    }
    nodes
}

fn read_item(node: Node, content: &str) -> Option<StyleNode> {
    match node.kind() {
        NODE_DECLARATION => read_declaration(node, content).map(StyleNode::Declaration),
        NODE_RULE_SET => Some(StyleNode::Rule(read_rule_set(node, content))),
        NODE_KEYFRAME_BLOCK => Some(StyleNode::Rule(read_keyframe_block(node, content))),
        NODE_MEDIA_STATEMENT
        | NODE_SUPPORTS_STATEMENT
        | NODE_KEYFRAMES_STATEMENT
        | NODE_SCOPE_STATEMENT
        | NODE_IMPORT_STATEMENT
        | NODE_CHARSET_STATEMENT
        | NODE_NAMESPACE_STATEMENT
        | NODE_POSTCSS_STATEMENT
        | NODE_AT_RULE => Some(StyleNode::AtRule(read_at_rule(node, content))),
        NODE_ERROR => {
            let position = node_position(node);
            warn!(
                "Skipping unparsable CSS at {}: '{}'",
                position,
                node_text(node, content).trim()
            );
            None
        }
        // Braces, semicolons and comments
        _ => None,
    }
}

fn read_rule_set(node: Node, content: &str) -> Rule {
    let selector = find_child(node, NODE_SELECTORS)
        .map(|selectors| node_text(selectors, content).trim().to_string())
        .unwrap_or_default();
    let nodes = find_child(node, NODE_BLOCK)
        .map(|block| read_items(block, content))
        .unwrap_or_default();

    Rule {
        selector,
        nodes,
        position: node_position(node),
    }
}

fn read_keyframe_block(node: Node, content: &str) -> Rule {
    // The offset (`from`, `to` or a percentage) is the first named child
    let selector = node
        .named_child(0)
        .filter(|offset| offset.kind() != NODE_BLOCK)
        .map(|offset| node_text(offset, content).trim().to_string())
        .unwrap_or_default();
    let nodes = find_child(node, NODE_BLOCK)
        .map(|block| read_items(block, content))
        .unwrap_or_default();

    Rule {
        selector,
        nodes,
        position: node_position(node),
    }
}

fn read_at_rule(node: Node, content: &str) -> AtRule {
    let position = node_position(node);
    let Some(keyword) = node.child(0) else {
        return AtRule::new("", "").at(position);
    };

    let name = node_text(keyword, content)
        .trim()
        .trim_start_matches('@')
        .to_string();

    let body = node
        .child(node.child_count().saturating_sub(1))
        .filter(|last| matches!(last.kind(), NODE_BLOCK | NODE_KEYFRAME_BLOCK_LIST));

    let params_end = body.map(|b| b.start_byte()).unwrap_or_else(|| node.end_byte());
    let params = content
        .get(keyword.end_byte()..params_end)
        .unwrap_or("")
        .trim()
        .trim_end_matches(';')
        .trim()
        .to_string();

    let nodes = body.map(|b| read_items(b, content)).unwrap_or_default();

    debug!("Read at-rule @{} '{}' with {} child nodes", name, params, nodes.len());

    AtRule {
        name,
        params,
        nodes,
        position,
    }
}

fn read_declaration(node: Node, content: &str) -> Option<Declaration> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();

    let property = children
        .iter()
        .find(|child| child.kind() == NODE_PROPERTY_NAME)
        .or_else(|| children.first())?;
    let prop = node_text(*property, content).trim().to_string();

    let colon = children.iter().position(|child| child.kind() == NODE_COLON)?;
    let value_nodes: Vec<&Node> = children[colon + 1..]
        .iter()
        .filter(|child| !matches!(child.kind(), NODE_SEMICOLON | NODE_IMPORTANT | NODE_COMMENT))
        .collect();

    let mut important = children.iter().any(|child| child.kind() == NODE_IMPORTANT);
    let mut value = match (value_nodes.first(), value_nodes.last()) {
        (Some(first), Some(last)) => content
            .get(first.start_byte()..last.end_byte())
            .unwrap_or("")
            .trim()
            .to_string(),
        _ => String::new(),
    };

    // Some grammar versions leave `!important` inside the value
    if let Some(stripped) = strip_important(&value) {
        value = stripped;
        important = true;
    }

    Some(Declaration {
        prop,
        value,
        important,
        position: node_position(node),
    })
}

fn strip_important(value: &str) -> Option<String> {
    let bang = value.rfind('!')?;
    let flag = value[bang + 1..].trim();
    if flag.eq_ignore_ascii_case("important") {
        Some(value[..bang].trim_end().to_string())
    } else {
        None
    }
}

/// Find the first direct child of a given kind
fn find_child<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// Get text content of a node
fn node_text<'a>(node: Node, content: &'a str) -> &'a str {
    node.utf8_text(content.as_bytes()).unwrap_or("")
}

/// Convert a tree-sitter start point to a 1-based position
fn node_position(node: Node) -> SourcePosition {
    let start = node.start_position();
    SourcePosition::new(start.row + 1, start.column + 1)
}
