//! Owned stylesheet model
//!
//! A small, parser-independent tree of rules, at-rules and declarations.
//! [`crate::css::tree_reader`] builds it from a tree-sitter-css syntax tree, and
//! tests or hosts with their own parser can build it by hand.
//!
//! The tree is read-only once built. [`Stylesheet::declarations`] walks it and
//! hands out each declaration together with its owning rule and the node that
//! encloses that rule, which is all the extraction needs to know about context.

use std::fmt;

use serde::Serialize;

/// 1-based line and column of a node start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A node of the stylesheet tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StyleNode {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
}

impl From<Rule> for StyleNode {
    fn from(rule: Rule) -> Self {
        StyleNode::Rule(rule)
    }
}

impl From<AtRule> for StyleNode {
    fn from(at_rule: AtRule) -> Self {
        StyleNode::AtRule(at_rule)
    }
}

impl From<Declaration> for StyleNode {
    fn from(declaration: Declaration) -> Self {
        StyleNode::Declaration(declaration)
    }
}

/// A qualified rule such as `.button:hover { ... }`, or a keyframe block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// Raw selector text, trimmed
    pub selector: String,
    pub nodes: Vec<StyleNode>,
    pub position: SourcePosition,
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            nodes: Vec::new(),
            position: SourcePosition::default(),
        }
    }

    /// Append a child node, builder style
    pub fn with(mut self, node: impl Into<StyleNode>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }

    /// Declarations that are direct children of this rule
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.iter().filter_map(|node| match node {
            StyleNode::Declaration(declaration) => Some(declaration),
            _ => None,
        })
    }
}

/// An at-rule such as `@media (max-width: 600px) { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtRule {
    /// Name without the leading `@`
    pub name: String,
    /// Prelude text between the name and the block, trimmed
    pub params: String,
    pub nodes: Vec<StyleNode>,
    pub position: SourcePosition,
}

impl AtRule {
    pub fn new(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            nodes: Vec::new(),
            position: SourcePosition::default(),
        }
    }

    /// Append a child node, builder style
    pub fn with(mut self, node: impl Into<StyleNode>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }

    /// Tag identifying this at-rule as a usage context, e.g. `@media print`
    pub fn context_tag(&self) -> String {
        format!("@{} {}", self.name, self.params)
    }
}

/// A property declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub prop: String,
    /// Raw value text without the `!important` flag
    pub value: String,
    pub important: bool,
    pub position: SourcePosition,
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            important: false,
            position: SourcePosition::default(),
        }
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }
}

/// What a rule is nested in
#[derive(Debug, Clone, Copy)]
pub enum Enclosing<'a> {
    Stylesheet,
    Rule(&'a Rule),
    AtRule(&'a AtRule),
}

/// What a declaration is a direct child of
#[derive(Debug, Clone, Copy)]
pub enum Owner<'a> {
    Stylesheet,
    Rule {
        rule: &'a Rule,
        enclosing: Enclosing<'a>,
    },
    AtRule(&'a AtRule),
}

/// A declaration together with its place in the tree
#[derive(Debug, Clone, Copy)]
pub struct DeclarationSite<'a> {
    pub declaration: &'a Declaration,
    pub owner: Owner<'a>,
}

impl<'a> DeclarationSite<'a> {
    /// The rule that owns the declaration, if any
    pub fn rule(&self) -> Option<&'a Rule> {
        match self.owner {
            Owner::Rule { rule, .. } => Some(rule),
            _ => None,
        }
    }

    /// The at-rule the owning rule is directly nested in, if any
    pub fn enclosing_at_rule(&self) -> Option<&'a AtRule> {
        match self.owner {
            Owner::Rule {
                enclosing: Enclosing::AtRule(at_rule),
                ..
            } => Some(at_rule),
            _ => None,
        }
    }
}

/// A parsed stylesheet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stylesheet {
    pub nodes: Vec<StyleNode>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level node, builder style
    pub fn with(mut self, node: impl Into<StyleNode>) -> Self {
        self.nodes.push(node.into());
        self
    }

    /// Append all top-level nodes of another stylesheet after this one's
    pub fn append(&mut self, other: Stylesheet) {
        self.nodes.extend(other.nodes);
    }

    /// Every rule in document order, including nested ones
    pub fn rules(&self) -> Vec<&Rule> {
        let mut rules = Vec::new();
        collect_rules(&self.nodes, &mut rules);
        rules
    }

    /// Every declaration in document order, with its owner
    pub fn declarations(&self) -> Vec<DeclarationSite<'_>> {
        let mut sites = Vec::new();
        collect_declarations(&self.nodes, Owner::Stylesheet, &mut sites);
        sites
    }
}

fn collect_rules<'a>(nodes: &'a [StyleNode], rules: &mut Vec<&'a Rule>) {
    for node in nodes {
        match node {
            StyleNode::Rule(rule) => {
                rules.push(rule);
                collect_rules(&rule.nodes, rules);
            }
            StyleNode::AtRule(at_rule) => collect_rules(&at_rule.nodes, rules),
            StyleNode::Declaration(_) => {}
        }
    }
}

fn collect_declarations<'a>(
    nodes: &'a [StyleNode],
    owner: Owner<'a>,
    sites: &mut Vec<DeclarationSite<'a>>,
) {
    for node in nodes {
        match node {
            StyleNode::Declaration(declaration) => sites.push(DeclarationSite { declaration, owner }),
            StyleNode::Rule(rule) => {
                let enclosing = match owner {
                    Owner::Stylesheet => Enclosing::Stylesheet,
                    Owner::Rule { rule: parent, .. } => Enclosing::Rule(parent),
                    Owner::AtRule(at_rule) => Enclosing::AtRule(at_rule),
                };
                collect_declarations(&rule.nodes, Owner::Rule { rule, enclosing }, sites);
            }
            StyleNode::AtRule(at_rule) => {
                collect_declarations(&at_rule.nodes, Owner::AtRule(at_rule), sites)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stylesheet {
        Stylesheet::new()
            .with(Rule::new(":root").with(Declaration::new("--a", "red")))
            .with(
                AtRule::new("media", "print").with(
                    Rule::new(".card")
                        .with(Declaration::new("color", "var(--a)"))
                        .with(Rule::new(".inner").with(Declaration::new("border-color", "var(--a)"))),
                ),
            )
            .with(AtRule::new("font-face", "").with(Declaration::new("font-family", "x")))
    }

    #[test]
    fn test_declarations_in_document_order() {
        let sheet = sample();
        let props: Vec<&str> = sheet
            .declarations()
            .iter()
            .map(|site| site.declaration.prop.as_str())
            .collect();
        assert_eq!(props, vec!["--a", "color", "border-color", "font-family"]);
    }

    #[test]
    fn test_declaration_owners() {
        let sheet = sample();
        let sites = sheet.declarations();

        assert_eq!(sites[0].rule().map(|r| r.selector.as_str()), Some(":root"));
        assert!(sites[0].enclosing_at_rule().is_none());

        assert_eq!(sites[1].rule().map(|r| r.selector.as_str()), Some(".card"));
        assert_eq!(sites[1].enclosing_at_rule().map(|a| a.context_tag()), Some("@media print".to_string()));

        // Nested in a rule, not directly in the at-rule
        assert_eq!(sites[2].rule().map(|r| r.selector.as_str()), Some(".inner"));
        assert!(sites[2].enclosing_at_rule().is_none());

        assert!(sites[3].rule().is_none());
        assert!(matches!(sites[3].owner, Owner::AtRule(_)));
    }

    #[test]
    fn test_rules_are_collected_recursively() {
        let sheet = sample();
        let selectors: Vec<&str> = sheet.rules().iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec![":root", ".card", ".inner"]);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut first = Stylesheet::new().with(Rule::new("a"));
        first.append(Stylesheet::new().with(Rule::new("b")));
        let selectors: Vec<&str> = first.rules().iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec!["a", "b"]);
    }

    #[test]
    fn test_node_type_tags() {
        let node: StyleNode = Declaration::new("color", "red").into();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "declaration");
        assert_eq!(json["prop"], "color");
    }
}
