//! CSS Tree-sitter Node Kind Constants
//!
//! Node kinds and keywords used when reading tree-sitter-css syntax trees.
//! Centralizing these constants helps prevent mistakes when the grammar changes.

// Structural nodes
/// A CSS rule containing selectors and a declaration block
pub const NODE_RULE_SET: &str = "rule_set";
/// A block of declarations enclosed in curly braces
pub const NODE_BLOCK: &str = "block";
/// A single property-value pair (e.g., `color: red;`)
pub const NODE_DECLARATION: &str = "declaration";
/// Container for one or more selectors
pub const NODE_SELECTORS: &str = "selectors";
/// CSS property name (e.g., `color`, `--base-color`)
pub const NODE_PROPERTY_NAME: &str = "property_name";
/// The `!important` flag of a declaration
pub const NODE_IMPORTANT: &str = "important";

// At-rules
/// Generic CSS at-rule (e.g., `@font-face`, `@layer`)
pub const NODE_AT_RULE: &str = "at_rule";
/// CSS import statement for external stylesheets
pub const NODE_IMPORT_STATEMENT: &str = "import_statement";
/// CSS charset declaration statement
pub const NODE_CHARSET_STATEMENT: &str = "charset_statement";
/// CSS keyframes animation definition
pub const NODE_KEYFRAMES_STATEMENT: &str = "keyframes_statement";
/// Body of a keyframes statement
pub const NODE_KEYFRAME_BLOCK_LIST: &str = "keyframe_block_list";
/// A single keyframe (`from`, `to`, `50%`) with its block
pub const NODE_KEYFRAME_BLOCK: &str = "keyframe_block";
/// CSS media query statement
pub const NODE_MEDIA_STATEMENT: &str = "media_statement";
/// CSS namespace declaration statement
pub const NODE_NAMESPACE_STATEMENT: &str = "namespace_statement";
/// CSS feature query statement
pub const NODE_SUPPORTS_STATEMENT: &str = "supports_statement";
/// CSS scope statement
pub const NODE_SCOPE_STATEMENT: &str = "scope_statement";
/// PostCSS-style statement (`@apply foo;`)
pub const NODE_POSTCSS_STATEMENT: &str = "postcss_statement";

// Punctuation
/// Colon separator between property and value
pub const NODE_COLON: &str = ":";
/// Semicolon terminator for declarations
pub const NODE_SEMICOLON: &str = ";";

// Comments
/// CSS comment block (e.g., `/* comment */`)
pub const NODE_COMMENT: &str = "comment";

// Error and special nodes
/// Tree-sitter error node for syntax errors
pub const NODE_ERROR: &str = "ERROR";

// Values
/// The CSS custom property reference function
pub const VAR_FUNCTION_OPEN: &str = "var(";
/// Suffix appended to raw values of `!important` declarations
pub const IMPORTANT_SUFFIX: &str = " !important";
/// Selector that declares document-scoped custom properties
pub const ROOT_SELECTOR: &str = ":root";
