//! CSS Variable Extractor Library
//!
//! Finds the custom properties declared in `:root` rules of a stylesheet,
//! resolves their `var()` references and fallbacks, and reports every
//! declaration that consumes them, grouped by value expression, property and
//! selector.
//!
//! ```no_run
//! use css_var_extract::Extractor;
//!
//! let extraction = Extractor::default()
//!     .extract_source(":root { --base-color: #fff; } a { color: var(--base-color); }")?;
//! println!("{}", extraction.contents.to_json_pretty()?);
//! # Ok::<(), css_var_extract::ExtractError>(())
//! ```

pub mod css;
pub mod error;
pub mod extract;
pub mod logging;

pub use css::parser::CssParser;
pub use css::stylesheet::{AtRule, Declaration, Rule, SourcePosition, StyleNode, Stylesheet};
pub use error::{ExtractError, ExtractResult};
pub use extract::options::ExtractOptions;
pub use extract::result::{
    ExtractedEntry, Extraction, ExtractionResult, PropertyUsage, UsageSite, Variable, Warning,
};
pub use extract::{Extractor, extract};
