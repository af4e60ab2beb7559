//! CSS variable extraction
//!
//! Runs in two phases over a read-only stylesheet:
//! - [`variable_table`] resolves every property declared in root rules
//! - [`usage`] groups every declaration that consumes one of them
//!
//! Both phases build fresh structures on each call, so extracting the same
//! stylesheet twice yields identical results.

pub mod bracket;
pub mod options;
pub mod result;
pub mod usage;
pub mod variable_table;


use log::debug;

use crate::css::parser::CssParser;
use crate::css::stylesheet::Stylesheet;
use crate::error::ExtractResult;
use options::ExtractOptions;
use result::{Extraction, ExtractionResult};
use usage::UsageAggregator;
use variable_table::VariableTableBuilder;

/// Entry point for extracting variables and their usages
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract variables and usage sites from a stylesheet
    pub fn extract(&self, stylesheet: &Stylesheet) -> ExtractResult<Extraction> {
        let vars = VariableTableBuilder::new(&self.options).build(stylesheet)?;
        debug!("Variable table has {} entries", vars.len());

        let (extracted_properties, warnings) = UsageAggregator::new(&self.options, &vars).aggregate(stylesheet);
        debug!(
            "Grouped usages under {} value expressions with {} warnings",
            extracted_properties.len(),
            warnings.len()
        );

        Ok(Extraction {
            contents: ExtractionResult {
                vars,
                extracted_properties,
            },
            warnings,
        })
    }

    /// Parse CSS source and extract from it
    pub fn extract_source(&self, content: &str) -> ExtractResult<Extraction> {
        let mut parser = CssParser::new()?;
        let stylesheet = parser.parse(content)?;
        self.extract(&stylesheet)
    }

    /// Parse several CSS sources as one stylesheet and extract from it
    pub fn extract_sources(&self, sources: &[&str]) -> ExtractResult<Extraction> {
        let mut parser = CssParser::new()?;
        let stylesheet = parser.parse_all(sources)?;
        self.extract(&stylesheet)
    }
}

/// Extract with default options
pub fn extract(stylesheet: &Stylesheet) -> ExtractResult<Extraction> {
    Extractor::default().extract(stylesheet)
}
