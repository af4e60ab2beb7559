//! Usage aggregation
//!
//! Groups every declaration that consumes a known variable by its raw value
//! expression, then by property, then by selector. A selector used under several
//! at-rules keeps one site that lists every at-rule context it was seen in.

use std::collections::HashMap;

use log::{debug, warn};

use crate::css::constants::{IMPORTANT_SUFFIX, VAR_FUNCTION_OPEN};
use crate::css::stylesheet::{DeclarationSite, Stylesheet};
use crate::extract::options::ExtractOptions;
use crate::extract::result::{ExtractedEntry, KEYFRAME_WARNING, UsageSite, Variable, Warning};

/// Collects usage sites of resolved variables
pub struct UsageAggregator<'a> {
    options: &'a ExtractOptions,
    vars: &'a [Variable],
    entries: Vec<ExtractedEntry>,
    /// Raw value to position in `entries`
    index: HashMap<String, usize>,
    warnings: Vec<Warning>,
}

impl<'a> UsageAggregator<'a> {
    pub fn new(options: &'a ExtractOptions, vars: &'a [Variable]) -> Self {
        Self {
            options,
            vars,
            entries: Vec::new(),
            index: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Walk every declaration of the stylesheet
    pub fn aggregate(mut self, stylesheet: &Stylesheet) -> (Vec<ExtractedEntry>, Vec<Warning>) {
        for site in stylesheet.declarations() {
            self.visit(site);
        }
        (self.entries, self.warnings)
    }

    fn visit(&mut self, site: DeclarationSite) {
        let declaration = site.declaration;

        let mut value = declaration.value.clone();
        if declaration.important {
            value.push_str(IMPORTANT_SUFFIX);
        }

        if value.is_empty() || !value.contains(VAR_FUNCTION_OPEN) {
            return;
        }

        let associated_vars: Vec<Variable> = self
            .vars
            .iter()
            .filter(|variable| value.contains(variable.name.as_str()))
            .cloned()
            .collect();
        if associated_vars.is_empty() {
            return;
        }

        let Some(rule) = site.rule() else {
            debug!(
                "Skipping {} at {}: declaration is not inside a rule",
                declaration.prop, declaration.position
            );
            return;
        };

        let selector_name = rule.selector.as_str();
        if selector_name.contains(self.options.root_selector.as_str()) {
            return;
        }

        if self.options.is_ignored_selector(selector_name) {
            warn!(
                "{} at {}: {}: {}",
                KEYFRAME_WARNING, declaration.position, declaration.prop, value
            );
            self.warnings.push(Warning {
                message: KEYFRAME_WARNING.to_string(),
                declaration: declaration.clone(),
                word: value,
            });
            return;
        }

        let context = site.enclosing_at_rule().map(|at_rule| at_rule.context_tag());

        let entry_index = match self.index.get(&value) {
            Some(&index) => index,
            None => {
                self.entries.push(ExtractedEntry::new(value.clone(), associated_vars));
                self.index.insert(value, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let sites = self.entries[entry_index].sites_mut(&declaration.prop);
        match sites.iter_mut().find(|existing| existing.selector_name == selector_name) {
            Some(existing) => {
                if let Some(tag) = &context {
                    existing.add_at_rule(tag);
                }
            }
            None => {
                let mut usage = UsageSite::new(selector_name);
                if let Some(tag) = &context {
                    usage.add_at_rule(tag);
                }
                sites.push(usage);
            }
        }
    }
}
