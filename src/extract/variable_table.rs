//! Variable table construction
//!
//! Builds the ordered table of properties declared in root-selector rules, each
//! with a fully resolved value.
//!
//! - **Definitions**: every declaration that is a direct child of a rule whose
//!   selector is exactly the root selector, at any depth, in document order.
//!   Several declarations of one name are candidates tried in order; the first
//!   that resolves wins.
//!
//! - **Resolution**: `var(name, fallback)` calls are substituted one at a time,
//!   leftmost first. A known name is replaced by its resolved value, an unknown one
//!   by its fallback text, which is itself resolved if it still contains `var(`.
//!   An unknown name without fallback drops the declaration.
//!
//! - **Cycles**: variables that reference themselves, directly or through other
//!   variables, are unresolved and left out of the table. References to them from
//!   outside the cycle fall back like references to unknown names. A cycle met
//!   through a declaration that then fails is forgotten when a later duplicate of
//!   the same name is tried.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::css::constants::VAR_FUNCTION_OPEN;
use crate::css::stylesheet::{Declaration, Stylesheet};
use crate::error::{ExtractError, ExtractResult};
use crate::extract::bracket::find_closing_paren;
use crate::extract::options::ExtractOptions;
use crate::extract::result::Variable;

/// A root declaration of a variable, with its document position
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    order: usize,
    declaration: &'a Declaration,
}

/// A successfully resolved variable
#[derive(Debug, Clone)]
struct Resolved {
    value: String,
    fallback_source: Option<String>,
    order: usize,
}

/// Builds the variable table of a stylesheet
pub struct VariableTableBuilder<'a> {
    options: &'a ExtractOptions,
    /// Variable names in order of first declaration
    names: Vec<String>,
    definitions: HashMap<String, Vec<Candidate<'a>>>,
    /// Finished resolutions, `None` for unresolved variables
    resolved: HashMap<String, Option<Resolved>>,
    cyclic: HashSet<String>,
    /// Names added to `resolved` and `cyclic`, in insertion order, so a failed
    /// candidate attempt can be undone
    resolved_log: Vec<String>,
    cyclic_log: Vec<String>,
}

/// Journal lengths taken before a candidate attempt
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    resolved: usize,
    cyclic: usize,
}

impl<'a> VariableTableBuilder<'a> {
    pub fn new(options: &'a ExtractOptions) -> Self {
        Self {
            options,
            names: Vec::new(),
            definitions: HashMap::new(),
            resolved: HashMap::new(),
            cyclic: HashSet::new(),
            resolved_log: Vec::new(),
            cyclic_log: Vec::new(),
        }
    }

    /// Build the table for a stylesheet
    pub fn build(mut self, stylesheet: &'a Stylesheet) -> ExtractResult<Vec<Variable>> {
        self.collect_definitions(stylesheet);

        let names = std::mem::take(&mut self.names);
        let mut table = Vec::new();
        for name in names {
            let mut stack = Vec::new();
            match self.resolve(&name, &mut stack)? {
                Some(resolved) => table.push((
                    resolved.order,
                    Variable {
                        name,
                        value: resolved.value,
                        fallback_source: resolved.fallback_source,
                    },
                )),
                None => debug!("Variable {} is unresolved and left out of the table", name),
            }
        }

        // The winning declaration decides the position in the table
        table.sort_by_key(|(order, _)| *order);
        Ok(table.into_iter().map(|(_, variable)| variable).collect())
    }

    fn collect_definitions(&mut self, stylesheet: &'a Stylesheet) {
        let options = self.options;
        let root_rules = stylesheet
            .rules()
            .into_iter()
            .filter(|rule| rule.selector == options.root_selector);

        let mut order = 0;
        for rule in root_rules {
            for declaration in rule.declarations() {
                let name = declaration.prop.trim();
                let candidate = Candidate { order, declaration };
                order += 1;

                match self.definitions.get_mut(name) {
                    Some(candidates) => candidates.push(candidate),
                    None => {
                        self.names.push(name.to_string());
                        self.definitions.insert(name.to_string(), vec![candidate]);
                    }
                }
            }
        }

        debug!("Found {} root variables", self.names.len());
    }

    /// Resolve a variable by name, detecting cycles through `stack`
    fn resolve(&mut self, name: &str, stack: &mut Vec<String>) -> ExtractResult<Option<Resolved>> {
        if let Some(done) = self.resolved.get(name) {
            return Ok(done.clone());
        }

        if let Some(start) = stack.iter().position(|visiting| visiting == name) {
            debug!("Circular reference: {} -> {}", stack[start..].join(" -> "), name);
            for member in &stack[start..] {
                if self.cyclic.insert(member.clone()) {
                    self.cyclic_log.push(member.clone());
                }
            }
            return Ok(None);
        }

        let Some(candidates) = self.definitions.get(name).cloned() else {
            return Ok(None);
        };

        stack.push(name.to_string());
        let mut outcome = None;
        let last = candidates.len() - 1;
        for (index, candidate) in candidates.into_iter().enumerate() {
            let checkpoint = self.checkpoint();
            if let Some((value, fallback_source)) = self.substitute(name, candidate.declaration, stack)? {
                outcome = Some(Resolved {
                    value,
                    fallback_source,
                    order: candidate.order,
                });
                break;
            }
            // Cycles found through a declaration that lost to a later duplicate
            // are not cycles of the document
            if index < last {
                self.rollback(checkpoint);
            }
        }
        stack.pop();

        if self.cyclic.contains(name) {
            outcome = None;
        }
        self.resolved.insert(name.to_string(), outcome.clone());
        self.resolved_log.push(name.to_string());
        Ok(outcome)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            resolved: self.resolved_log.len(),
            cyclic: self.cyclic_log.len(),
        }
    }

    /// Forget resolutions and cycle marks recorded since the checkpoint
    fn rollback(&mut self, checkpoint: Checkpoint) {
        for name in self.resolved_log.drain(checkpoint.resolved..) {
            self.resolved.remove(&name);
        }
        for name in self.cyclic_log.drain(checkpoint.cyclic..) {
            self.cyclic.remove(&name);
        }
    }

    /// Substitute every `var()` call in one declaration's value.
    ///
    /// Returns `None` when a reference can be neither resolved nor replaced by a
    /// fallback.
    fn substitute(
        &mut self,
        name: &str,
        declaration: &Declaration,
        stack: &mut Vec<String>,
    ) -> ExtractResult<Option<(String, Option<String>)>> {
        let mut value = declaration.value.trim().to_string();
        let mut fallback_source = None;
        let mut substitutions = 0;

        while let Some(start) = value.find(VAR_FUNCTION_OPEN) {
            if substitutions >= self.options.max_substitutions {
                return Err(ExtractError::SubstitutionLimit {
                    property: name.to_string(),
                    limit: self.options.max_substitutions,
                });
            }
            substitutions += 1;

            let arguments_start = start + VAR_FUNCTION_OPEN.len();
            let end = find_closing_paren(&value, arguments_start).map_err(|unbalanced| {
                debug!("Unbalanced var() in {}: {}", name, unbalanced);
                ExtractError::MalformedValue {
                    property: name.to_string(),
                    value: declaration.value.clone(),
                    position: declaration.position,
                }
            })?;

            let (reference, fallback) = split_arguments(&value[arguments_start..end]);
            let replacement = match self.resolve(&reference, stack)? {
                Some(resolved) => {
                    fallback_source = Some(reference);
                    resolved.value
                }
                None => match fallback {
                    Some(fallback) => fallback,
                    None => {
                        debug!("Dropping {}: {} is unresolved and has no fallback", name, reference);
                        return Ok(None);
                    }
                },
            };

            value.replace_range(start..=end, &replacement);
        }

        Ok(Some((value, fallback_source)))
    }
}

/// Split `var()` arguments at the first comma into name and fallback
fn split_arguments(arguments: &str) -> (String, Option<String>) {
    match arguments.find(',') {
        Some(comma) => (
            arguments[..comma].trim().to_string(),
            Some(arguments[comma + 1..].trim().to_string()),
        ),
        None => (arguments.trim().to_string(), None),
    }
}
