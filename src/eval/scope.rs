use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Read-only name lookup used while evaluating an expression.
pub trait Scope {
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl Scope for HashMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

/// Variables of one evaluation pass and the line defining each of them.
///
/// A name is present only while some live line successfully assigns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableContext {
    variables: HashMap<String, f64>,
    variable_lines: HashMap<String, usize>,
}

impl VariableContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Zero-based index of the line that defines `name`.
    pub fn line_of(&self, name: &str) -> Option<usize> {
        self.variable_lines.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn assign(&mut self, name: &str, value: f64, line: usize) {
        self.variables.insert(name.to_string(), value);
        self.variable_lines.insert(name.to_string(), line);
    }

    pub fn forget(&mut self, name: &str) {
        self.variables.remove(name);
        self.variable_lines.remove(name);
    }

    /// End-of-pass sweep: keep only names assigned during this pass.
    pub fn retain_assigned(&mut self, assigned: &HashSet<String>) {
        self.variables.retain(|name, _| assigned.contains(name));
        self.variable_lines.retain(|name, _| assigned.contains(name));
    }

    /// `(name, value, line)` triples sorted by name.
    pub fn entries(&self) -> Vec<(&str, f64, usize)> {
        let mut entries: Vec<_> = self
            .variables
            .iter()
            .map(|(name, &value)| {
                let line = self.variable_lines.get(name).copied().unwrap_or_default();
                (name.as_str(), value, line)
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Scope for VariableContext {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}
