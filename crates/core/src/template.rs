// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Message template rendering
//!
//! Substitution is literal string replacement. Unknown placeholders are
//! left in place so a misconfigured template still delivers something
//! readable instead of failing the notification.

use crate::execution::Execution;
use std::collections::BTreeMap;

/// Variables available to assignment and escalation templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    variables: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// The standard variable set for an execution's messages
    pub fn for_execution(execution: &Execution, minutes: u32) -> Self {
        Self::new()
            .set("nombre_sop", &execution.sop_name)
            .set("sucursal_name", &execution.branch_name)
            .set("empleado_nombre", &execution.actor_name)
            .set("minutos", minutes.to_string())
    }

    /// Render a template by replacing `{key}` placeholders
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            result = result.replace(&format!("{{{}}}", key), value);
        }
        result
    }
}
