// `{{placeholder}}` substitution for url templates

use crate::error::{Error, Result};
use std::collections::BTreeMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// named values available to a template
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// substitute every `{{name}}` in the template
///
/// fails on a placeholder without a value and on an unterminated `{{`.
pub fn render(template: &str, vars: &TemplateVars) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + OPEN.len()..];
        let close = after_open
            .find(CLOSE)
            .ok_or_else(|| Error::template(after_open, template))?;

        let name = after_open[..close].trim();
        let value = vars
            .get(name)
            .ok_or_else(|| Error::template(name, template))?;
        output.push_str(value);

        rest = &after_open[close + CLOSE.len()..];
    }
    output.push_str(rest);

    Ok(output)
}
