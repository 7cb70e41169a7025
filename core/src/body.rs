//! Placeholder-substitution request bodies.
//!
//! `BodyTemplate` replaces each `<name>` in a template with its value by
//! literal substring replacement. Values are not escaped for the template's
//! syntax, so a value must not contain quotes or other placeholder tokens.
//! The SDK's own write calls serialize typed payloads from
//! `types::payload` instead; this builder is for hand-written bodies.

use crate::url_builder::ParamValue;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyTemplate {
    template: String,
    substitutions: Vec<(String, String)>,
}

impl BodyTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            substitutions: Vec::new(),
        }
    }

    pub fn param(mut self, name: &str, value: impl ParamValue) -> Self {
        self.substitutions.push((name.to_string(), value.to_param()));
        self
    }

    /// Applies substitutions in insertion order.
    pub fn render(&self) -> String {
        self.substitutions
            .iter()
            .fold(self.template.clone(), |body, (name, value)| {
                body.replace(&format!("<{name}>"), value)
            })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.render().into_bytes()
    }
}
