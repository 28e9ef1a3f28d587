use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error context information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    pub component: Option<String>,
    pub action: Option<String>,
    pub additional: BTreeMap<String, String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn add_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_fields() {
        let context = ErrorContext::new()
            .with_component("dispatcher")
            .with_action("action:sign_out")
            .add_context("route", "/");

        assert_eq!(context.component.as_deref(), Some("dispatcher"));
        assert_eq!(context.action.as_deref(), Some("action:sign_out"));
        assert_eq!(context.additional.get("route").map(String::as_str), Some("/"));
    }
}
