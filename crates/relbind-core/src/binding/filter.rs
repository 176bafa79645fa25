use std::collections::BTreeMap;

/// A named, parameterized restriction that can be enabled per session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterDefinition {
    pub name: String,

    /// Condition applied when a usage does not supply its own.
    pub default_condition: Option<String>,

    /// Parameter names mapped to their type names.
    pub parameter_types: BTreeMap<String, String>,
}

impl FilterDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_condition: None,
            parameter_types: BTreeMap::new(),
        }
    }

    pub fn parameter_type(&self, parameter: &str) -> Option<&str> {
        self.parameter_types.get(parameter).map(String::as_str)
    }
}
