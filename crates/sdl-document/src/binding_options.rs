use serde::Deserialize;
use serde::Serialize;

/// Which annotation binds a type to a model class.
///
/// The default matches `@model(class: "App\\Models\\User")`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BindingOptions {
    pub directive_name: String,
    pub class_argument: String,
}

impl BindingOptions {
    pub fn new(
        directive_name: impl Into<String>,
        class_argument: impl Into<String>,
    ) -> Self {
        Self {
            directive_name: directive_name.into(),
            class_argument: class_argument.into(),
        }
    }
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self::new("model", "class")
    }
}
