pub mod mission_plan;
pub mod project_brief;

use serde::de::DeserializeOwned;

/// A request body carrying exactly one required text field.
pub trait InputRequest: DeserializeOwned {
    /// JSON field name, used in error messages.
    const FIELD: &'static str;

    fn into_input(self) -> Option<String>;
}
