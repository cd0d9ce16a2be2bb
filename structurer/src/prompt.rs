/// Fixed instruction wrapped around caller text.
///
/// Rendering is a pure function of the input; the input is interpolated
/// verbatim (no escaping), so it can steer the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Role sentence, e.g. `You are a productivity assistant.`
    pub role: &'static str,
    /// What to do with the input; followed by the schema clause.
    pub task: &'static str,
    /// Literal JSON schema description shown to the model.
    pub schema: &'static str,
    /// Label placed before the caller text, e.g. `Idea`.
    pub input_label: &'static str,
}

impl PromptTemplate {
    pub fn render(&self, input: &str) -> String {
        format!(
            "{} {} in JSON format exactly matching this schema:\n{}\n{}: {}",
            self.role, self.task, self.schema, self.input_label, input
        )
    }
}
