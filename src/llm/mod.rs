pub mod gemini;
pub mod provider;

use provider::TextGenerator;

/// Runs one generation, absorbing backend errors into `None` so a
/// failed call never aborts the surrounding batch.
pub fn generate_dialog(backend: &dyn TextGenerator, prompt: &str) -> Option<String> {
    match backend.generate(prompt) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(backend = backend.name(), error = ?err, "generation failed");
            None
        }
    }
}
