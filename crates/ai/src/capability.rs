use serde_json::{Map, Value as JsonValue};

use crate::commands::FieldSchema;
use crate::result::AiError;

/// Hosted text generation: an instruction plus a serialized data snapshot in,
/// free text (usually markdown) out.
///
/// Implementations wrap a vendor model. Output wording is not deterministic,
/// so nothing downstream may depend on it beyond "non-empty text".
pub trait ReportGenerator: Send + Sync {
    fn generate_report(&self, instruction: &str, data: &str) -> Result<String, AiError>;
}

/// Hosted structured extraction: free text plus a target field schema in, a
/// partial record (JSON object of the fields the text mentions) out.
///
/// An empty object means the model declined (unclear or unrelated command).
pub trait CommandParser: Send + Sync {
    fn parse_command(
        &self,
        text: &str,
        schema: &FieldSchema,
    ) -> Result<Map<String, JsonValue>, AiError>;
}

impl<T: ReportGenerator + ?Sized> ReportGenerator for &T {
    fn generate_report(&self, instruction: &str, data: &str) -> Result<String, AiError> {
        (**self).generate_report(instruction, data)
    }
}

impl<T: CommandParser + ?Sized> CommandParser for &T {
    fn parse_command(
        &self,
        text: &str,
        schema: &FieldSchema,
    ) -> Result<Map<String, JsonValue>, AiError> {
        (**self).parse_command(text, schema)
    }
}
