//! Structured entry points consumed by dispatch layers (the CLI here, or any
//! tool protocol wrapped around the crate).
//!
//! All failures come back as data. The engine itself is total over valid
//! JSON, so the only real error paths are a failed parse and an unsupported
//! target language; an unwind guard turns the should-be-unreachable rest
//! into a structured internal error instead of a crash.

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::codegen::{Codegen, RootShape};
use crate::naming::ClassTable;
use crate::resolve::resolve;
use crate::synth::synthesize;

/// Target languages the tool advertises. Only `dart` has a real emitter;
/// the rest answer with `UnsupportedLanguage` in offline mode.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "dart",
    "typescript",
    "kotlin",
    "swift",
    "python",
    "java",
    "csharp",
    "go",
    "ruby",
    "rust",
    "flow",
    "scala",
    "cpp",
    "objective-c",
    "elm",
    "schema",
    "pike",
    "haskell",
];

pub fn list_supported_languages() -> &'static [&'static str] {
    SUPPORTED_LANGUAGES
}

/// A successful generation run.
#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    pub code: String,
    pub language: String,
    pub class_name: String,
    /// Derived class names that overwrote a structurally different class
    /// during this run. Empty in the common case; callers may warn on it.
    pub collisions: Vec<String>,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Language '{0}' is not supported in offline mode")]
    UnsupportedLanguage(String),
    #[error("Failed to generate model: {0}")]
    Internal(String),
}

/// Generate a typed data-model from one sample JSON document.
///
/// Strict parse first (`Invalid JSON: …` on failure, no repair attempted
/// here), then language dispatch, then the pure inference/emission pipeline.
/// One call owns its entire class table; no state survives the call.
pub fn generate_model(
    json_text: &str,
    class_name: &str,
    language: &str,
) -> Result<Generated, GenerateError> {
    info!(language, class_name, "generating model");

    let value: Value =
        crate::path_de::from_str_with_path(json_text).map_err(GenerateError::InvalidJson)?;

    if !language.eq_ignore_ascii_case("dart") {
        return Err(GenerateError::UnsupportedLanguage(language.to_string()));
    }

    let outcome = catch_unwind(AssertUnwindSafe(|| generate_dart(&value, class_name)));
    match outcome {
        Ok((code, collisions)) => {
            debug!(collisions = collisions.len(), "model generated");
            Ok(Generated {
                code,
                language: language.to_string(),
                class_name: class_name.to_string(),
                collisions,
            })
        }
        Err(_) => Err(GenerateError::Internal(
            "model synthesis panicked on valid JSON".to_string(),
        )),
    }
}

/// The pure pipeline: synthesize the class table, pick the root shape, emit.
fn generate_dart(value: &Value, class_name: &str) -> (String, Vec<String>) {
    let mut table = ClassTable::new();

    let shape = match value {
        Value::Object(obj) => {
            synthesize(obj, class_name, &mut table);
            RootShape::Object
        }
        Value::Array(items) if items.first().is_some_and(Value::is_object) => {
            if let Some(first) = items.first().and_then(Value::as_object) {
                synthesize(first, class_name, &mut table);
            }
            RootShape::ObjectList
        }
        other => RootShape::Value(resolve(other, "", "")),
    };

    let mut cg = Codegen::new();
    cg.emit(class_name, &shape, &table);
    (cg.into_string(), table.into_collisions())
}
