//! Infer a structural type schema from a sample JSON document and synthesize
//! a typed Dart data-model (nullable fields, constructor, fromJson/toJson).
//!
//! Pipeline: parse → synthesize (resolver + naming registry + class table) →
//! emit. One generation call is a pure function of (document, root name) with
//! a private class table; nothing persists across calls and the engine does
//! no I/O.

pub mod api;
pub mod cli;
pub mod codegen;
pub mod ir;
pub mod naming;
pub mod path_de;
pub mod repair;
pub mod resolve;
pub mod synth;

pub use api::{GenerateError, Generated, generate_model, list_supported_languages};
pub use repair::{FixOutcome, fix_json};
