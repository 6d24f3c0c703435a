//! Best-effort JSON repair: a regex normalizer for common hand-written JSON
//! mistakes (single quotes, bare keys, trailing commas, unquoted word
//! values). Not a parser. The inference engine never consults this; callers
//! run it before `generate_model` when strict parsing fails.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::info;

static BARE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([{,])\s*([A-Za-z0-9_]+)\s*:"#).expect("bare-key pattern"));
static TRAILING_COMMA_OBJ: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*\}").expect("trailing-comma-object pattern"));
static TRAILING_COMMA_ARR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*\]").expect("trailing-comma-array pattern"));
static BARE_WORD_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#":\s*([A-Za-z][A-Za-z0-9_]*)\s*([,}])"#).expect("bare-word pattern"));

#[derive(Debug, Clone, Serialize)]
pub struct FixOutcome {
    pub fixed_json: String,
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_position: Option<ErrorPosition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPosition {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Try to turn `input` into valid JSON.
///
/// Already-valid input passes through untouched. Otherwise the rewrite
/// passes run in a fixed order (quotes, keys, trailing commas, word values)
/// and the result is re-parsed: success reformats it pretty, failure reports
/// the original text with the parser's line/column.
pub fn fix_json(input: &str) -> FixOutcome {
    if serde_json::from_str::<serde_json::Value>(input).is_ok() {
        info!("input already valid, no repair needed");
        return FixOutcome {
            fixed_json: input.to_string(),
            valid: true,
            message: "JSON is already valid".to_string(),
            error_position: None,
        };
    }

    let mut fixed = input.replace('\'', "\"");
    fixed = BARE_KEY.replace_all(&fixed, "$1\"$2\":").into_owned();
    fixed = TRAILING_COMMA_OBJ.replace_all(&fixed, "}").into_owned();
    fixed = TRAILING_COMMA_ARR.replace_all(&fixed, "]").into_owned();
    fixed = BARE_WORD_VALUE
        .replace_all(&fixed, |caps: &Captures| {
            let word = &caps[1];
            if matches!(word, "true" | "false" | "null") {
                caps[0].to_string()
            } else {
                format!(":\"{word}\"{}", &caps[2])
            }
        })
        .into_owned();

    match serde_json::from_str::<serde_json::Value>(&fixed) {
        Ok(value) => {
            let pretty = serde_json::to_string_pretty(&value).unwrap_or(fixed);
            info!("repaired malformed input");
            FixOutcome {
                fixed_json: pretty,
                valid: true,
                message: "JSON fixed and formatted successfully".to_string(),
                error_position: None,
            }
        }
        Err(err) => FixOutcome {
            fixed_json: input.to_string(),
            valid: false,
            message: format!("Could not fix JSON: {err}"),
            error_position: Some(ErrorPosition {
                line: err.line(),
                column: err.column(),
                message: err.to_string(),
            }),
        },
    }
}
