//! Minimal CLI: generate | fix | languages
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::api::{self, GenerateError, Generated};
use crate::repair;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a schema from sample JSON and emit a typed data-model
#[derive(Parser, Debug)]
#[command(name = "json2model", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate a typed data-model from a sample JSON document
    Generate(GenerateOut),
    /// best-effort repair of malformed JSON
    Fix(FixOut),
    /// list supported target languages
    Languages,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// literal JSON, a file path, or a quoted glob pattern
    #[arg(long, short)]
    input: String,
}

#[derive(Args, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// top-level class name
    #[arg(long, default_value = "Model")]
    class_name: String,

    /// target language (only dart is generated offline)
    #[arg(long, default_value = "dart")]
    language: String,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// fail on malformed input instead of attempting repair
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Args, Debug)]
struct FixOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file for the repaired document (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => target.run(),
            Command::Fix(target) => target.run(),
            Command::Languages => {
                for language in api::list_supported_languages() {
                    println!("{language}");
                }
                Ok(())
            }
        }
    }
}

impl GenerateOut {
    fn run(&self) -> anyhow::Result<()> {
        let documents = self.input_settings.load()?;
        if documents.len() > 1 && self.out.is_some() {
            bail!("--out expects a single input document, got {}", documents.len());
        }

        for (origin, text) in &documents {
            let generated =
                generate_with_repair(text, &self.class_name, &self.language, self.strict)
                    .with_context(|| format!("failed to generate a model for {origin}"))?;

            for name in &generated.collisions {
                eprintln!(
                    "{} class name collision: {name} (later structure wins)",
                    "warning:".yellow().bold()
                );
            }

            match self.out.as_ref() {
                Some(out) => {
                    write_output(out, &generated.code)?;
                    eprintln!("{} wrote {}", "ok:".green().bold(), out.display());
                }
                None => println!("{}", generated.code),
            }
        }
        Ok(())
    }
}

impl FixOut {
    fn run(&self) -> anyhow::Result<()> {
        let documents = self.input_settings.load()?;
        if documents.len() > 1 {
            bail!("fix expects a single input document, got {}", documents.len());
        }
        let Some((_, text)) = documents.first() else {
            bail!("no input document");
        };

        let outcome = repair::fix_json(text);
        let report = serde_json::to_string_pretty(&outcome)
            .context("failed to serialize the repair outcome")?;
        match self.out.as_ref() {
            Some(out) => write_output(out, &outcome.fixed_json)?,
            None => println!("{report}"),
        }
        if !outcome.valid {
            bail!("{}", outcome.message);
        }
        Ok(())
    }
}

/// Strict generation first; on a parse failure, one repair pass and one
/// retry. The engine itself never repairs.
fn generate_with_repair(
    text: &str,
    class_name: &str,
    language: &str,
    strict: bool,
) -> Result<Generated, GenerateError> {
    match api::generate_model(text, class_name, language) {
        Err(GenerateError::InvalidJson(detail)) if !strict => {
            let fix = repair::fix_json(text);
            if fix.valid {
                api::generate_model(&fix.fixed_json, class_name, language)
            } else {
                Err(GenerateError::InvalidJson(detail))
            }
        }
        other => other,
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Resolve the input to one or more (origin, text) documents: an existing
    /// file is read, a glob pattern is expanded, anything else is taken as
    /// literal JSON text.
    fn load(&self) -> anyhow::Result<Vec<(String, String)>> {
        let raw = self.input.as_str();

        if Path::new(raw).is_file() {
            let text = std::fs::read_to_string(raw)
                .with_context(|| format!("failed to read {raw}"))?;
            return Ok(vec![(raw.to_string(), text)]);
        }

        if has_glob_chars(raw) {
            let mut out = Vec::new();
            for path in resolve_file_path_pattern(raw)? {
                let origin = path.to_string_lossy().to_string();
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {origin}"))?;
                out.push((origin, text));
            }
            return Ok(out);
        }

        Ok(vec![("<inline json>".to_string(), raw.to_string())])
    }
}

fn has_glob_chars(s: &str) -> bool {
    // Minimal glob detection for the `glob` crate syntax.
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
}

fn resolve_file_path_pattern(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in glob::glob(pattern).context("invalid glob pattern")? {
        out.push(entry?);
    }
    if out.is_empty() {
        // an explicit glob that matches nothing is an error, not empty output
        bail!("glob pattern matched no files: {pattern}");
    }
    Ok(out)
}

fn write_output(out: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(out, content).with_context(|| format!("failed to write {}", out.display()))
}
