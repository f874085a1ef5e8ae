//! Minimal CLI: parse → (dart | registry) and registry → generate.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::codegen::{self, DecodeStyle};
use crate::model::{self, ClassRegistry, ParsedModel};
use crate::{optimize, parse, path_de};

// ------------------------------- Types ------------------------------------ //

/// extract a class model from API docs HTML, JSON documents or Dart snippets
/// and emit Dart data classes
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// parse inputs and emit Dart data classes
    Dart(DartOut),
    /// parse one input and print the class registry as JSON
    Registry(RegistryOut),
    /// emit Dart data classes from a previously saved registry
    Generate(GenerateOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// input source format
    #[arg(long, value_enum, default_value = "json")]
    format: parse::SourceFormat,

    /// root class name (overrides any name derived from the source)
    #[arg(long)]
    root_name: Option<String>,

    /// one or more inputs: literal paths, quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct EmitSettings {
    /// decode through getAsInt/getAsMap/... extension helpers instead of raw casts
    #[arg(long, default_value_t = false)]
    accessor_helpers: bool,

    /// emit only this class and the classes it references
    #[arg(long)]
    class: Option<String>,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct DartOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    emit_settings: EmitSettings,
}

#[derive(clap::Parser, Debug)]
struct RegistryOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    /// registry .json file produced by the `registry` subcommand, or '-' for stdin
    #[arg(long)]
    registry: String,

    #[command(flatten)]
    emit_settings: EmitSettings,
}

// --------------------------- Implementation ------------------------------- //

impl InputSettings {
    /// Read and parse every input, keyed by the display name of its source.
    fn load_models(&self) -> anyhow::Result<Vec<(String, ParsedModel)>> {
        let sources = resolve_file_path_patterns(&self.input)?;
        let mut models = Vec::with_capacity(sources.len());
        for source in sources {
            let text = read_source(&source)?;
            let model = parse::parse(self.format, &text, self.root_name.as_deref())
                .with_context(|| format!("failed to parse {source}"))?;
            tracing::debug!(source = %source, classes = model.registry.len(), "parsed input");
            models.push((source, model));
        }
        Ok(models)
    }
}

impl EmitSettings {
    fn style(&self) -> DecodeStyle {
        if self.accessor_helpers {
            DecodeStyle::AccessorHelpers
        } else {
            DecodeStyle::Plain
        }
    }

    /// Narrow the registry to `--class` and its dependencies when requested.
    fn select<'a>(&self, registry: &'a ClassRegistry) -> anyhow::Result<std::borrow::Cow<'a, ClassRegistry>> {
        let Some(class) = self.class.as_deref() else {
            return Ok(std::borrow::Cow::Borrowed(registry));
        };
        if !registry.contains(class) {
            bail!("class `{class}` not found in the parsed model");
        }
        Ok(std::borrow::Cow::Owned(model::related_classes(registry, class)))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Dart(target) => {
                let mut sections = Vec::new();
                for (source, model) in target.input_settings.load_models()? {
                    if model.is_no_data() {
                        eprintln!("{}", format!("no valid data in {source}, skipped").yellow());
                        continue;
                    }
                    for dup in optimize::duplicate_candidates(&model) {
                        tracing::debug!(
                            class = %dup.class_name,
                            same_as = %dup.same_as,
                            "structurally identical classes"
                        );
                    }
                    let registry = target.emit_settings.select(&model.registry)?;
                    sections.push(codegen::format(&codegen::generate(
                        &registry,
                        target.emit_settings.style(),
                    )));
                }
                if sections.is_empty() {
                    bail!("no valid data in any input");
                }
                write_output(target.emit_settings.out.as_deref(), &sections.join("\n"))
            }
            Command::Registry(target) => {
                let mut models = target.input_settings.load_models()?;
                if models.len() != 1 {
                    bail!("`registry` takes exactly one input, got {}", models.len());
                }
                let (_, model) = models.remove(0);
                for dup in optimize::duplicate_candidates(&model) {
                    tracing::debug!(
                        class = %dup.class_name,
                        same_as = %dup.same_as,
                        "structurally identical classes"
                    );
                }
                let json = serde_json::to_string_pretty(&model)?;
                write_output(target.out.as_deref(), &json)
            }
            Command::Generate(target) => {
                let text = read_source(&target.registry)
                    .with_context(|| format!("failed to read registry {}", target.registry))?;
                let model: ParsedModel = path_de::from_str_with_path(&text)
                    .with_context(|| format!("failed to parse registry {}", target.registry))?;
                let registry = target.emit_settings.select(&model.registry)?;
                let source =
                    codegen::format(&codegen::generate(&registry, target.emit_settings.style()));
                write_output(target.emit_settings.out.as_deref(), &source)
            }
        }
    }
}

// ---------------------------- Internal helpers ---------------------------- //

fn read_source(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
}

fn write_output(out: Option<&std::path::Path>, content: &str) -> anyhow::Result<()> {
    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(out, content)
            .with_context(|| format!("failed to write {}", out.display()))?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<String>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)
                .with_context(|| format!("bad glob pattern: {pattern}"))?
            {
                let path = entry?;
                matched_any = true;
                out.push(path.to_string_lossy().into_owned());
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Literal path, or '-' for stdin
            out.push(pattern.to_string());
        }
    }

    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //
