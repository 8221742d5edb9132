use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::Serialize;

use omc_core::compile::{CompileContext, CompiledDocument, compile_document};
use omc_core::model::document::ServiceDocument;
use omc_core::model::method::Method;
use omc_core::model::types::CompositeType;

#[derive(Parser)]
#[command(name = "omc", about = "Operation-to-method compiler for API clients", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a service document into method models
    Compile {
        /// Path to the service document (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compile a service document and report a summary without emitting anything
    Validate {
        /// Path to the service document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

/// The compiled code model handed to downstream emitters.
#[derive(Serialize)]
struct CompileOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    methods: &'a [Method],
    types: Vec<&'a CompositeType>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            format,
            output,
        } => cmd_compile(input, format, output),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "omc", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_document(path: &PathBuf) -> Result<ServiceDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let doc = match ext {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        _ => serde_yaml_ng::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?,
    };
    Ok(doc)
}

fn run_compiler(doc: &ServiceDocument) -> (CompileContext, CompiledDocument) {
    let mut ctx = CompileContext::for_document(doc);
    let compiled = compile_document(&mut ctx, doc);
    (ctx, compiled)
}

fn report_failures(compiled: &CompiledDocument) {
    for failure in &compiled.failures {
        eprintln!("  error: operation {}: {}", failure.id, failure.error);
    }
}

fn cmd_compile(input: PathBuf, format: OutputFormat, output: Option<PathBuf>) -> Result<()> {
    let doc = load_document(&input)?;
    let (ctx, compiled) = run_compiler(&doc);

    let model = CompileOutput {
        title: doc.title.as_deref(),
        methods: &compiled.methods,
        types: ctx.registry().composites().collect(),
    };

    let rendered = match format {
        OutputFormat::Yaml => serde_yaml_ng::to_string(&model)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&model)?;
            json.push('\n');
            json
        }
    };

    match output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("  wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }

    for warning in ctx.warnings() {
        eprintln!("  warning: {warning}");
    }
    report_failures(&compiled);

    if !compiled.failures.is_empty() {
        anyhow::bail!(
            "{} of {} operations failed to compile",
            compiled.failures.len(),
            doc.operations.len()
        );
    }
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let doc = load_document(&input)?;
    let (ctx, compiled) = run_compiler(&doc);

    eprintln!(
        "Valid service document: {}",
        doc.title.as_deref().unwrap_or("(untitled)")
    );
    eprintln!("  Methods: {}", compiled.methods.len());
    eprintln!("  Types: {}", ctx.registry().len());
    eprintln!("  Warnings: {}", ctx.warnings().len());

    report_failures(&compiled);
    if !compiled.failures.is_empty() {
        anyhow::bail!(
            "{} of {} operations failed to compile",
            compiled.failures.len(),
            doc.operations.len()
        );
    }

    eprintln!("Validation successful.");
    Ok(())
}
