use clap::{Parser, Subcommand};
use docsmith::generate::BuildOptions;
use docsmith::{duplicates, generate, output, patterns, validate};
use std::path::PathBuf;

/// Shared flags for commands that discover and validate outline files.
#[derive(clap::Args, Clone)]
struct OutlineArgs {
    /// Glob patterns to match outline files
    patterns: Vec<String>,

    /// Glob patterns consulted when the primary patterns match nothing
    #[arg(long, num_args = 1.., default_values_t = default_fallback_patterns())]
    fallback_patterns: Vec<String>,

    /// Path to an outline schema overriding the embedded one
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn default_fallback_patterns() -> Vec<String> {
    vec![
        "**/*.outline.yaml".to_string(),
        "__outlines__/**/*.yaml".to_string(),
    ]
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docsmith")]
#[command(about = "Documentation scaffolding generator")]
#[command(long_about = "\
Documentation scaffolding generator

Your outline files are the data source. Each outline is a YAML document
declaring named sidebars and their nested content tree; docsmith validates
them, generates one Markdown document per topic, and writes a sidebars
navigation module for your static-site generator.

Outline structure:

  path: guides                       # Optional routing prefix for the file
  sidebars:
    - label: Getting started         # A sidebar: label + items
      items:
        - Introduction               # Bare string = topic
        - Installing:                # Single-key mapping = category
            - Linux
            - macOS
        - label: Reference           # Full form
          slug: ref                  # Identifier override (slug > id > label)
          headings:                  # In-page heading scaffold
            - Usage
            - Options
        - label: Source code         # href = external link
          href: https://example.com
        - html: '<hr/>'              # Raw HTML passthrough
          label: divider

Topics become <docs>/<path>/<identifier>.md; categories compose their path
(or label) into every topic below them. Sidebars whose label appears in
more than one file are skipped with a warning; everything else builds.

Run 'docsmith schema' to print the outline schema all files are validated
against.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build topic documents and the sidebars module (default)
    Build {
        #[command(flatten)]
        outline: OutlineArgs,

        /// Directory where topic documents are generated into
        #[arg(short, long, default_value = "docs")]
        docs: PathBuf,

        /// Path where the sidebars module is generated into
        #[arg(short, long, default_value = "sidebars.js")]
        sidebars: PathBuf,
    },
    /// Validate outline files and report duplicates without building
    Check {
        #[command(flatten)]
        outline: OutlineArgs,
    },
    /// Print the embedded outline schema
    Schema,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or_else(default_build_command) {
        Command::Build {
            outline,
            docs,
            sidebars,
        } => {
            let Some((validation, duplicate_report)) = check_stages(&outline)? else {
                return Ok(());
            };

            println!("==> Stage 3: Building → {}", docs.display());
            let options = BuildOptions {
                docs_dir: docs,
                sidebars_file: sidebars,
            };
            let report = generate::build(
                &validation.valid_files,
                &duplicate_report,
                &options,
            )?;
            output::print_build_report(&report, outline.verbose);
            println!(
                "==> Build complete: {}",
                options.sidebars_file.display()
            );
        }
        Command::Check { outline } => {
            if let Some((validation, _)) = check_stages(&outline)? {
                if validation.invalid_files.is_empty() {
                    println!("==> Outlines are valid");
                } else {
                    println!(
                        "==> {} of {} outline files failed validation",
                        validation.invalid_files.len(),
                        validation.invalid_files.len() + validation.valid_files.len()
                    );
                }
            }
        }
        Command::Schema => {
            print!("{}", validate::DEFAULT_SCHEMA);
        }
    }

    Ok(())
}

fn default_build_command() -> Command {
    Command::Build {
        outline: OutlineArgs {
            patterns: Vec::new(),
            fallback_patterns: default_fallback_patterns(),
            schema: None,
            verbose: false,
        },
        docs: PathBuf::from("docs"),
        sidebars: PathBuf::from("sidebars.js"),
    }
}

/// Run discovery, validation, and duplicate detection. Returns `None` when
/// no outline files matched (not an error — there is just nothing to do).
fn check_stages(
    outline: &OutlineArgs,
) -> Result<Option<(validate::Validation, duplicates::DuplicateReport)>, Box<dyn std::error::Error>>
{
    let root = std::env::current_dir()?;

    println!("==> Stage 1: Resolving outline patterns");
    let outcome =
        patterns::resolve_patterns(&outline.patterns, &outline.fallback_patterns, &root)?;
    output::print_resolution(&outcome);
    if outcome.files.is_empty() {
        return Ok(None);
    }

    println!("==> Stage 2: Validating against schema");
    let schema = validate::load_schema(outline.schema.as_deref())?;
    let validation = validate::validate_files(&outcome.files, &schema)?;
    output::print_validation(&validation, outline.verbose);

    let duplicate_report = duplicates::find_duplicate_labels(&validation.valid_files);
    output::print_duplicates(&duplicate_report);

    Ok(Some((validation, duplicate_report)))
}
