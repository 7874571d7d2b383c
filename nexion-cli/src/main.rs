//! # nexion CLI
//!
//! Command-line interface for the Nexion documentation site core.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nexion")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "nexion.yml", env = "NEXION_CONFIG")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the documentation pages
    Docs {
        #[command(subcommand)]
        command: DocsCommands,
    },

    /// Resolve translations and manage the active language
    I18n {
        #[command(subcommand)]
        command: I18nCommands,
    },

    /// Check translations and documents, emitting diagnostics
    Verify {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new Nexion docs project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum DocsCommands {
    /// List all documents in navigation order
    List {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single document
    Show {
        /// Document slug (file name without extension)
        slug: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = DocFormat::Text)]
        format: DocFormat,

        /// Language for UI text (does not change the saved preference)
        #[arg(long)]
        lang: Option<String>,

        /// Scroll to the heading with this id
        #[arg(long)]
        anchor: Option<String>,
    },

    /// Print a document's table of contents
    Toc {
        /// Document slug
        slug: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Language for UI text (does not change the saved preference)
        #[arg(long)]
        lang: Option<String>,
    },
}

#[derive(Subcommand)]
enum I18nCommands {
    /// Resolve a translation key
    Get {
        /// Dotted key path, e.g. nav.home
        key: String,

        /// Language to resolve in (does not change the saved preference)
        #[arg(long)]
        lang: Option<String>,

        /// Print structured values (lists, tables) as YAML
        #[arg(long)]
        object: bool,
    },

    /// Show the active language, or switch to another one
    Lang {
        /// Language code to activate, e.g. en or zh
        code: Option<String>,
    },

    /// List supported languages
    Languages,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DocFormat {
    Text,
    Html,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays machine-readable
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Docs { command } => match command {
            DocsCommands::List { json } => commands::list_docs(&cli.config, json),
            DocsCommands::Show {
                slug,
                format,
                lang,
                anchor,
            } => {
                let opts = commands::ShowOptions {
                    format,
                    lang,
                    anchor,
                };
                commands::show_doc(&cli.config, &slug, opts)
            }
            DocsCommands::Toc { slug, json, lang } => {
                commands::show_toc(&cli.config, &slug, json, lang.as_deref())
            }
        },
        Commands::I18n { command } => match command {
            I18nCommands::Get { key, lang, object } => {
                commands::get_translation(&cli.config, &key, lang.as_deref(), object)
            }
            I18nCommands::Lang { code } => commands::active_language(&cli.config, code.as_deref()),
            I18nCommands::Languages => commands::list_languages(&cli.config),
        },
        Commands::Verify { json } => commands::verify_site(&cli.config, json),
        Commands::Init { path } => commands::init_project(path.as_deref()),
    }
}
