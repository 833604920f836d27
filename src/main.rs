// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use lexicon::app_config::{self, Config};
use lexicon::app_controller::Controller;
use lexicon::database::models::{LEAF_TOPIC_LEVEL, ROOT_TOPIC_LEVEL};
use lexicon::language_utils::language_label;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import an exchange file, or every .txt exchange file in a directory
    Import {
        /// File or directory to import
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Import a teaching material file
    ImportMaterial {
        /// Material file to parse
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Headword language when the file has no header
        #[arg(long)]
        from: Option<String>,

        /// Translation column languages when the file has no header
        #[arg(long, value_delimiter = ',')]
        to: Option<Vec<String>>,
    },

    /// Export the words of a language to an exchange file
    Export {
        /// Output file
        #[arg(value_name = "OUTPUT_FILE")]
        output_file: PathBuf,

        /// Language to export
        #[arg(short = 'L', long)]
        language: String,

        /// Only export words under this root topic
        #[arg(short, long)]
        root_topic: Option<String>,
    },

    /// List stored source languages, or the translation languages of one
    Languages {
        /// Source language to list translation languages for
        #[arg(long)]
        from: Option<String>,
    },

    /// List topics of a language
    Topics {
        /// Topic language
        #[arg(short = 'L', long)]
        language: Option<String>,

        /// Topic level, 1 for root topics
        #[arg(long, default_value_t = ROOT_TOPIC_LEVEL)]
        level: i32,

        /// Only topics under this root topic id
        #[arg(long)]
        root: Option<i64>,
    },

    /// Delete a language with all of its words and topics
    DeleteLanguage {
        /// Language to delete
        #[arg(value_name = "LANGUAGE")]
        language: String,
    },

    /// Show store statistics
    Stats,

    /// Generate shell completions for lexicon
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lexicon - personal vocabulary store
///
/// Administrative tool for the word store: bulk import and export in the
/// portable exchange format, teaching material import and maintenance.
#[derive(Parser, Debug)]
#[command(name = "lexicon")]
#[command(version)]
#[command(about = "Vocabulary store administration")]
#[command(long_about = "lexicon keeps words, translations and topics in a local SQLite store.

EXAMPLES:
    lexicon import backup.txt                       # Import an exchange file
    lexicon import ./backups/                       # Import every .txt file in a directory
    lexicon import-material german.txt --to en,ru   # Import teaching material
    lexicon export de.txt -L de                     # Export all German words
    lexicon export pets.txt -L de -r Animals        # Export one root topic
    lexicon languages --from de                     # Translation languages of German words
    lexicon topics -L de --level 2                  # List level 2 topics
    lexicon completions bash > lexicon.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Database file, overrides the configuration
    #[arg(short, long, env = "LEXICON_DATABASE", global = true)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "lexicon", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    if let Some(database) = cli.database {
        config.database_path = Some(database);
    }
    log::set_max_level(config.log_level.to_level_filter());

    // Validate the configuration after loading and overriding
    config
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

    let controller = Controller::with_config(config.clone())?;
    run_command(&controller, &config, cli.command).await
}

async fn run_command(controller: &Controller, config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::Import { input_path } => {
            let summary = controller.import_path(&input_path).await?;
            println!("Imported {} words, skipped {}", summary.imported, summary.skipped);
        }
        Commands::ImportMaterial { input_file, from, to } => {
            let mut parse_config = config.material.clone();
            if let Some(from) = from {
                parse_config.from_language = from;
            }
            if let Some(to) = to {
                parse_config.to_languages = to;
            }
            let summary = controller.import_material(&input_file, Some(parse_config)).await?;
            println!("Imported {} words, skipped {}", summary.imported, summary.skipped);
        }
        Commands::Export {
            output_file,
            language,
            root_topic,
        } => {
            let bytes = controller.export(&output_file, &language, root_topic).await?;
            println!("Wrote {} bytes to {}", bytes, output_file.display());
        }
        Commands::Languages { from } => {
            for language in controller.languages(from.as_deref())? {
                println!("{}", language_label(&language));
            }
        }
        Commands::Topics { language, level, root } => {
            for topic in controller.topics(language.as_deref(), root, level)? {
                let id = topic.id.map(|id| id.to_string()).unwrap_or_default();
                match topic.root_name() {
                    Some(root_name) if level >= LEAF_TOPIC_LEVEL => {
                        println!("{:>6}  {} / {}", id, root_name, topic.name)
                    }
                    _ => println!("{:>6}  {}", id, topic.name),
                }
            }
        }
        Commands::DeleteLanguage { language } => {
            let deleted = controller.delete_language(&language).await?;
            println!("Deleted {} words for language {}", deleted, language);
        }
        Commands::Stats => {
            println!("{}", controller.database_path().display());
            println!("{}", controller.stats()?);
        }
        Commands::Completions { .. } => {}
    }

    info!("Done");
    Ok(())
}
