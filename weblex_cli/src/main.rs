//! # weblex CLI
//!
//! Tokenizes one file with the lexer named by alias and prints the tokens.

mod catalog;
mod output;
mod source;

use catalog::Language;
use clap::Parser;
use source::{SourceError, SourceReader};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use weblex_engine::config::runtime::{parse_log_level, RuntimeConfig};
use weblex_engine::lexical::{init_engine_preferences, init_lexical_logging};
use weblex_engine::logging::{
    self, codes, Code, LogEvent, LogLevel, Logger, LoggingService, StructuredLogger,
};
use weblex_engine::{
    log_error, log_info, log_success, validate_tokenization, CoverageViolation, LexerOptions,
    OptionError, TableError, Token,
};
use weblex_lexers::{styles, StyleError, StyleSheet};

fn main() {
    if let Err(err) = Cli::parse().run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    Raw,
    Json,
}

/// Tokenize a web-language source file.
///
/// Tokens are printed one per line as `Token.<category>` and the quoted text, or as a JSON
/// array. `--scores` prints every language's content score instead.
#[derive(Debug, clap::Parser)]
#[command(name = "weblex", version, about, long_about, max_term_width(100))]
struct Cli {
    /// Source file to tokenize.
    file: PathBuf,

    /// Lexer alias, e.g. `js`, `php`, `scss`.
    #[arg(short, long, required_unless_present = "scores")]
    lexer: Option<String>,

    /// Lexer option as `key=value`; may be repeated.
    #[arg(short = 'O', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Raw)]
    format: Format,

    /// Attach resolved styles from this style sheet to JSON output.
    #[arg(short, long)]
    style: Option<String>,

    /// Check that the tokens partition the input exactly.
    #[arg(long)]
    verify: bool,

    /// Print every language's content score instead of tokens.
    #[arg(long)]
    scores: bool,

    /// Minimum level of diagnostics written to stderr (error, warn, info, debug).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log a debug event for every character no rule matched.
    #[arg(long)]
    trace_fallback: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("no lexer for alias '{alias}'")]
    UnknownLexer { alias: String },

    #[error("unknown style '{name}'")]
    UnknownStyle { name: String },

    #[error(transparent)]
    Options(#[from] OptionError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("tokens do not cover the input: {0}")]
    Coverage(CoverageViolation),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn error_code(&self) -> Code {
        match self {
            CliError::Logging(_) | CliError::UnknownLogLevel(_) => {
                codes::system::INITIALIZATION_FAILURE
            }
            CliError::Source(e) => e.error_code(),
            CliError::UnknownLexer { .. } | CliError::UnknownStyle { .. } => {
                codes::source::UNKNOWN_LEXER
            }
            CliError::Options(e) => e.error_code(),
            CliError::Table(e) => e.error_code(),
            CliError::Style(e) => e.error_code(),
            CliError::Coverage(_) => codes::source::COVERAGE_VIOLATION,
            CliError::Io(_) | CliError::Json(_) => codes::source::IO_ERROR,
        }
    }
}

impl Cli {
    fn run(self) -> Result<(), CliError> {
        let config = self.runtime_config()?;
        init_logging(&config)?;
        self.execute(&config).inspect_err(|err| {
            log_error!(err.error_code(), "weblex failed", "error" => err);
        })
    }

    /// Environment preferences with the command-line overrides applied
    fn runtime_config(&self) -> Result<RuntimeConfig, CliError> {
        let mut config = RuntimeConfig::default();
        if let Some(name) = &self.log_level {
            config.logging.min_log_level =
                parse_log_level(name).ok_or_else(|| CliError::UnknownLogLevel(name.clone()))?;
        }
        if self.trace_fallback {
            config.engine.log_fallback_tokens = true;
        }
        Ok(config)
    }

    fn execute(&self, config: &RuntimeConfig) -> Result<(), CliError> {
        let file_path = self.file.display().to_string();
        let source = SourceReader::from_preferences(&config.source).read(&file_path)?;
        let mut out = io::stdout().lock();

        if self.scores {
            output::write_scores(&mut out, &catalog::scores(&source.text))?;
            return Ok(());
        }

        let language = self.choose_language()?;
        let options = LexerOptions::from_assignments(&self.options)?;
        let lexer = (language.build)(&options)?;
        for problem in lexer.option_errors() {
            eprintln!("warning: {problem}");
        }
        log_info!("Lexer selected", "lexer" => language.name(), "file" => &file_path);

        let tokens: Vec<Token<'_>> = logging::with_source_context(&source.path, || {
            lexer.tokenize(&source.text).collect()
        });
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization complete",
            "lexer" => language.name(),
            "tokens" => tokens.len());

        if self.verify {
            verify(&source.text, &tokens)?;
        }

        match self.format {
            Format::Raw => output::write_raw(&mut out, &tokens)?,
            Format::Json => {
                let sheet = self.style.as_deref().map(style_by_name).transpose()?;
                output::write_json(&mut out, &tokens, sheet.as_ref())?;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn choose_language(&self) -> Result<&'static Language, CliError> {
        let alias = self.lexer.as_deref().unwrap_or_default();
        catalog::by_alias(alias).ok_or_else(|| CliError::UnknownLexer {
            alias: alias.to_string(),
        })
    }
}

fn init_logging(config: &RuntimeConfig) -> Result<(), CliError> {
    logging::config::init_runtime_preferences(config.logging.clone()).map_err(CliError::Logging)?;
    init_engine_preferences(config.engine.clone()).map_err(CliError::Logging)?;
    let level = logging::config::get_effective_log_level();

    let logger: Arc<dyn Logger> = if logging::config::use_structured_logging() {
        Arc::new(StructuredLogger::new(level))
    } else {
        env_logger::Builder::new()
            .filter_level(LogBridge::level_filter(level))
            .format_target(false)
            .try_init()
            .map_err(|e| CliError::Logging(e.to_string()))?;
        Arc::new(LogBridge)
    };

    let service = LoggingService::new(logger, level);
    logging::init_global_logging_with_service(Arc::new(service)).map_err(CliError::Logging)?;
    init_lexical_logging().map_err(CliError::Logging)
}

fn verify(text: &str, tokens: &[Token<'_>]) -> Result<(), CliError> {
    match validate_tokenization(text, tokens) {
        Ok(()) => {
            log_success!(codes::success::COVERAGE_VERIFIED, "Tokens cover the input",
                "tokens" => tokens.len(),
                "bytes" => text.len());
            Ok(())
        }
        Err(violation) => {
            log_error!(codes::source::COVERAGE_VIOLATION, "Tokens do not cover the input",
                span = violation.span(),
                "violation" => &violation);
            Err(CliError::Coverage(violation))
        }
    }
}

fn style_by_name(name: &str) -> Result<StyleSheet, CliError> {
    match name.to_ascii_lowercase().as_str() {
        "murphy" => Ok(styles::murphy()?),
        _ => Err(CliError::UnknownStyle {
            name: name.to_string(),
        }),
    }
}

/// Hands engine events to the `log` facade so `env_logger` renders them
struct LogBridge;

impl LogBridge {
    fn level(level: LogLevel) -> log::Level {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }

    fn level_filter(level: LogLevel) -> log::LevelFilter {
        Self::level(level).to_level_filter()
    }

    fn render(event: &LogEvent) -> String {
        let mut line = event.format();
        let mut context: Vec<_> = event.context.iter().collect();
        context.sort();
        for (key, value) in context {
            line.push_str(&format!(" {key}={value}"));
        }
        line
    }
}

impl Logger for LogBridge {
    fn log(&self, event: &LogEvent) {
        log::log!(Self::level(event.level), "{}", Self::render(event));
    }
}
