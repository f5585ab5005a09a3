use std::path::{Path, PathBuf};

use anyhow::Context;
use quarterly_diff_core::{
    ComparisonOutcome, ComparisonService, ComparisonServiceTrait, ParserConfig, ReportFormat,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Args;
use crate::config::{Config, DEFAULT_OUTPUT_PATH};

pub fn init_tracing() {
    let log_format = std::env::var("QD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Parser configuration: the JSON file from the flag or the environment,
/// defaults otherwise, with the layout flag applied on top.
pub fn load_parser_config(args: &Args, config: &Config) -> anyhow::Result<ParserConfig> {
    let parser_config = match args.config.as_ref().or(config.parser_config_path.as_ref()) {
        Some(path) => ParserConfig::from_file(path)
            .with_context(|| format!("Failed to load layout configuration {}", path.display()))?,
        None => ParserConfig::default(),
    };

    Ok(match args.layout.publisher() {
        Some(publisher) => parser_config.with_publisher(Some(publisher)),
        None => parser_config,
    })
}

/// CSV reports go to a directory, so the default `.xlsx` file name loses its
/// extension there.
pub fn resolve_output_path(args: &Args, config: &Config, format: ReportFormat) -> PathBuf {
    match &args.output {
        Some(path) => path.clone(),
        None if format == ReportFormat::Csv
            && config.output_path == Path::new(DEFAULT_OUTPUT_PATH) =>
        {
            config.output_path.with_extension("")
        }
        None => config.output_path.clone(),
    }
}

pub fn build_service(args: &Args, config: &Config) -> anyhow::Result<ComparisonService> {
    let parser_config = load_parser_config(args, config)?;
    let format = ReportFormat::from(args.format);
    tracing::debug!("Writing {} reports", format);
    Ok(ComparisonService::new(parser_config, format.writer()))
}

/// The error as shown to the user: every context layer down to the root cause.
pub fn error_message(err: &anyhow::Error) -> String {
    format!("{:#}", err)
}

pub fn run(args: &Args, config: &Config) -> anyhow::Result<ComparisonOutcome> {
    let service = build_service(args, config)?;
    let output_path = resolve_output_path(args, config, ReportFormat::from(args.format));
    tracing::info!(
        "Comparing {} against {}",
        args.current.display(),
        args.previous.display()
    );

    let outcome = service.compare_and_write(&args.previous, &args.current, &output_path)?;
    Ok(outcome)
}
