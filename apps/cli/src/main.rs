mod cli;
mod config;
mod main_lib;

use std::process::ExitCode;

use clap::Parser;
use cli::Args;
use config::Config;
use main_lib::{error_message, init_tracing, run};

fn main() -> ExitCode {
    let config = Config::from_env();
    init_tracing();
    let args = Args::parse();

    match run(&args, &config) {
        Ok(outcome) => {
            let summary = outcome.result.summary();
            println!("New investments:        {}", summary.new);
            println!("Updated investments:    {}", summary.updated);
            println!("Deprecated investments: {}", summary.deprecated);
            let output_path =
                std::path::absolute(&outcome.output_path).unwrap_or(outcome.output_path);
            println!("Results saved to {}", output_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", error_message(&err));
            ExitCode::FAILURE
        }
    }
}
