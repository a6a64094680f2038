// External crates
use checker_core::CheckerError;
use checker_logging::{ConsoleStream, LogSettings};
use clap::Parser;
use tracing::error;

// Local modules
mod check;
mod cli;
mod config;
mod context;
mod report;

use cli::Args;
use config::CheckOptions;
use context::RunContext;

fn run(args: &Args, ctx: &RunContext) -> anyhow::Result<i32> {
    let options = CheckOptions::from_args(args)?;
    let outcome = check::execute(&options, ctx)?;
    Ok(outcome.exit_code())
}

fn main() {
    let args = Args::parse();

    let settings = args.log_settings().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}; using default logging settings", e);
        let mut settings = LogSettings::default();
        if args.json {
            settings.console = ConsoleStream::Stderr;
        }
        settings
    });
    let ctx = RunContext::init(&settings);

    let exit_code = match run(&args, &ctx) {
        Ok(code) => code,
        Err(e) => {
            let stage = e
                .downcast_ref::<CheckerError>()
                .map(CheckerError::stage)
                .unwrap_or("setup");
            error!(stage, "{:#}", e);
            1
        }
    };
    report::report_exit(exit_code);

    // process::exit skips destructors; flush the log file first
    drop(ctx);
    std::process::exit(exit_code);
}
