use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use html_audit::config::{Args, Command, Config, ReportFormat};
use html_audit::core::report::{render_json, render_text};
use html_audit::core::SourceTree;
use html_audit::pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let config = Config::from_args(args)?;
    log::info!("Rule profile: {}", config.profile_source);

    let tree = SourceTree::discover(config.input_dir())?;
    let pipeline = Pipeline::with_options(&config.profile, config.clean_options.clone());

    match &config.command {
        Command::Audit { format, .. } => {
            let outcome = pipeline.audit_tree(&tree).await;
            let files = pipeline.collector().snapshot();
            match format {
                ReportFormat::Text => print!("{}", render_text(&files)),
                ReportFormat::Json => println!("{}", render_json(&files)?),
            }

            let flagged = files.values().filter(|d| !d.is_empty()).count();
            log::info!(
                "{} of {} file(s) clean",
                outcome.documents.len().saturating_sub(flagged),
                outcome.documents.len()
            );
            for failure in &outcome.failures {
                log::error!("{}: {}", failure.file_path, failure.error);
            }

            if flagged > 0 || !outcome.failures.is_empty() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Clean { output, no_copy, .. } => {
            let summary = pipeline.clean_tree(&tree, output, !no_copy).await;
            println!(
                "Wrote {} page(s) and copied {} asset(s) to {} ({} diagnostic(s))",
                summary.pages_written,
                summary.assets_copied,
                output.display(),
                summary.diagnostics
            );
            for failure in &summary.failures {
                log::error!("{}: {}", failure.file_path, failure.error);
            }

            if summary.failures.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
