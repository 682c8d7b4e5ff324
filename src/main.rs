//! qrlogo entrypoint

use anyhow::Context;
use clap::Parser;
use console::Term;
use qrlogo::output::{RenderedOutcome, render_failure, render_report};
use qrlogo::{GenerationRequest, InteractiveSession, QrLogoConfig, QrPipeline, logging, path};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "qrlogo",
    version,
    about = "Generate QR codes with an optional centered logo"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrlogo.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Text or URL to encode; generates once and exits instead of prompting
    #[arg(long, value_name = "TEXT")]
    data: Option<String>,

    /// Logo image to paste in the center (with --data)
    #[arg(long, value_name = "PATH", requires = "data")]
    logo: Option<String>,

    /// Output PNG file or directory (with --data). Defaults to the current directory
    #[arg(long, value_name = "PATH", requires = "data")]
    output: Option<String>,

    /// Print the result as JSON (with --data)
    #[arg(long, requires = "data")]
    json: bool,

    /// Decode the written file and check it matches the input
    #[arg(long)]
    verify: bool,

    /// Override pixels per QR module
    #[arg(long, value_name = "PX")]
    box_size: Option<u32>,

    /// Override quiet zone width in modules
    #[arg(long, value_name = "MODULES")]
    border: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        QrLogoConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(box_size) = cli.box_size {
        config.render.box_size = box_size;
    }
    if let Some(border) = cli.border {
        config.render.border = border;
    }
    if cli.verify {
        config.verify = true;
    }
    config.render.clamp();

    logging::init(&config.logging).context("Failed to initialise logging")?;
    tracing::debug!(?config, "Starting qrlogo");

    let pipeline = QrPipeline::new(config.render).with_verification(config.verify);

    match cli.data {
        Some(data) => generate_once(
            &pipeline,
            data,
            cli.logo.as_deref(),
            cli.output.as_deref(),
            cli.json,
        ),
        None => {
            let summary = InteractiveSession::new(Term::stdout(), pipeline).run();
            tracing::info!(
                generated = summary.generated,
                failed = summary.failed,
                "Session finished"
            );
            Ok(())
        }
    }
}

fn generate_once(
    pipeline: &QrPipeline,
    data: String,
    logo: Option<&str>,
    output: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let logo_path = logo
        .and_then(|raw| path::unquote(raw).into_iter().next())
        .map(PathBuf::from);
    let output_path = path::resolve(output.unwrap_or_default());

    let outcome = GenerationRequest::new(data, logo_path, output_path)
        .and_then(|request| pipeline.generate(request));

    match outcome {
        Ok(report) => {
            emit(&render_report(&report), json)?;
            Ok(())
        }
        Err(err) => {
            emit(&render_failure(&err), json)?;
            Err(err).context("QR generation failed")
        }
    }
}

fn emit(rendered: &RenderedOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }
    Ok(())
}
