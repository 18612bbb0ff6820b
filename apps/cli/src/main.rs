use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use factlens_core::{
    AnalysisClient, ClientConfig, ResultPresenter, Submission, Tab, format_result_readable,
    save_document,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "factlens=info,factlens_core=info";

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 59.95 {
        format!("{:.1}s", secs)
    } else {
        let total = secs.round() as u64;
        format!("{}m {}s", total / 60, total % 60)
    }
}

/// CLI wrapper for Tab enum (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliTab {
    #[default]
    Transcript,
    Misconceptions,
    Summary,
}

impl From<CliTab> for Tab {
    fn from(cli: CliTab) -> Self {
        match cli {
            CliTab::Transcript => Tab::Transcript,
            CliTab::Misconceptions => Tab::Misconceptions,
            CliTab::Summary => Tab::Summary,
        }
    }
}

#[derive(Parser)]
#[command(name = "factlens")]
#[command(about = "Check a YouTube video's transcript for misinformation")]
struct Cli {
    /// Video URL
    url: String,

    /// Analysis backend base URL. Defaults to $FACTLENS_BACKEND_URL or http://127.0.0.1:8001
    #[arg(short, long)]
    backend: Option<String>,

    /// Write the rendered results page to this HTML file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Tab shown first in the HTML page
    #[arg(short, long, default_value = "transcript")]
    tab: CliTab,

    /// Print the analysis result as JSON instead of the readable report
    #[arg(long)]
    json: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn init_tracing() {
    // stderr keeps log lines out of the report on stdout
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(env_filter)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.backend {
        Some(url) => ClientConfig::new(url.as_str()),
        None => ClientConfig::from_env(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    let client = AnalysisClient::new(&config);
    info!(endpoint = %client.endpoint(), "using analysis backend");

    if !cli.json {
        println!(
            "\n{}  {}\n",
            style("factlens").cyan().bold(),
            style("Misinformation Checker").dim()
        );
    }

    let mut presenter = ResultPresenter::new();
    presenter.switch_tab(cli.tab.into());

    let started = Instant::now();
    let spinner = create_spinner(&format!("Analyzing video via {}...", config.base_url()));
    let submission = presenter.run(&client, &cli.url).await;
    match (&submission, presenter.result()) {
        (Submission::Dispatch(request), Some(_)) => spinner.finish_with_message(format!(
            "{} Analyzed {} {}",
            style("✓").green().bold(),
            style(&request.video_id).yellow(),
            style(format!("[{}]", format_duration(started.elapsed()))).dim()
        )),
        (Submission::Dispatch(_), None) => {
            spinner.finish_with_message(format!("{} Analysis failed", style("✗").red().bold()))
        }
        _ => spinner.finish_and_clear(),
    }

    if let Some(path) = &cli.html {
        save_document(&presenter, path).await?;
        if !cli.json {
            println!("{} {}", style("Saved page:").dim(), style(path.display()).cyan());
        }
    }

    let Some(result) = presenter.result() else {
        let message = presenter.error_text().unwrap_or("Analysis did not complete");
        eprintln!("{} {}", style("Error:").red().bold(), message);
        std::process::exit(1);
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_result_readable(result));

    Ok(())
}
