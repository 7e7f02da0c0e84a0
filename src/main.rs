use clap::Parser;
use colored::*;
use dnsleak::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(error) = run(cli).await {
        log::error!("{:?}", error);
        eprintln!("{} {}", "error:".red().bold(), error);
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> Result<()> {
    let api = api::LeakTestClient::new(&cli.api_url)?;
    let lookup = Arc::new(cli.resolver.to_lookup());
    let test = runner::LeakTest::new(cli.num_runs).with_domain_suffix(cli.domain_suffix.as_str());

    let pb = ProgressBar::new(cli.num_runs as u64);
    pb.set_style(
        ProgressStyle::with_template("Testing {msg}")
            .map_err(|e| LeakTestError::Other(format!("Invalid progress template: {}", e)))?,
    );

    let body = test
        .run(&api, lookup, |completed, total| {
            pb.set_position(completed as u64);
            pb.set_message(utils::format_progress(completed, total));
        })
        .await?;
    pb.finish();

    if cli.json_output {
        print_results_json(&body)
    } else {
        print_results_human(&body)
    }
}

fn print_results_human(body: &[u8]) -> Result<()> {
    let list = report::render_body(body)?;
    println!();
    println!("{}", report::REPORT_HEADING.bold());
    print!("{list}");
    Ok(())
}

fn print_results_json(body: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(body)?;
    stdout.flush()?;
    Ok(())
}
