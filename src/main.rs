// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use psa::{
    build_announcers, AnnounceConfig, AnnouncementComposer, AnnouncementDelivery,
    CommandLineInput, DispatchSummary, Dispatcher,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let (log_level, pattern) = if verbose {
        (LevelFilter::Debug, "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}")
    } else {
        (LevelFilter::Info, "{d(%Y/%m/%d %H:%M:%S)} {m}{n}")
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(log_level))?;

    log4rs::init_config(config)?;
    Ok(())
}

/// Executes one announcement run: configure → render → dispatch → report.
async fn execute(cli: &CommandLineInput) -> anyhow::Result<()> {
    let config = AnnounceConfig::from_env().context("configuration error")?;

    let announcement = config
        .compose(&cli.message)
        .context("failed to render announcement")?;
    log::info!("PSA: {}", announcement);

    let announcers = build_announcers(&config, cli.timeout())?;
    if cli.verbose {
        log::info!("{} announcers configured", announcers.len());
    }

    if cli.dryrun {
        log::info!("dry run complete, exiting");
        return Ok(());
    }

    let dispatcher = Dispatcher::new(announcers).verbose(cli.verbose);
    let summary = dispatcher.deliver(&announcement).await;
    report_completion(&summary);

    Ok(())
}

/// Logs the final aggregate line. Delivery failures never fail the run.
fn report_completion(summary: &DispatchSummary) {
    if summary.is_success() {
        log::info!("all announcers succeeded");
    } else {
        log::warn!("{} announcers reported errors", summary.failure_count());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    execute(&cli).await
}
