use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use autodemo::config::DemoConfig;
use autodemo::controller::{DemoController, LivenessEvent};
use autodemo::domain::{Script, ViewHandles};
use autodemo::error::DemoError;
use autodemo::runner::{baseline, run_cycle};
use autodemo::view::MemoryPresenter;

#[derive(Parser)]
#[command(
    name = "autodemo",
    about = "Scripted, cancellable autoplay demo sequencer",
    version
)]
struct Cli {
    /// YAML file overriding script timings, copy, and selections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a fixed number of cycles instead of looping until interrupted
    #[arg(long)]
    cycles: Option<u32>,

    /// Render the motionless final frame and exit
    #[arg(long)]
    reduced_motion: bool,

    /// Print the command stream after each cycle
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("autodemo")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("autodemo.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DemoConfig::default(),
    };

    let presenter = Arc::new(MemoryPresenter::new());
    let handles = match ViewHandles::resolve(&*presenter) {
        Ok(handles) => handles,
        Err(DemoError::MissingHandle(names)) => {
            // A page without the demo markup degrades to a silent no-op.
            info!("demo markup incomplete ({names}), not starting");
            return Ok(());
        }
        Err(err) => return Err(err).context("Failed to resolve view handles"),
    };

    if cli.reduced_motion {
        baseline::render_static_final(&*presenter, &handles, &config);
        println!("{}", "Rendered static final frame (reduced motion).".cyan());
        if cli.verbose {
            dump_commands(&presenter);
        }
        return Ok(());
    }

    let script = Script::standard(&config);

    if let Some(cycles) = cli.cycles {
        for n in 1..=cycles {
            println!("{} cycle {}/{}", "Running:".green(), n, cycles);
            let token = CancellationToken::new();
            run_cycle(&*presenter, &handles, &script, &config, &token)
                .await
                .context("Demo cycle failed")?;
            if cli.verbose {
                dump_commands(&presenter);
            }
            tokio::task::yield_now().await;
        }
        println!("{}", "Done.".green());
        return Ok(());
    }

    println!("{}", "Autoplaying demo; press Ctrl-C to stop.".cyan());
    let controller = DemoController::new(presenter.clone(), handles, script, config);
    controller.start(true);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    controller.handle_event(LivenessEvent::Teardown);
    controller.join().await.context("Demo loop failed")?;

    println!("{}", "Stopped.".yellow());
    Ok(())
}

fn dump_commands(presenter: &MemoryPresenter) {
    for command in presenter.take_commands() {
        println!("  {:?}", command);
    }
}
