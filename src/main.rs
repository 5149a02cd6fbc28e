//! fmshell - An interactive line-oriented file manager shell
//!
//! Starts a session in the user's home directory and reads commands from
//! stdin until `.exit`, end-of-input or Ctrl+C.

use std::env;
use std::process;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, error, info};

use fmshell::config::{AppArgs, Invocation};
use fmshell::output::{run_printer, Output};
use fmshell::{commands, Config, Platform, Session, Shell};

/// Print help information
fn print_help() {
    println!("{} - {}", fmshell::NAME, fmshell::DESCRIPTION);
    println!();
    println!("USAGE:");
    println!("    fmshell [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --username=<NAME>      Name used in the welcome and farewell messages");
    println!("    --chunk-size=<BYTES>   Read/write chunk size for stream operations");
    println!("    -d, --debug            Enable debug logging");
    println!("    -?, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("COMMANDS:");
    println!("{}", commands::usage());
    println!();
    println!("ENVIRONMENT:");
    println!("    FMSHELL_DEBUG          Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn init_logging(config: &Config) {
    let env_filter =
        env::var("RUST_LOG").unwrap_or_else(|_| config.default_log_level().to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let system = Platform::system();
    let home = system
        .home_dir()
        .map_err(|e| debug!("No home directory: {}", e))
        .ok();
    let session = Session::at_home(config.username.clone(), home)
        .context("Failed to open a starting directory")?;

    let (output, rx) = Output::channel();
    let printer = tokio::spawn(run_printer(rx, tokio::io::stdout()));

    let shell = Shell::new(config, session, output, system);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let reason = shell.run_until(stdin, interrupted()).await;
    info!("Session closed: {}", reason);

    match printer.await.context("Printer task failed")? {
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            debug!("Stdout closed early: {}", e);
            Ok(())
        }
        other => other.context("Failed to write output"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = AppArgs::parse(env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("Failed to parse arguments: {}", e);
        print_help();
        process::exit(1);
    });

    let mut config = match args.invocation.clone() {
        Invocation::Run(config) => config,
        Invocation::Help => {
            print_help();
            return Ok(());
        }
        Invocation::Version => {
            println!("{} v{}", fmshell::NAME, fmshell::VERSION);
            return Ok(());
        }
    };

    config.apply_env(|key| env::var(key).ok());
    init_logging(&config);
    args.log_ignored();

    info!("Starting {} v{}", fmshell::NAME, fmshell::VERSION);
    debug!(
        "Effective configuration: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build the async runtime")?;
    let result = runtime.block_on(run(config));

    // A blocking stdin read may still be parked; don't wait for it.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}
