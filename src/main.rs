use std::{error::Error, process};

use clap::{command, Parser, Subcommand};
use log::{debug, error, info, LevelFilter};

use spotilocal::{config::Config, session::Session};

/// Profile to display when not built in release mode.
#[cfg(debug_assertions)]
const BUILD_PROFILE: &str = "debug";
/// Profile to display when built in release mode.
#[cfg(not(debug_assertions))]
const BUILD_PROFILE: &str = "release";

/// Group name for mutually exclusive logging options.
const ARGS_GROUP_LOGGING: &str = "logging";

/// Command line arguments as parsed by `clap`.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Long-poll timeout in seconds for `listen`
    #[arg(short, long, value_name = "SECONDS")]
    wait: Option<u64>,

    /// Suppresses all output except warnings and errors.
    #[arg(short, long, default_value_t = false, group = ARGS_GROUP_LOGGING)]
    quiet: bool,

    /// Enable verbose logging
    ///
    /// Specify twice for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count, group = ARGS_GROUP_LOGGING)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Print the current player status
    Status,
    /// Pause playback
    Pause,
    /// Resume playback
    Unpause,
    /// Play a Spotify URI
    Play {
        /// URI to play, e.g. spotify:track:5Yn8WCB4Dqm8snemB5Mu4K
        uri: String,
    },
    /// Skip to the next track (media key injection)
    Skip,
    /// Go back to the start of the track or the previous track
    Previous,
    /// Print version information of the local client
    Version,
    /// Poll for status changes until interrupted
    Listen,
}

/// Initializes the logger facade.
///
/// The logging level is determined as follows, in order of precedence from
/// highest to lowest:
/// 1. Command line arguments
/// 2. `RUST_LOG` environment variable
/// 3. Hard coded default
///
/// # Panics
///
/// Panics when a logger facade is already initialized.
fn init_logger(args: &Args) {
    let mut logger = env_logger::Builder::from_env(
        // Note: if you change the default logging level here, then you
        // should probably also change the verbosity levels below.
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    if args.quiet || args.verbose > 0 {
        let level = match args.verbose {
            0 => {
                // Quiet and verbose are mutually exclusive, and `verbose`
                // is 0 by default. So this arm means: quiet mode.
                LevelFilter::Warn
            }
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        // Filter log messages of external crates.
        logger.filter_module(module_path!(), level);
        logger.filter_module("spotilocal", level);
    }

    logger.init();
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::default();
    let mut session = Session::new(config)?;

    // Media key injection and the version endpoint need no handshake;
    // everything else does.
    if matches!(
        &args.command,
        Command::Status | Command::Pause | Command::Unpause | Command::Play { .. } | Command::Listen
    ) {
        session.connect().await?;
    }

    match args.command {
        Command::Skip => session.skip()?,
        Command::Previous => session.previous()?,
        Command::Version => {
            let version = session.version().await?;
            println!("{version:#}");
        }
        Command::Status => {
            let status = session.get_current_status().await?;
            println!("{status:#}");
        }
        Command::Pause => session.pause(true).await?,
        Command::Unpause => session.unpause().await?,
        Command::Play { uri } => {
            let result = session.play_uri(&uri).await?;
            println!("{result:#}");
        }
        Command::Listen => {
            session.on_status_change += |status: &serde_json::Value| {
                println!("{status:#}");
            };
            session.listen_for_events(args.wait)?;

            tokio::signal::ctrl_c().await?;
            info!("shutting down gracefully");
            session.disconnect().await?;
        }
    }

    Ok(())
}

/// Main entry point of the application.
///
/// This function initializes the logger facade, parses the command line
/// arguments, and runs the requested control call.
#[tokio::main]
async fn main() {
    // `clap` handles our command line arguments and help text.
    let args = Args::parse();
    init_logger(&args);

    // Dump command line arguments before we do anything more.
    // This aids in debugging of whatever comes next.
    debug!("Command {:#?}", args);

    let cmd = command!();
    let name = cmd.get_name().to_string();
    let version = cmd.get_version().unwrap_or("UNKNOWN").to_string();

    info!("starting {name}/{version}; {BUILD_PROFILE}");

    if let Err(e) = run(args).await {
        error!("{e}");
        process::exit(1);
    }
}
