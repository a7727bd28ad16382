// Toolbelt unified binary: one CLI hosting the independent helpers.

use clap::{Parser, Subcommand};

use toolbelt::array;
use toolbelt::commander::Commander;
use toolbelt::logger::{FailureMode, FileLogger};
use toolbelt::security;
use toolbelt::timer::{CountdownOutcome, CountdownTimer};
use toolbelt::utils::console::Console;
use toolbelt::utils::constants::DEFAULT_LOG_FILE;
use toolbelt::utils::interactive;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Personal utility toolbelt")]
#[clap(propagate_version = true)]
struct ToolbeltCli {
    #[clap(subcommand)]
    command: Commands,

    /// Suppress non-error output
    #[clap(long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report min/max of an integer sequence
    Stats {
        /// Values to scan
        #[clap(required = true, allow_negative_numbers = true)]
        values: Vec<i32>,
    },

    /// Hash a password with a fresh random salt
    Hash {
        /// Password to hash
        password: String,
    },

    /// Verify a password against an encoded hash record
    Verify {
        /// Password to check
        password: String,

        /// Encoded record produced by `hash`
        hash: String,
    },

    /// Run an awaitable countdown (Ctrl-C stops it early)
    Countdown {
        /// Seconds to count down from
        seconds: u32,
    },

    /// Append to or clear the log file
    Log {
        #[clap(subcommand)]
        command: LogCommands,
    },

    /// Start the interactive command shell
    Shell,
}

#[derive(Subcommand, Debug)]
enum LogCommands {
    /// Append a timestamped message
    Write {
        /// Message to append
        message: String,

        /// Log file path
        #[clap(long, default_value = DEFAULT_LOG_FILE)]
        file: String,

        /// Exit the process on I/O failure instead of reporting it
        #[clap(long)]
        fatal: bool,
    },

    /// Truncate the log file
    Clear {
        /// Log file path
        #[clap(long, default_value = DEFAULT_LOG_FILE)]
        file: String,

        /// Skip the confirmation prompt
        #[clap(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = ToolbeltCli::parse();

    // Set environment variables based on global flags
    if cli.quiet {
        std::env::set_var("TOOLBELT_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("TOOLBELT_VERBOSE", "1");
    }

    match cli.command {
        Commands::Stats { values } => handle_stats(&values),
        Commands::Hash { password } => handle_hash(&password),
        Commands::Verify { password, hash } => handle_verify(&password, &hash),
        Commands::Countdown { seconds } => handle_countdown(seconds).await,
        Commands::Log { command } => handle_log(command),
        Commands::Shell => handle_shell(),
    }
}

fn handle_stats(values: &[i32]) -> Result<(), Box<dyn std::error::Error>> {
    let (min, min_index) = array::min(values)?;
    let (max, max_index) = array::max(values)?;

    array::print_array(values);
    Console::detail("min", &format!("{} at index {}", min, min_index));
    Console::detail("max", &format!("{} at index {}", max, max_index));
    Ok(())
}

fn handle_hash(password: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Raw record on stdout so it can be piped or stored
    println!("{}", security::hash(password));
    Ok(())
}

fn handle_verify(password: &str, encoded: &str) -> Result<(), Box<dyn std::error::Error>> {
    if security::verify(password, encoded)? {
        Console::success("password matches");
        Ok(())
    } else {
        Console::error("password does not match");
        std::process::exit(1);
    }
}

async fn handle_countdown(seconds: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut timer = CountdownTimer::new();
    timer.start(seconds)?;
    Console::info(&format!("counting down from {}s", seconds));

    // Ctrl-C requests a cooperative stop rather than killing the process
    let stopper = timer.stop_handle()?;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stopper.stop();
        }
    });

    match timer.wait().await? {
        CountdownOutcome::Completed => Console::success("countdown complete"),
        CountdownOutcome::Cancelled { remaining } => {
            Console::warning(&format!("stopped with {}s remaining", remaining))
        }
    }
    Ok(())
}

fn handle_log(command: LogCommands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        LogCommands::Write {
            message,
            file,
            fatal,
        } => {
            let mode = if fatal {
                FailureMode::Fatal
            } else {
                FailureMode::Propagate
            };
            let logger = FileLogger::with_mode(&file, mode)?;
            logger.log(&message)?;
            Console::success(&format!("logged to {}", file));
        }
        LogCommands::Clear { file, yes } => {
            if !yes && !interactive::confirm_action(&format!("Clear log file '{}'?", file), false)?
            {
                Console::info("aborted");
                return Ok(());
            }
            let logger = FileLogger::open(&file)?;
            logger.clear()?;
            Console::success(&format!("cleared {}", file));
        }
    }
    Ok(())
}

fn handle_shell() -> Result<(), Box<dyn std::error::Error>> {
    let mut commander = Commander::new();

    commander.register("echo", 1, |args| Ok(Some(args[0].clone())))?;

    commander.register("hash", 1, |args| Ok(Some(security::hash(&args[0]))))?;

    commander.register("verify", 2, |args| {
        match security::verify(&args[0], &args[1]) {
            Ok(true) => Ok(Some("match".to_string())),
            Ok(false) => Ok(Some("no match".to_string())),
            Err(e) => Err(e.to_string()),
        }
    })?;

    commander.register("min", 3, |args| {
        let values = parse_ints(args)?;
        let (value, index) = array::min(&values).map_err(|e| e.to_string())?;
        Ok(Some(format!("{} at index {}", value, index)))
    })?;

    commander.register("max", 3, |args| {
        let values = parse_ints(args)?;
        let (value, index) = array::max(&values).map_err(|e| e.to_string())?;
        Ok(Some(format!("{} at index {}", value, index)))
    })?;

    let logger = FileLogger::open(DEFAULT_LOG_FILE)?;
    commander.register("log", 1, move |args| {
        logger.log(&args[0]).map_err(|e| e.to_string())?;
        Ok(None)
    })?;

    Console::section("Toolbelt shell");
    Console::detail("commands", &commander.names().join(", "));
    Console::detail("quit", "exit");

    commander.start()?;
    Ok(())
}

fn parse_ints(args: &[String]) -> Result<Vec<i32>, String> {
    args.iter()
        .map(|arg| {
            arg.parse::<i32>()
                .map_err(|_| format!("not an integer: '{}'", arg))
        })
        .collect()
}
