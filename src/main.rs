use anyhow::Result;

use court_officials::cli::Command;
use court_officials::{handle_init_db, handle_serve, handle_settle, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::InitDb => handle_init_db(),
        Command::Settle {
            start,
            end,
            referee,
        } => handle_settle(start, end, *referee),
    }
}
