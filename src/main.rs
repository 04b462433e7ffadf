use anyhow::Result;

use scrim_balancer::cli::Command;
use scrim_balancer::{
    handle_balance, handle_compare, handle_completions, handle_metrics, handle_record_match,
    handle_serve, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
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
        Command::Metrics { filter } => handle_metrics(filter.as_deref()),
        Command::Compare { team_a, team_b, filter } => {
            handle_compare(team_a, team_b, filter.as_deref())
        }
        Command::Balance { players, positions, recent_form, filter } => {
            handle_balance(players, *positions, *recent_form, filter.as_deref())
        }
        Command::RecordMatch { player, position, won, time } => {
            handle_record_match(player, position, *won, time.as_deref())
        }
        Command::Completions { shell } => handle_completions(*shell),
    }
}
