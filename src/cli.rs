use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "scrim team balancer")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Fetch and print rating metrics for every roster player
    Metrics {
        /// Rating window: all, 2025 or 2024-2025
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Compare two hand-picked teams
    Compare {
        /// Comma separated player names
        #[arg(long, value_delimiter = ',', required = true)]
        team_a: Vec<String>,
        /// Comma separated player names
        #[arg(long, value_delimiter = ',', required = true)]
        team_b: Vec<String>,
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Split eight players into the two most even teams of four
    Balance {
        /// Comma separated player names (exactly eight)
        #[arg(long, value_delimiter = ',', required = true)]
        players: Vec<String>,
        /// Assign flank/pocket roles using position multipliers
        #[arg(long)]
        positions: bool,
        /// Scale ratings by recent form
        #[arg(long)]
        recent_form: bool,
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Add a played match to the local match log
    RecordMatch {
        /// Roster name of the player
        #[arg(long)]
        player: String,
        /// flank or pocket
        #[arg(long)]
        position: String,
        /// The player's team won
        #[arg(long)]
        won: bool,
        /// Match time (defaults to now), e.g. 2025-03-01T20:00:00
        #[arg(long)]
        time: Option<String>,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}
