pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod rate_limiter;
pub mod rating;
pub mod services;

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;

use crate::cli::Command;
use crate::config::{AppConfig, Roster};
use crate::database::{matches, setup, DbPool};
use crate::domain::MatchRecord;
use crate::rating::{ModifierToggles, RatingFilter, Role};
use crate::services::collector;
use crate::services::comparison::compare_teams;
use crate::services::report;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

struct Workspace {
    config: AppConfig,
    roster: Roster,
    pool: DbPool,
}

impl Workspace {
    fn load() -> Result<Self> {
        let config = AppConfig::from_env();
        let roster = Roster::load(&config.roster_path)?;
        let pool = database::create_pool(&config.database_path)?;
        setup::ensure_schema(&mut database::get_connection(&pool)?)?;
        Ok(Self { config, roster, pool })
    }

    fn filter(&self, filter: Option<&str>) -> Result<RatingFilter> {
        match filter {
            Some(value) => Ok(value.parse::<RatingFilter>()?),
            None => Ok(self.config.balance.default_filter),
        }
    }
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_metrics(filter: Option<&str>) -> Result<()> {
    let ctx = Workspace::load()?;
    let filter = ctx.filter(filter)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let profiles = runtime.block_on(collector::load_profiles(
        &ctx.config,
        &ctx.roster,
        &ctx.pool,
        ctx.roster.players(),
        filter,
        ModifierToggles::default(),
    ))?;

    print!("{}", report::render_players(&profiles));
    Ok(())
}

pub fn handle_compare(team_a: &[String], team_b: &[String], filter: Option<&str>) -> Result<()> {
    let ctx = Workspace::load()?;
    let filter = ctx.filter(filter)?;

    let mut names = team_a.to_vec();
    names.extend(team_b.iter().cloned());
    let players = ctx.roster.select(&names)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let profiles = runtime.block_on(collector::load_profiles(
        &ctx.config,
        &ctx.roster,
        &ctx.pool,
        &players,
        filter,
        ModifierToggles::default(),
    ))?;

    let pick = |team: &[String]| {
        profiles
            .iter()
            .filter(|p| team.contains(&p.name))
            .map(|p| p.metrics.clone())
            .collect::<Vec<_>>()
    };
    let comparison = compare_teams(&pick(team_a), &pick(team_b))?;

    print!("{}", report::render_comparison(&comparison));
    Ok(())
}

pub fn handle_balance(
    players: &[String],
    positions: bool,
    recent_form: bool,
    filter: Option<&str>,
) -> Result<()> {
    let ctx = Workspace::load()?;
    let filter = ctx.filter(filter)?;
    let selected = ctx.roster.select(players)?;
    let toggles = ModifierToggles {
        use_positions: positions,
        use_recent_performance: recent_form,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let profiles = runtime.block_on(collector::load_profiles(
        &ctx.config,
        &ctx.roster,
        &ctx.pool,
        &selected,
        filter,
        toggles,
    ))?;

    let result = rating::find_balanced_teams(&profiles, toggles)?;
    print!("{}", report::render_balance(&result));
    Ok(())
}

pub fn handle_record_match(player: &str, position: &str, won: bool, time: Option<&str>) -> Result<()> {
    let ctx = Workspace::load()?;
    let profile_id = ctx
        .roster
        .find(player)
        .map(|p| p.profile_id)
        .with_context(|| format!("Unknown player: {}", player))?;

    let record = MatchRecord {
        player_id: profile_id,
        position: position.parse::<Role>()?,
        is_won: won,
        match_time: parse_match_time(time)?,
    };

    let mut conn = database::get_connection(&ctx.pool)?;
    let stored = matches::insert_match(&mut conn, &record)?;
    info!("Recorded match {} for {}", stored.id, player);
    Ok(())
}

fn parse_match_time(time: Option<&str>) -> Result<NaiveDateTime> {
    match time {
        Some(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
            .with_context(|| format!("Invalid match time '{}'", text)),
        None => Ok(Utc::now().naive_utc()),
    }
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
