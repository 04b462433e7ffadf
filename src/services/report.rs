use colored::Colorize;
use std::fmt::Write as _;

use super::comparison::TeamComparison;
use crate::rating::{BalanceResult, PlayerProfile, ProbabilitySource, TeamMember};

fn pct(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

pub fn render_players(profiles: &[PlayerProfile]) -> String {
    let mut out = String::new();
    for profile in profiles {
        let m = &profile.metrics;
        let _ = writeln!(out, "\n{}:", profile.name.bold());
        let _ = writeln!(out, "  Current Elo: {:.2}", m.current);
        let _ = writeln!(out, "  Weighted Average: {:.2}", m.weighted_average);
        let _ = writeln!(out, "  Maximum Elo: {:.2}", m.max);
        let _ = writeln!(out, "  Trend: {}", colored_trend(m.trend));
        let _ = writeln!(out, "  Number of Entries: {}", m.ratings.len());

        if let Some(position) = &profile.position {
            let _ = writeln!(
                out,
                "  Flank x{:.3} ({} games, {:.1}%)  Pocket x{:.3} ({} games, {:.1}%)",
                position.flank_multiplier,
                position.flank_matches,
                position.flank_winrate,
                position.pocket_multiplier,
                position.pocket_matches,
                position.pocket_winrate
            );
        }
        if let Some(form) = &profile.recent_form {
            let _ = writeln!(
                out,
                "  Recent form x{:.3} ({} games, {:.1}% won)",
                form.performance_multiplier, form.total_matches, form.win_rate
            );
        }
    }
    out
}

fn colored_trend(trend: f64) -> String {
    let text = format!("{:+.2}", trend);
    if trend > 0.0 {
        text.green().to_string()
    } else if trend < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

pub fn render_comparison(comparison: &TeamComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "Team Comparisons (based on weighted averages):".bold());
    let _ = writeln!(
        out,
        "Team A Average Weighted Elo: {:.2}",
        comparison.team_a_strength.weighted_average
    );
    let _ = writeln!(
        out,
        "Team B Average Weighted Elo: {:.2}",
        comparison.team_b_strength.weighted_average
    );

    let _ = writeln!(out, "\n{}", "Team Head-to-Head Expected Outcome:".bold());
    let _ = writeln!(out, "  Team A expected win probability: {}", pct(comparison.expected_a));
    let _ = writeln!(out, "  Team B expected win probability: {}", pct(comparison.expected_b));

    let series = &comparison.series_probabilities;
    let _ = writeln!(out, "\n{}", "Three-Match Series Probabilities (all matches played):".bold());
    let _ = writeln!(out, "  Team A winning 3-0: {}", pct(series.three_zero));
    let _ = writeln!(out, "  Team A winning 2-1: {}", pct(series.two_one));
    let _ = writeln!(out, "  Team B winning 2-1: {}", pct(series.one_two));
    let _ = writeln!(out, "  Team B winning 3-0: {}", pct(series.zero_three));

    let _ = writeln!(out, "\nOverall series win probability:");
    let _ = writeln!(out, "  Team A: {}", pct(comparison.team_a_series_win).cyan());
    let _ = writeln!(out, "  Team B: {}", pct(comparison.team_b_series_win).cyan());
    out
}

fn render_members(members: &[TeamMember]) -> String {
    members
        .iter()
        .map(|m| match m.role {
            Some(role) => format!("{} ({})", m.name, role.as_str()),
            None => m.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_balance(result: &BalanceResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "Most balanced team combination found:".bold().green());
    let _ = writeln!(out, "Team A: {}", render_members(&result.team_a));
    let _ = writeln!(out, "Team B: {}", render_members(&result.team_b));
    let _ = writeln!(
        out,
        "Weighted Elo: {:.2} vs {:.2} (imbalance {:.4})",
        result.team_a_metrics.weighted_average,
        result.team_b_metrics.weighted_average,
        result.imbalance
    );

    let p = result.expected_win_probability;
    let note = match result.probability_source {
        ProbabilitySource::Nominal => " (nominal)",
        ProbabilitySource::Aggregates => "",
    };
    let _ = writeln!(out, "Expected win probability: {} vs {}{}", pct(p), pct(1.0 - p), note);
    out
}
