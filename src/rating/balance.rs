use serde::{Deserialize, Serialize};

use super::aggregation::aggregate_team;
use super::modifiers::apply_modifiers;
use super::probability::expected_win_probability;
use super::types::{ModifierToggles, PlayerMetrics, PlayerProfile, Role, TeamMetrics};
use crate::errors::{BalanceError, Result};

pub const POOL_SIZE: usize = 8;
pub const TEAM_SIZE: usize = POOL_SIZE / 2;

/// Roles available to one team of four
const ROLE_SLOTS: [Role; TEAM_SIZE] = [Role::Flank, Role::Flank, Role::Pocket, Role::Pocket];

type RolePattern = [Role; TEAM_SIZE];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub role: Option<Role>,
}

/// Where `BalanceResult::expected_win_probability` comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProbabilitySource {
    /// Plain mode reports a fixed 0.5
    Nominal,
    /// Derived from the winning teams' adjusted aggregates
    Aggregates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResult {
    pub team_a: Vec<TeamMember>,
    pub team_b: Vec<TeamMember>,
    pub team_a_metrics: TeamMetrics,
    pub team_b_metrics: TeamMetrics,
    pub imbalance: f64,
    pub expected_win_probability: f64,
    pub probability_source: ProbabilitySource,
}

impl BalanceResult {
    pub fn team_a_names(&self) -> Vec<&str> {
        self.team_a.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn team_b_names(&self) -> Vec<&str> {
        self.team_b.iter().map(|m| m.name.as_str()).collect()
    }

    /// Team A's win probability computed from the returned aggregates,
    /// whichever mode produced them.
    pub fn recomputed_probability(&self) -> Result<f64> {
        expected_win_probability(
            self.team_a_metrics.weighted_average,
            self.team_b_metrics.weighted_average,
        )
    }
}

struct Candidate {
    team_a: Vec<usize>,
    team_b: Vec<usize>,
    roles_a: Option<RolePattern>,
    roles_b: Option<RolePattern>,
    metrics_a: TeamMetrics,
    metrics_b: TeamMetrics,
    score: f64,
}

/// Exhaustively search every 4-vs-4 split of exactly eight players (and,
/// with positions enabled, every flank/pocket layout per side) for the
/// smallest imbalance.
///
/// Team B is always the complement of team A, so each unordered split is
/// scored twice; the first candidate with the lowest score wins.
pub fn find_balanced_teams(
    players: &[PlayerProfile],
    toggles: ModifierToggles,
) -> Result<BalanceResult> {
    if players.len() != POOL_SIZE {
        return Err(BalanceError::invalid(format!(
            "balanced search needs exactly {} players, got {}",
            POOL_SIZE,
            players.len()
        )));
    }

    let patterns: Vec<Option<RolePattern>> = if toggles.use_positions {
        distinct_role_patterns().into_iter().map(Some).collect()
    } else {
        vec![None]
    };

    let mut best: Option<Candidate> = None;

    for team_a in index_combinations(POOL_SIZE, TEAM_SIZE) {
        let team_b = complement(&team_a, POOL_SIZE);

        for roles_a in &patterns {
            for roles_b in &patterns {
                let metrics_a = team_strength(players, &team_a, roles_a.as_ref(), toggles)?;
                let metrics_b = team_strength(players, &team_b, roles_b.as_ref(), toggles)?;
                let score = imbalance(&metrics_a, &metrics_b, toggles)?;

                if best.as_ref().is_none_or(|b| score < b.score) {
                    best = Some(Candidate {
                        team_a: team_a.clone(),
                        team_b: team_b.clone(),
                        roles_a: *roles_a,
                        roles_b: *roles_b,
                        metrics_a,
                        metrics_b,
                        score,
                    });
                }
            }
        }
    }

    let best = best.ok_or_else(|| BalanceError::invalid("no candidate split evaluated"))?;
    build_result(players, best, toggles)
}

fn team_strength(
    players: &[PlayerProfile],
    indices: &[usize],
    roles: Option<&RolePattern>,
    toggles: ModifierToggles,
) -> Result<TeamMetrics> {
    let adjusted: Vec<PlayerMetrics> = indices
        .iter()
        .enumerate()
        .map(|(slot, &idx)| {
            let role = roles.map(|r| r[slot]);
            apply_modifiers(&players[idx], role, toggles)
        })
        .collect();
    aggregate_team(&adjusted)
}

fn imbalance(a: &TeamMetrics, b: &TeamMetrics, toggles: ModifierToggles) -> Result<f64> {
    if toggles.any() {
        Ok((a.weighted_average - b.weighted_average).abs())
    } else {
        let expected_a = expected_win_probability(a.weighted_average, b.weighted_average)?;
        Ok((0.5 - expected_a).abs())
    }
}

fn build_result(
    players: &[PlayerProfile],
    best: Candidate,
    toggles: ModifierToggles,
) -> Result<BalanceResult> {
    let (expected_win_probability, probability_source) = if toggles.any() {
        let expected = expected_win_probability(
            best.metrics_a.weighted_average,
            best.metrics_b.weighted_average,
        )?;
        (expected, ProbabilitySource::Aggregates)
    } else {
        (0.5, ProbabilitySource::Nominal)
    };

    Ok(BalanceResult {
        team_a: members(players, &best.team_a, best.roles_a.as_ref()),
        team_b: members(players, &best.team_b, best.roles_b.as_ref()),
        team_a_metrics: best.metrics_a,
        team_b_metrics: best.metrics_b,
        imbalance: best.score,
        expected_win_probability,
        probability_source,
    })
}

fn members(players: &[PlayerProfile], indices: &[usize], roles: Option<&RolePattern>) -> Vec<TeamMember> {
    indices
        .iter()
        .enumerate()
        .map(|(slot, &idx)| TeamMember {
            name: players[idx].name.clone(),
            role: roles.map(|r| r[slot]),
        })
        .collect()
}

/// All k-element index subsets of `0..n` in lexicographic order.
fn index_combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(k);
    collect_combinations(0, n, k, &mut current, &mut result);
    result
}

fn collect_combinations(
    start: usize,
    n: usize,
    k: usize,
    current: &mut Vec<usize>,
    result: &mut Vec<Vec<usize>>,
) {
    if current.len() == k {
        result.push(current.clone());
        return;
    }
    for i in start..n {
        current.push(i);
        collect_combinations(i + 1, n, k, current, result);
        current.pop();
    }
}

fn complement(indices: &[usize], n: usize) -> Vec<usize> {
    (0..n).filter(|i| !indices.contains(i)).collect()
}

/// Distinct orderings of the role slots, in the order they first appear
/// when permuting slot positions lexicographically.
fn distinct_role_patterns() -> Vec<RolePattern> {
    let mut patterns: Vec<RolePattern> = Vec::new();
    for order in slot_permutations() {
        let pattern = [
            ROLE_SLOTS[order[0]],
            ROLE_SLOTS[order[1]],
            ROLE_SLOTS[order[2]],
            ROLE_SLOTS[order[3]],
        ];
        if !patterns.contains(&pattern) {
            patterns.push(pattern);
        }
    }
    patterns
}

fn slot_permutations() -> Vec<Vec<usize>> {
    fn permute(remaining: &mut Vec<usize>, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if remaining.is_empty() {
            out.push(current.clone());
            return;
        }
        for i in 0..remaining.len() {
            let slot = remaining.remove(i);
            current.push(slot);
            permute(remaining, current, out);
            current.pop();
            remaining.insert(i, slot);
        }
    }

    let mut out = Vec::new();
    permute(&mut (0..TEAM_SIZE).collect(), &mut Vec::new(), &mut out);
    out
}
