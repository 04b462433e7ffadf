use super::types::{ModifierToggles, PlayerMetrics, PlayerProfile, Role};

/// Return a copy of the player's metrics with the active multipliers folded
/// into `weighted_average`. Positions apply first, then recent form.
pub fn apply_modifiers(
    profile: &PlayerProfile,
    role: Option<Role>,
    toggles: ModifierToggles,
) -> PlayerMetrics {
    let mut adjusted = profile.metrics.clone();

    if toggles.use_positions {
        if let Some(role) = role {
            adjusted.weighted_average *= positional_multiplier(profile, role);
        }
    }

    if toggles.use_recent_performance {
        adjusted.weighted_average *= recent_form_multiplier(profile);
    }

    adjusted
}

fn positional_multiplier(profile: &PlayerProfile, role: Role) -> f64 {
    let multiplier = profile
        .position
        .as_ref()
        .map(|p| p.multiplier_for(role))
        .unwrap_or(1.0);

    // zero means the stats were never filled in
    if multiplier == 0.0 || !multiplier.is_finite() {
        1.0
    } else {
        multiplier
    }
}

fn recent_form_multiplier(profile: &PlayerProfile) -> f64 {
    profile
        .recent_form
        .as_ref()
        .map(|f| f.performance_multiplier)
        .filter(|m| m.is_finite())
        .unwrap_or(1.0)
}
