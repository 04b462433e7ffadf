use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::domain::RosterPlayer;

/// The closed group of players the balancer chooses from
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    players: Vec<RosterPlayer>,
}

impl Roster {
    pub fn new(players: Vec<RosterPlayer>) -> Result<Self> {
        if players.is_empty() {
            anyhow::bail!("Roster is empty");
        }

        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.name.as_str()) {
                anyhow::bail!("Duplicate roster name: {}", player.name);
            }
        }

        Ok(Self { players })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid roster file {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let players: Vec<RosterPlayer> =
            serde_json::from_str(json).context("Failed to parse roster JSON")?;
        Self::new(players)
    }

    pub fn players(&self) -> &[RosterPlayer] {
        &self.players
    }

    pub fn find(&self, name: &str) -> Option<&RosterPlayer> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Look up several players by name, failing on the first unknown one.
    pub fn select(&self, names: &[String]) -> Result<Vec<RosterPlayer>> {
        names
            .iter()
            .map(|name| {
                self.find(name)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Unknown player: {}", name))
            })
            .collect()
    }
}
