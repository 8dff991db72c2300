use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::game::player::PlayerKind;
use crate::search::SearchParams;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuationRule {
    /// A chain keeps jumping while any jump is available.
    #[default]
    Forced,
    /// A human may stop after the first jump of a chain.
    Optional,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveAvailability {
    #[default]
    AllDirections,
    /// Only `Up` jumps are probed when deciding whether anyone can move.
    UpOnly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub continuation: ContinuationRule,
    pub availability: MoveAvailability,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub kind: PlayerKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: usize,
    pub seed: Option<u64>,
    pub players: [PlayerSpec; 2],
    pub rules: RuleSet,
    pub search: SearchParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 8,
            seed: None,
            players: [
                PlayerSpec { name: "Player1".to_string(), kind: PlayerKind::Human },
                PlayerSpec { name: "Computer".to_string(), kind: PlayerKind::Computer },
            ],
            rules: RuleSet::default(),
            search: SearchParams::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(&path).with_context(|| format!("open config file: {}", path.as_ref().display()))?;
        serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config file: {}", path.as_ref().display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{"size": 10, "rules": {"continuation": "optional"}}"#).unwrap();
        assert_eq!(cfg.size, 10);
        assert_eq!(cfg.rules.continuation, ContinuationRule::Optional);
        assert_eq!(cfg.rules.availability, MoveAvailability::AllDirections);
        assert_eq!(cfg.players[1].kind, PlayerKind::Computer);
        assert!(cfg.search.replan_each_step);
    }

    #[test]
    fn players_parse_from_json() {
        let cfg: GameConfig = serde_json::from_str(
            r#"{"players": [{"name": "a", "kind": "computer"}, {"name": "b", "kind": "human"}], "rules": {"availability": "up_only"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.players[0].kind, PlayerKind::Computer);
        assert_eq!(cfg.rules.availability, MoveAvailability::UpOnly);
    }
}
