use std::{fs, path::Path};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{
    agent::{Agent, AgentId, PerAgent},
    env::{Goal, World},
    error::WorldError,
};

/// Everything needed to set up a match: field size, goals, kick-off
/// positions and an optional RNG seed.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WorldConfig {
    pub cols: usize,
    pub rows: usize,
    pub goals: PerAgent<Goal>,
    pub agents: PerAgent<Agent>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            cols: 4,
            rows: 2,
            goals: PerAgent::new(
                Goal {
                    reward: 100.0,
                    column: 0,
                },
                Goal {
                    reward: 100.0,
                    column: 3,
                },
            ),
            agents: PerAgent::new(Agent::new(2, 0, false), Agent::new(1, 0, true)),
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn from_json_str(json: &str) -> Result<WorldConfig, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<WorldConfig, WorldError> {
        let json = fs::read_to_string(path)?;
        WorldConfig::from_json_str(&json)
    }
}

impl World<ChaCha8Rng> {
    pub fn from_config(config: &WorldConfig) -> Result<World<ChaCha8Rng>, WorldError> {
        let mut world = match config.seed {
            Some(seed) => World::with_seed(seed),
            None => World::new(),
        };
        world.set_world_size(config.cols, config.rows)?;
        for (id, goal) in config.goals.iter() {
            world.set_goal(id, goal.reward, goal.column)?;
        }
        world.reset_from(config)?;
        Ok(world)
    }
}

impl<R: Rng> World<R> {
    /// Puts both agents back on their kick-off cells, e.g. after a goal.
    pub fn reset_from(&mut self, config: &WorldConfig) -> Result<(), WorldError> {
        for id in AgentId::ALL {
            self.place_agent(id, &config.agents[id])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Action, JointAction};

    #[test]
    fn test_default_config() {
        let world = World::from_config(&WorldConfig::default()).unwrap();
        assert_eq!(world.size(), Some((4, 2)));
        assert_eq!(world.goal(AgentId::B).unwrap().column, 3);
        assert_eq!(world.state_label().unwrap(), "B21");
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "cols": 5,
            "rows": 3,
            "goals": {
                "A": { "reward": 10.0, "column": 0 },
                "B": { "reward": 20.0, "column": 4 }
            },
            "agents": {
                "A": { "coord": [3, 1], "has_ball": false },
                "B": { "coord": [1, 1], "has_ball": true }
            },
            "seed": 42
        }"#;
        let config = WorldConfig::from_json_str(json).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.goals[AgentId::B].reward, 20.0);

        let mut world = World::from_config(&config).unwrap();
        assert_eq!(world.state_label().unwrap(), "B86");

        let outcome = world.step(&JointAction::parse("ST", "W").unwrap()).unwrap();
        assert!(outcome.goal);
        assert_eq!(outcome.rewards, PerAgent::new(10.0, -20.0));
    }

    #[test]
    fn test_seed_is_optional() {
        let mut config = WorldConfig::default();
        config.seed = Some(3);
        let json = serde_json::to_string(&config).unwrap();
        let stripped = json.replace(",\"seed\":3", "");
        assert_eq!(WorldConfig::from_json_str(&stripped).unwrap().seed, None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            WorldConfig::from_json_str("{\"cols\": 4}"),
            Err(WorldError::Config(_))
        ));

        let mut config = WorldConfig::default();
        config.agents.a = Agent::new(9, 0, false);
        assert!(matches!(
            World::from_config(&config),
            Err(WorldError::AgentOutOfBounds { id: AgentId::A, .. })
        ));

        let mut config = WorldConfig::default();
        config.goals.b.reward = 0.0;
        assert!(World::from_config(&config).is_err());
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("soccer-config-{}.json", std::process::id()));
        fs::write(&path, serde_json::to_string(&WorldConfig::default()).unwrap()).unwrap();
        assert_eq!(WorldConfig::from_path(&path).unwrap(), WorldConfig::default());
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            WorldConfig::from_path(&path),
            Err(WorldError::Io(_))
        ));
    }

    #[test]
    fn test_reset_after_goal() {
        let config = WorldConfig {
            seed: Some(11),
            ..WorldConfig::default()
        };
        let mut world = World::from_config(&config).unwrap();
        world.step(&JointAction::new(Action::Stay, Action::South)).unwrap();
        world.step(&JointAction::new(Action::Stay, Action::East)).unwrap();
        let outcome = world.step(&JointAction::new(Action::Stay, Action::East)).unwrap();
        assert!(outcome.goal);

        world.reset_from(&config).unwrap();
        assert_eq!(world.state_label().unwrap(), "B21");
    }
}
