use std::collections::HashMap;

use crate::{agent::AgentId, error::WorldError};

/// Numbers every state label a tabular learner can observe on a
/// `cols` x `rows` field.
///
/// Labels are enumerated by ball holder (`A` then `B`), then A's cell, then
/// B's cell. Pairs where both agents share a cell are skipped.
#[derive(Clone, Debug)]
pub struct StateSpace {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl StateSpace {
    pub fn new(cols: usize, rows: usize) -> Result<StateSpace, WorldError> {
        let too_large = || WorldError::StateSpaceTooLarge { cols, rows };
        let cells = cols.checked_mul(rows).ok_or_else(too_large)?;
        let len = cells
            .checked_mul(cells.saturating_sub(1))
            .and_then(|n| n.checked_mul(2))
            .ok_or_else(too_large)?;
        let mut labels = Vec::with_capacity(len);
        for holder in AgentId::ALL {
            for a in 0..cells {
                for b in (0..cells).filter(|b| *b != a) {
                    labels.push(format!("{}{}{}", holder, a, b));
                }
            }
        }
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Ok(StateSpace { labels, index })
    }

    pub fn index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agent::{Action, JointAction},
        config::WorldConfig,
        env::World,
    };

    #[test]
    fn test_classic_field() {
        let space = StateSpace::new(4, 2).unwrap();
        assert_eq!(space.len(), 112);
        assert_eq!(space.index("A01"), Some(0));
        assert_eq!(space.index("A02"), Some(1));
        assert_eq!(space.index("A10"), Some(7));
        assert_eq!(space.index("B01"), Some(56));
        assert_eq!(space.label(111), Some("B76"));
        assert_eq!(space.index("A11"), None);
        assert_eq!(space.label(112), None);
    }

    #[test]
    fn test_every_reachable_state_is_indexed() {
        let config = WorldConfig {
            seed: Some(5),
            ..WorldConfig::default()
        };
        let space = StateSpace::new(config.cols, config.rows).unwrap();
        let mut world = World::from_config(&config).unwrap();
        for i in 0..500 {
            let actions = JointAction::new(Action::ALL[i % 5], Action::ALL[(i * 3 + 1) % 5]);
            let outcome = world.step(&actions).unwrap();
            assert!(space.index(&outcome.state).is_some(), "{}", outcome.state);
            if outcome.goal {
                world.reset_from(&config).unwrap();
            }
        }
    }

    #[test]
    fn test_single_cell_field() {
        let space = StateSpace::new(1, 1).unwrap();
        assert!(space.is_empty());
    }

    #[test]
    fn test_oversized_field() {
        assert!(matches!(
            StateSpace::new(usize::MAX, 2),
            Err(WorldError::StateSpaceTooLarge { rows: 2, .. })
        ));
        assert!(matches!(
            StateSpace::new(usize::MAX / 2, 2),
            Err(WorldError::StateSpaceTooLarge { .. })
        ));
    }
}
