use log::{debug, info, trace};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{
    agent::{Agent, AgentId, JointAction, PerAgent},
    error::WorldError,
};

/// Reward paid when a goal is scored and the column that counts as a goal.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Goal {
    pub reward: f32,
    pub column: usize,
}

#[derive(Clone, PartialEq, Debug)]
pub struct StepOutcome {
    /// Ball holder followed by both flattened positions, e.g. `"B65"`.
    pub state: String,
    pub rewards: PerAgent<f32>,
    pub goal: bool,
    /// Order the agents were processed in. The first one wins collisions.
    pub order: [AgentId; 2],
}

pub struct World<R = ChaCha8Rng> {
    size: Option<(usize, usize)>,
    goals: PerAgent<Option<Goal>>,
    agents: PerAgent<Option<Agent>>,
    rng: R,
}

impl World<ChaCha8Rng> {
    pub fn new() -> World<ChaCha8Rng> {
        World::with_rng(ChaCha8Rng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> World<ChaCha8Rng> {
        World::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for World<ChaCha8Rng> {
    fn default() -> Self {
        World::new()
    }
}

impl<R: Rng> World<R> {
    pub fn with_rng(rng: R) -> World<R> {
        World {
            size: None,
            goals: PerAgent::default(),
            agents: PerAgent::default(),
            rng,
        }
    }

    pub fn set_world_size(&mut self, cols: usize, rows: usize) -> Result<(), WorldError> {
        if cols == 0 || rows == 0 {
            return Err(WorldError::InvalidWorldSize { cols, rows });
        }
        self.size = Some((cols, rows));
        Ok(())
    }

    pub fn set_goal(&mut self, id: AgentId, reward: f32, column: usize) -> Result<(), WorldError> {
        if !(reward.is_finite() && reward > 0.0) {
            return Err(WorldError::InvalidReward { id, reward });
        }
        self.goals[id] = Some(Goal { reward, column });
        Ok(())
    }

    /// Stores a copy of `agent` in slot `id`, replacing whoever was there.
    pub fn place_agent(&mut self, id: AgentId, agent: &Agent) -> Result<(), WorldError> {
        let (cols, rows) = self.size.ok_or(WorldError::WorldSizeNotSet)?;
        check_bounds(id, agent, cols, rows)?;
        self.agents[id] = Some(*agent);
        Ok(())
    }

    pub fn size(&self) -> Option<(usize, usize)> {
        self.size
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents[id].as_ref()
    }

    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &Agent)> {
        self.agents
            .iter()
            .filter_map(|(id, agent)| agent.as_ref().map(|a| (id, a)))
    }

    pub fn goal(&self, id: AgentId) -> Option<Goal> {
        self.goals[id]
    }

    pub fn state_label(&self) -> Result<String, WorldError> {
        let (cols, rows) = self.size.ok_or(WorldError::WorldSizeNotSet)?;
        let a = self.placed(AgentId::A, cols, rows)?;
        let b = self.placed(AgentId::B, cols, rows)?;
        Ok(state_label(&PerAgent::new(a, b), cols))
    }

    pub fn step(&mut self, actions: &JointAction) -> Result<StepOutcome, WorldError> {
        self.ready()?;
        let mut order = AgentId::ALL;
        order.shuffle(&mut self.rng);
        self.resolve(order, actions)
    }

    /// Applies `actions` in the given order. The world must already be ready.
    pub(crate) fn resolve(
        &mut self,
        order: [AgentId; 2],
        actions: &JointAction,
    ) -> Result<StepOutcome, WorldError> {
        let ((cols, rows), goals, mut agents) = self.ready()?;
        debug!(
            "Order: {}{}, actions: A={} B={}",
            order[0], order[1], actions.a, actions.b
        );

        let mut rewards = PerAgent::new(0.0, 0.0);
        let mut goal = false;

        for id in order {
            let other = id.other();
            let mover = agents[id];
            let candidate = Agent {
                coord: actions[id].apply(mover.coord, cols, rows),
                has_ball: mover.has_ball,
            };

            if candidate.coord == agents[other].coord {
                debug!("{} collided with {}", id, other);
                if candidate.has_ball {
                    agents[other].set_has_ball(true);
                    agents[id].set_has_ball(false);
                    info!("{} steals from {}", other, id);
                }
            } else {
                agents[id] = candidate;
            }

            if let Some(r) = check_goal(id, &agents[id], &goals) {
                rewards = r;
                goal = true;
                break;
            }
        }

        trace!("A at {:?}, B at {:?}", agents.a.coord, agents.b.coord);
        self.agents = agents.map(Some);

        Ok(StepOutcome {
            state: state_label(&agents, cols),
            rewards,
            goal,
            order,
        })
    }

    /// Everything a step needs, or the first configuration error found.
    fn ready(&self) -> Result<((usize, usize), PerAgent<Goal>, PerAgent<Agent>), WorldError> {
        let (cols, rows) = self.size.ok_or(WorldError::WorldSizeNotSet)?;
        let agents = PerAgent::new(
            self.placed(AgentId::A, cols, rows)?,
            self.placed(AgentId::B, cols, rows)?,
        );
        let goals = PerAgent::new(
            self.goals.a.ok_or(WorldError::GoalNotSet(AgentId::A))?,
            self.goals.b.ok_or(WorldError::GoalNotSet(AgentId::B))?,
        );

        if agents.a.coord == agents.b.coord {
            let (x, y) = agents.a.coord;
            return Err(WorldError::AgentsOverlap { x, y });
        }
        if agents.a.has_ball && agents.b.has_ball {
            return Err(WorldError::BallContested);
        }

        Ok(((cols, rows), goals, agents))
    }

    fn placed(&self, id: AgentId, cols: usize, rows: usize) -> Result<Agent, WorldError> {
        let agent = self.agents[id].ok_or(WorldError::AgentNotPlaced(id))?;
        // The grid may have been resized since placement.
        check_bounds(id, &agent, cols, rows)?;
        Ok(agent)
    }
}

fn check_bounds(id: AgentId, agent: &Agent, cols: usize, rows: usize) -> Result<(), WorldError> {
    let (x, y) = agent.coord;
    if x >= cols || y >= rows {
        return Err(WorldError::AgentOutOfBounds { id, x, y, cols, rows });
    }
    Ok(())
}

/// Rewards for a goal triggered by `id`, if its current state scores one.
fn check_goal(id: AgentId, mover: &Agent, goals: &PerAgent<Goal>) -> Option<PerAgent<f32>> {
    if !mover.has_ball {
        return None;
    }

    if mover.x() == goals[id].column {
        info!("{} scored a goal", id);
        let reward = goals[id].reward;
        return Some(PerAgent::from_fn(|k| if k == id { reward } else { -reward }));
    }

    let hit = PerAgent::from_fn(|k| mover.x() == goals[k].column);
    if hit.a || hit.b {
        info!("{} scored an own goal", id);
        return Some(PerAgent::from_fn(|k| {
            if hit[k] {
                goals[k].reward
            } else {
                -goals[k].reward
            }
        }));
    }

    None
}

/// The ball holder's label (`B` when A does not hold it), then A's and B's
/// flattened cell index.
fn state_label(agents: &PerAgent<Agent>, cols: usize) -> String {
    let holder = if agents.a.has_ball { AgentId::A } else { AgentId::B };
    let cell = |agent: &Agent| agent.y() * cols + agent.x();
    format!("{}{}{}", holder, cell(&agents.a), cell(&agents.b))
}
