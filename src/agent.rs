use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Grid position as `(x, y)`: column first, then row.
pub type Coord = (usize, usize);

/// One of the two agent slots. `A` is always enumerated before `B`.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentId {
    A,
    B,
}

impl AgentId {
    pub const ALL: [AgentId; 2] = [AgentId::A, AgentId::B];

    pub fn other(self) -> AgentId {
        match self {
            AgentId::A => AgentId::B,
            AgentId::B => AgentId::A,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgentId::A => "A",
            AgentId::B => "B",
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value for each agent slot.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct PerAgent<T> {
    #[serde(rename = "A")]
    pub a: T,
    #[serde(rename = "B")]
    pub b: T,
}

impl<T> PerAgent<T> {
    pub fn new(a: T, b: T) -> PerAgent<T> {
        PerAgent { a, b }
    }

    pub fn from_fn<F>(mut f: F) -> PerAgent<T>
    where
        F: FnMut(AgentId) -> T,
    {
        PerAgent {
            a: f(AgentId::A),
            b: f(AgentId::B),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &T)> {
        AgentId::ALL.into_iter().map(move |id| (id, &self[id]))
    }

    pub fn map<U, F>(self, mut f: F) -> PerAgent<U>
    where
        F: FnMut(T) -> U,
    {
        PerAgent {
            a: f(self.a),
            b: f(self.b),
        }
    }
}

impl<T> Index<AgentId> for PerAgent<T> {
    type Output = T;

    fn index(&self, id: AgentId) -> &T {
        match id {
            AgentId::A => &self.a,
            AgentId::B => &self.b,
        }
    }
}

impl<T> IndexMut<AgentId> for PerAgent<T> {
    fn index_mut(&mut self, id: AgentId) -> &mut T {
        match id {
            AgentId::A => &mut self.a,
            AgentId::B => &mut self.b,
        }
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub enum Action {
    North,
    South,
    East,
    West,
    Stay,
}

impl Action {
    /// Ordered by action index: `N=0, S=1, E=2, W=3, ST=4`.
    pub const ALL: [Action; 5] = [
        Action::North,
        Action::South,
        Action::East,
        Action::West,
        Action::Stay,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Action::North => "N",
            Action::South => "S",
            Action::East => "E",
            Action::West => "W",
            Action::Stay => "ST",
        }
    }

    /// Moves `coord` one cell, clamped to a `cols` x `rows` grid.
    pub(crate) fn apply(self, coord: Coord, cols: usize, rows: usize) -> Coord {
        let (x, y) = coord;
        match self {
            Action::North if y != 0 => (x, y - 1),
            Action::South if y + 1 < rows => (x, y + 1),
            Action::East if x + 1 < cols => (x + 1, y),
            Action::West if x > 0 => (x - 1, y),
            _ => coord,
        }
    }
}

impl FromStr for Action {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.token() == s)
            .ok_or_else(|| WorldError::InvalidAction(s.to_owned()))
    }
}

impl TryFrom<usize> for Action {
    type Error = WorldError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(WorldError::InvalidActionIndex(index))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

pub type JointAction = PerAgent<Action>;

impl JointAction {
    pub fn parse(a: &str, b: &str) -> Result<JointAction, WorldError> {
        Ok(PerAgent::new(a.parse()?, b.parse()?))
    }

    pub fn from_indices(a: usize, b: usize) -> Result<JointAction, WorldError> {
        Ok(PerAgent::new(Action::try_from(a)?, Action::try_from(b)?))
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Agent {
    pub coord: Coord,
    pub has_ball: bool,
}

impl Agent {
    pub fn new(x: usize, y: usize, has_ball: bool) -> Agent {
        Agent {
            coord: (x, y),
            has_ball,
        }
    }

    pub fn x(self: &Self) -> usize {
        self.coord.0
    }

    pub fn y(self: &Self) -> usize {
        self.coord.1
    }

    pub fn set_x(self: &mut Self, x: usize) {
        self.coord.0 = x;
    }

    pub fn set_y(self: &mut Self, y: usize) {
        self.coord.1 = y;
    }

    pub fn set_has_ball(self: &mut Self, has_ball: bool) {
        self.has_ball = has_ball;
    }

    pub fn update_state(self: &mut Self, x: usize, y: usize, has_ball: bool) {
        self.coord = (x, y);
        self.has_ball = has_ball;
    }
}
