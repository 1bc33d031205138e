use std::fmt;

use rand::Rng;

use crate::env::World;

const BORDER: &str = "**";

impl<R: Rng> World<R> {
    /// The field as rows of two-character cells, border included. Goal
    /// columns are marked `gA` (left) and `gB` (right); an agent shows as
    /// its label followed by `+` when it has the ball.
    pub fn render_rows(&self) -> Vec<Vec<String>> {
        let Some((cols, rows)) = self.size() else {
            return Vec::new();
        };

        let border = vec![BORDER.to_owned(); cols + 2];
        let mut grid = vec![border.clone()];
        for _ in 0..rows {
            let mut row = vec![BORDER.to_owned()];
            row.extend((0..cols).map(|x| {
                if x == 0 {
                    "gA".to_owned()
                } else if x == cols - 1 {
                    "gB".to_owned()
                } else {
                    "  ".to_owned()
                }
            }));
            row.push(BORDER.to_owned());
            grid.push(row);
        }
        grid.push(border);

        // Agents left outside a shrunken grid are not drawn.
        for (id, agent) in self.agents().filter(|(_, a)| a.x() < cols && a.y() < rows) {
            let mark = if agent.has_ball { '+' } else { ' ' };
            grid[agent.y() + 1][agent.x() + 1] = format!("{}{}", id, mark);
        }
        grid
    }
}

impl<R: Rng> fmt::Display for World<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.render_rows() {
            writeln!(f, "{}", row.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        agent::{Agent, AgentId, JointAction},
        config::WorldConfig,
        env::World,
    };

    #[test]
    fn test_render_default_field() {
        let world = World::from_config(&WorldConfig::default()).unwrap();
        let expected = [
            "** | ** | ** | ** | ** | **",
            "** | gA | B+ | A  | gB | **",
            "** | gA |    |    | gB | **",
            "** | ** | ** | ** | ** | **",
        ]
        .join("\n")
            + "\n";
        assert_eq!(world.to_string(), expected);
    }

    #[test]
    fn test_render_follows_agents() {
        let mut world = World::from_config(&WorldConfig::default()).unwrap();
        world.step(&JointAction::parse("S", "ST").unwrap()).unwrap();
        let rows = world.render_rows();
        assert_eq!(rows[1][3], "  ");
        assert_eq!(rows[2][3], "A ");
        assert_eq!(rows[1][2], "B+");
        assert_eq!(world.agent(AgentId::A).unwrap().coord, (2, 1));
    }

    #[test]
    fn test_render_after_shrink() {
        let mut world = World::from_config(&WorldConfig::default()).unwrap();
        world.place_agent(AgentId::A, &Agent::new(0, 0, false)).unwrap();
        world.place_agent(AgentId::B, &Agent::new(3, 1, true)).unwrap();
        world.set_world_size(2, 2).unwrap();

        let expected = [
            "** | ** | ** | **",
            "** | A  | gB | **",
            "** | gA | gB | **",
            "** | ** | ** | **",
        ]
        .join("\n")
            + "\n";
        assert_eq!(world.to_string(), expected);
    }

    #[test]
    fn test_render_unsized_world() {
        let world = World::with_seed(0);
        assert!(world.render_rows().is_empty());
        assert_eq!(world.to_string(), "");
    }
}
