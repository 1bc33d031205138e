use std::time::Duration;

use color_eyre::Result;
use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal,
};
use soccer::{JointAction, StateSpace, StepOutcome, World, WorldConfig, WorldError};

enum UiState {
    Latest,
    Detach,
}

/// One scripted step. `kickoff` puts the agents back on their starting cells
/// before the actions are applied.
struct Move {
    scenario: &'static str,
    kickoff: bool,
    actions: JointAction,
}

#[derive(Clone)]
struct Snapshot {
    title: String,
    rows: Vec<Vec<String>>,
    outcome: Option<StepOutcome>,
    state_index: Option<usize>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    // Logs go to stderr. Redirect it when running with RUST_LOG set.
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::from_path(path)?,
        None => WorldConfig::default(),
    };
    let space = StateSpace::new(config.cols, config.rows)?;
    let mut world = World::from_config(&config)?;
    let script = script()?;

    let mut term = ratatui::init();
    let result = run(&mut term, &config, &space, &mut world, &script);
    ratatui::restore();
    result
}

fn script() -> Result<Vec<Move>, WorldError> {
    let scenarios: [(&'static str, &[(&str, &str)]); 3] = [
        ("B scores an own goal", &[("S", "S"), ("ST", "W")]),
        ("B scores while A stays", &[("ST", "S"), ("ST", "E"), ("ST", "E")]),
        ("The agents collide", &[("ST", "E")]),
    ];

    let mut moves = Vec::new();
    for (scenario, steps) in scenarios {
        for (i, (a, b)) in steps.iter().enumerate() {
            moves.push(Move {
                scenario,
                kickoff: i == 0,
                actions: JointAction::parse(a, b)?,
            });
        }
    }
    Ok(moves)
}

fn run(
    term: &mut DefaultTerminal,
    config: &WorldConfig,
    space: &StateSpace,
    world: &mut World,
    script: &[Move],
) -> Result<()> {
    let mut cursor = 0;
    let mut buffer: Vec<Snapshot> = vec![snapshot("Kick-off".to_owned(), world, None, space)];
    let mut ui_state = UiState::Latest;
    let mut detach_step = 0;

    loop {
        let step = match ui_state {
            UiState::Latest => buffer.len().saturating_sub(1),
            UiState::Detach => detach_step,
        };

        term.draw(|frame| {
            frame.render_widget(field_canvas(step, &buffer[step]), frame.area());
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') => break,
            KeyCode::Right | KeyCode::Char(' ') => match ui_state {
                UiState::Latest => {
                    if let Some(m) = script.get(cursor) {
                        if m.kickoff {
                            world.reset_from(config)?;
                        }
                        let outcome = world.step(&m.actions)?;
                        let title = format!(
                            "{}: A={} B={}",
                            m.scenario, m.actions.a, m.actions.b
                        );
                        buffer.push(snapshot(title, world, Some(outcome), space));
                        cursor += 1;
                    }
                }
                UiState::Detach => {
                    detach_step = (detach_step + 1).min(buffer.len().saturating_sub(1));
                }
            },
            KeyCode::Left => {
                ui_state = UiState::Detach;
                detach_step = step.saturating_sub(1);
            }
            KeyCode::Esc => {
                ui_state = UiState::Latest;
            }
            KeyCode::Char('r') => {
                cursor = 0;
                world.reset_from(config)?;
                buffer.push(snapshot("Kick-off".to_owned(), world, None, space));
                ui_state = UiState::Latest;
            }
            _ => {}
        }
    }

    Ok(())
}

fn snapshot(
    title: String,
    world: &World,
    outcome: Option<StepOutcome>,
    space: &StateSpace,
) -> Snapshot {
    let state_index = world
        .state_label()
        .ok()
        .and_then(|label| space.index(&label));
    Snapshot {
        title,
        rows: world.render_rows(),
        outcome,
        state_index,
    }
}

fn cell_color(cell: &str) -> Color {
    match cell {
        "**" => Color::DarkGray,
        "gA" | "gB" => Color::Green,
        c if c.starts_with('A') => Color::Red,
        c if c.starts_with('B') => Color::Blue,
        _ => Color::Reset,
    }
}

fn field_canvas(step: usize, snapshot: &Snapshot) -> impl Widget {
    let mut lines: Vec<Line> = vec![Line::from(format!("Step: {} {}", step, snapshot.title))];
    lines.extend(snapshot.rows.iter().map(|row| {
        let mut spans = Vec::new();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(cell.clone(), Style::default().fg(cell_color(cell))));
        }
        Line::from(spans)
    }));

    if let Some(outcome) = &snapshot.outcome {
        lines.push(Line::from(format!(
            "State: {} ({}) Rewards: A={} B={} Goal: {} Order: {}{}",
            outcome.state,
            snapshot
                .state_index
                .map_or_else(|| "-".to_owned(), |i| i.to_string()),
            outcome.rewards.a,
            outcome.rewards.b,
            outcome.goal,
            outcome.order[0],
            outcome.order[1],
        )));
    }
    lines.push(Line::from(
        "Right/Space: next move  Left: back  Esc: latest  r: restart  q: quit",
    ));
    Paragraph::new(lines)
}
