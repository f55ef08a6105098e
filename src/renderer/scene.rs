//! Draw list construction
//!
//! `draw` only reads the session. Everything the backend needs for one frame
//! ends up in a `DrawList`, in painter's order.

use glam::Vec2;

use super::vertex::colors;
use crate::consts::{SCORE_TEXT_SIZE, SCORE_TEXT_X, SCORE_TEXT_Y};
use crate::sim::{GameState, Viewport};

pub type Color = [f32; 4];

/// Number of decorative clouds
pub const CLOUD_COUNT: usize = 5;
/// Cloud drift (px per ms)
const CLOUD_SPEED: f64 = 0.05;

/// Screen-space rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    /// The player sprite stretched over `rect`
    Sprite { rect: Rect },
    /// Left-aligned text; `baseline` is the left end of the baseline
    Text {
        text: String,
        baseline: Vec2,
        size: f32,
        color: Color,
    },
}

/// One frame's worth of drawing
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

/// Build the frame: sky, clouds, obstacles, player, score.
///
/// `time_ms` drives the clouds only.
pub fn draw(state: &GameState, sprite_ready: bool, score_label: &str, time_ms: f64) -> DrawList {
    let viewport = state.viewport;
    let mut commands = Vec::with_capacity(2 + CLOUD_COUNT * 4 + state.obstacles.len() * 2 + 2);

    commands.push(DrawCommand::FillRect {
        rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
        color: colors::SKY,
    });

    for origin in cloud_positions(&viewport, time_ms) {
        push_cloud(&mut commands, origin);
    }

    for obstacle in &state.obstacles {
        let top = obstacle.top_bounds();
        let bottom = obstacle.bottom_bounds(&viewport);
        commands.push(DrawCommand::FillRect {
            rect: Rect::new(top.min.x, top.min.y, top.width(), top.height()),
            color: colors::OBSTACLE,
        });
        commands.push(DrawCommand::FillRect {
            rect: Rect::new(bottom.min.x, bottom.min.y, bottom.width(), bottom.height()),
            color: colors::OBSTACLE,
        });
    }

    let player = &state.player;
    let player_rect = Rect::new(player.pos.x, player.pos.y, player.width, player.height);
    if sprite_ready {
        commands.push(DrawCommand::Sprite { rect: player_rect });
    } else {
        commands.push(DrawCommand::FillRect {
            rect: player_rect,
            color: colors::PLACEHOLDER,
        });
    }

    commands.push(DrawCommand::Text {
        text: score_text(score_label, state.score),
        baseline: Vec2::new(SCORE_TEXT_X, SCORE_TEXT_Y),
        size: SCORE_TEXT_SIZE,
        color: colors::SCORE_TEXT,
    });

    DrawList { viewport, commands }
}

/// "Skor: 40"
pub fn score_text(label: &str, score: u32) -> String {
    format!("{}: {}", label, score)
}

/// Left anchor of each cloud at `time_ms`.
///
/// Clouds scroll right and wrap over 1.5 screen widths, bobbing vertically.
pub fn cloud_positions(viewport: &Viewport, time_ms: f64) -> Vec<Vec2> {
    let width = viewport.width as f64;
    if width <= 0.0 {
        return Vec::new();
    }
    let wrap = width * 1.5;

    (0..CLOUD_COUNT)
        .map(|i| {
            let i = i as f64;
            let x = ((width / 4.0) * i + (time_ms * CLOUD_SPEED) % wrap) % wrap;
            let y = 50.0 + (time_ms / 3000.0 + i * 1000.0).sin() * 20.0;
            Vec2::new((x - width / 2.0) as f32, y as f32)
        })
        .collect()
}

/// Four overlapping puffs
fn push_cloud(commands: &mut Vec<DrawCommand>, origin: Vec2) {
    let puffs = [
        (Vec2::new(0.0, 0.0), 20.0),
        (Vec2::new(15.0, -10.0), 15.0),
        (Vec2::new(15.0, 10.0), 15.0),
        (Vec2::new(30.0, 0.0), 20.0),
    ];
    for (offset, radius) in puffs {
        commands.push(DrawCommand::FillCircle {
            center: origin + offset,
            radius,
            color: colors::CLOUD,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::Obstacle;

    fn state() -> GameState {
        GameState::new(Tuning::default(), Viewport::new(800.0, 600.0), 1)
    }

    #[test]
    fn test_draw_order() {
        let mut state = state();
        state.obstacles.push(Obstacle::new(500.0, 60.0, 100.0, 200.0));
        let list = draw(&state, true, "Skor", 0.0);

        let cmds = &list.commands;
        assert_eq!(cmds.len(), 1 + CLOUD_COUNT * 4 + 2 + 1 + 1);
        assert!(matches!(cmds[0], DrawCommand::FillRect { color, .. } if color == colors::SKY));
        for cmd in &cmds[1..1 + CLOUD_COUNT * 4] {
            assert!(matches!(cmd, DrawCommand::FillCircle { .. }));
        }
        let n = cmds.len();
        assert!(matches!(cmds[n - 2], DrawCommand::Sprite { .. }));
        assert!(matches!(cmds[n - 1], DrawCommand::Text { .. }));
    }

    #[test]
    fn test_obstacle_regions() {
        let mut state = state();
        state.obstacles.push(Obstacle::new(500.0, 60.0, 100.0, 200.0));
        let list = draw(&state, true, "Skor", 0.0);

        let rects: Vec<Rect> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } if *color == colors::OBSTACLE => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(500.0, 0.0, 60.0, 100.0),
                Rect::new(500.0, 300.0, 60.0, 300.0),
            ]
        );
    }

    #[test]
    fn test_placeholder_until_sprite_ready() {
        let state = state();
        let list = draw(&state, false, "Skor", 0.0);
        let player = &list.commands[list.commands.len() - 2];
        assert_eq!(
            *player,
            DrawCommand::FillRect {
                rect: Rect::new(200.0, 300.0, 40.0, 40.0),
                color: colors::PLACEHOLDER,
            }
        );
    }

    #[test]
    fn test_score_text() {
        let mut state = state();
        state.score = 40;
        let list = draw(&state, true, "Skor", 0.0);
        match list.commands.last() {
            Some(DrawCommand::Text { text, baseline, .. }) => {
                assert_eq!(text, "Skor: 40");
                assert_eq!(*baseline, Vec2::new(20.0, 40.0));
            }
            other => panic!("expected score text, got {:?}", other),
        }
        assert_eq!(score_text("Score", 0), "Score: 0");
    }

    #[test]
    fn test_draw_leaves_state_alone() {
        let mut state = state();
        state.spawn_obstacle();
        state.score = 20;
        let before = (state.score, state.obstacles.clone(), state.player.pos);
        let _ = draw(&state, true, "Skor", 12_345.0);
        assert_eq!(before, (state.score, state.obstacles.clone(), state.player.pos));
    }

    #[test]
    fn test_clouds_depend_only_on_time() {
        let viewport = Viewport::new(800.0, 600.0);
        let a = cloud_positions(&viewport, 1000.0);
        let b = cloud_positions(&viewport, 1000.0);
        let c = cloud_positions(&viewport, 5000.0);
        assert_eq!(a.len(), CLOUD_COUNT);
        assert_eq!(a, b);
        assert_ne!(a, c);
        for p in &a {
            assert!(p.x >= -400.0 && p.x < 800.0);
            assert!(p.y >= 30.0 && p.y <= 70.0);
        }
        assert!(cloud_positions(&Viewport::new(0.0, 0.0), 10.0).is_empty());
    }
}
