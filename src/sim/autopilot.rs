//! Demo mode - the game plays itself
//!
//! Steers toward the middle of the next opening by jumping whenever the
//! player has sunk below it and is falling.

use super::state::GameState;

/// How far below the target the player may sink before jumping
const SINK_TOLERANCE: f32 = 20.0;

/// Vertical center the player should aim for right now
pub fn target_y(state: &GameState) -> f32 {
    let player_left = state.player.pos.x;
    // Nearest obstacle not yet behind the player. Obstacles are in spawn
    // order, so the first match is the closest.
    state
        .obstacles
        .iter()
        .find(|o| o.right_edge() >= player_left)
        .map(|o| (o.top_height + o.bottom_y) / 2.0)
        .unwrap_or(state.viewport.height / 2.0)
}

/// Whether the demo pilot would press jump this frame
pub fn wants_jump(state: &GameState) -> bool {
    let player = &state.player;
    let center = player.pos.y + player.height / 2.0;
    player.dy >= 0.0 && center > target_y(state) + SINK_TOLERANCE
}
