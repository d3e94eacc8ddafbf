//! Collision detection between the player and pipes
//!
//! Everything is an axis-aligned box, so one overlap test covers it.

use super::state::{Obstacle, Player};
use crate::Rect;

/// True when the two boxes share interior area.
///
/// All four comparisons are strict: boxes that only touch along an edge
/// do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Index of the first live pipe the player overlaps, if any
pub fn first_hit<'a, I>(player: &Player, obstacles: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    let player_box = player.bounds();
    obstacles
        .into_iter()
        .position(|obstacle| overlaps(&player_box, &obstacle.bounds()))
}
