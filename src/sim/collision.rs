//! Collision detection and response
//!
//! Everything here is circle-vs-circle or circle-vs-edge. Penetration is
//! measured with the puck's per-tick travel included, so contacts are caught
//! one step early instead of after the puck is already inside something.

use glam::Vec2;

use super::state::{Mallet, Puck, Side};
use crate::{normalize_angle, polar_to_cartesian};

/// Court boundary the puck is touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Bottom,
    Top,
}

impl Wall {
    /// End boundaries hold the goals
    pub fn is_end(self) -> bool {
        matches!(self, Wall::Left | Wall::Right)
    }
}

/// What happened when the puck met a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallOutcome {
    Bounced(Wall),
    Goal(Wall),
}

/// Result of a mallet/puck check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Centre distance minus radii and the puck's travel margin; `<= 0` on hit
    pub gap: f32,
    /// Direction from mallet centre to puck centre (radians)
    pub angle: f32,
}

/// A resolved mallet contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub side: Side,
    /// Whether this contact changed hands and sped the puck up
    pub speed_up: bool,
    /// Wall result of the extra step taken after the push-out
    pub wall: Option<WallOutcome>,
}

/// End boundary (left/right) the puck is within one tick of
fn end_contact(puck: &Puck) -> Option<Wall> {
    let m = puck.margin();
    if puck.pos.x - m <= puck.bounds.min.x {
        Some(Wall::Left)
    } else if puck.pos.x + m >= puck.bounds.max.x {
        Some(Wall::Right)
    } else {
        None
    }
}

/// Side boundary (bottom/top) the puck is within one tick of
fn side_contact(puck: &Puck) -> Option<Wall> {
    let m = puck.margin();
    if puck.pos.y + m >= puck.bounds.max.y {
        Some(Wall::Bottom)
    } else if puck.pos.y - m <= puck.bounds.min.y {
        Some(Wall::Top)
    } else {
        None
    }
}

/// Which wall (if any) the puck is within one tick of.
///
/// End boundaries take precedence, so a puck in a corner is checked for a
/// goal before it bounces off the side.
pub fn wall_contact(puck: &Puck) -> Option<Wall> {
    end_contact(puck).or_else(|| side_contact(puck))
}

/// Whether the puck is at an end boundary with its whole body inside the
/// goal-mouth band
pub fn is_goal(puck: &Puck) -> bool {
    let m = puck.margin();
    let at_end = puck.pos.x - m <= puck.bounds.min.x || puck.pos.x + m >= puck.bounds.max.x;
    at_end && puck.in_goal_mouth()
}

/// Reflect the puck off `wall`, or kill it if it went into a goal.
pub fn bounce_off_wall(puck: &mut Puck, wall: Wall) -> WallOutcome {
    let m = puck.margin();
    match wall {
        Wall::Top | Wall::Bottom => {
            puck.angle = normalize_angle(-puck.angle);
            puck.pos.y = if wall == Wall::Top {
                puck.bounds.min.y + m
            } else {
                puck.bounds.max.y - m
            };
            WallOutcome::Bounced(wall)
        }
        Wall::Left | Wall::Right => {
            if is_goal(puck) {
                puck.alive = false;
                return WallOutcome::Goal(wall);
            }
            puck.angle = normalize_angle(std::f32::consts::PI - puck.angle);
            puck.pos.x = if wall == Wall::Left {
                puck.bounds.min.x + m
            } else {
                puck.bounds.max.x - m
            };
            WallOutcome::Bounced(wall)
        }
    }
}

/// One movement step: resolve wall contact on both axes, then travel if
/// moving. Returns the first wall met.
pub fn advance_puck(puck: &mut Puck) -> Option<WallOutcome> {
    let mut outcome = None;
    if let Some(wall) = end_contact(puck) {
        let hit = bounce_off_wall(puck, wall);
        if let WallOutcome::Goal(_) = hit {
            return Some(hit);
        }
        outcome = Some(hit);
    }
    if let Some(wall) = side_contact(puck) {
        let hit = bounce_off_wall(puck, wall);
        outcome.get_or_insert(hit);
    }
    if puck.moving {
        puck.pos += puck.heading() * puck.speed;
    }
    outcome
}

/// Check a mallet against the puck
pub fn mallet_puck_collision(mallet_pos: Vec2, mallet_radius: f32, puck: &Puck) -> CollisionResult {
    let gap = mallet_pos.distance(puck.pos) - (mallet_radius + puck.radius + puck.speed);
    let dx = puck.pos.x - mallet_pos.x;
    let dy = puck.pos.y - mallet_pos.y;
    // A puck directly above or below still gets knocked sideways a little
    let dx = if dx == 0.0 { 1.0 } else { dx };
    CollisionResult {
        hit: gap <= 0.0,
        gap,
        angle: dy.atan2(dx),
    }
}

/// Resolve a mallet hit: send the puck directly away from the mallet centre,
/// speed it up if the mallet is a new toucher, push it out of the mallet and
/// take one step.
pub fn resolve_mallet_hit(mallet: &Mallet, puck: &mut Puck) -> Option<Contact> {
    let result = mallet_puck_collision(mallet.pos, mallet.radius, puck);
    if !result.hit {
        return None;
    }

    puck.angle = result.angle;
    let speed_up = puck.last_toucher != Some(mallet.side);
    if speed_up {
        puck.speed += puck.speed_increment;
    }
    puck.last_toucher = Some(mallet.side);
    puck.moving = true;

    puck.pos += polar_to_cartesian(-result.gap, puck.angle);
    let wall = advance_puck(puck);

    Some(Contact {
        side: mallet.side,
        speed_up,
        wall,
    })
}
