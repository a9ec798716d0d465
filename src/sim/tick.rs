//! Fixed timestep match tick
//!
//! Advances a match by one frame: pause toggling, mallet movement, puck
//! physics, goal handling, and the score/time win conditions.

use super::collision::{WallOutcome, advance_puck, resolve_mallet_hit};
use super::state::{
    ClockTick, EndReason, GameEvent, GameState, MatchPhase, Outcome, Puck, Side, Steer,
};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directions, indexed by [`Side::index`]
    pub steer: [Steer; 2],
    /// Pause toggle (pause button / return-to-game button)
    pub pause: bool,
}

/// Advance the match by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == MatchPhase::Over {
        return;
    }

    if input.pause {
        match state.phase {
            MatchPhase::Playing => {
                state.phase = MatchPhase::Paused;
                state.events.push(GameEvent::Paused);
                log::debug!("paused at {}", state.clock_display());
            }
            MatchPhase::Paused => {
                state.phase = MatchPhase::Playing;
                state.events.push(GameEvent::Resumed);
                log::debug!(
                    "resumed after {} paused ticks total",
                    state.clock.paused_ticks
                );
            }
            _ => {}
        }
    }

    match state.phase {
        MatchPhase::Paused => {
            state.clock.advance(ClockTick::Paused);
            return;
        }
        MatchPhase::Faceoff { ticks_left } => {
            state.clock.advance(ClockTick::Excluded);
            if ticks_left <= 1 {
                state.puck.moving = true;
                state.phase = MatchPhase::Playing;
            } else {
                state.phase = MatchPhase::Faceoff {
                    ticks_left: ticks_left - 1,
                };
            }
            return;
        }
        MatchPhase::TimeUp { ticks_left } => {
            state.clock.advance(ClockTick::Excluded);
            if ticks_left <= 1 {
                let outcome = state.time_up_outcome();
                finish(state, outcome, EndReason::TimeUp);
            } else {
                state.phase = MatchPhase::TimeUp {
                    ticks_left: ticks_left - 1,
                };
            }
            return;
        }
        MatchPhase::Playing | MatchPhase::Goal { .. } | MatchPhase::Over => {}
    }

    for side in Side::BOTH {
        let steer = input.steer[side.index()];
        state.mallet_mut(side).steer(steer);
    }

    step_puck(state);

    match state.phase {
        MatchPhase::Playing => {
            state.clock.advance(ClockTick::Counted);
            if !state.puck.alive {
                state.phase = MatchPhase::Goal {
                    ticks_left: state.rules.goal_text_ticks,
                };
                state.events.push(GameEvent::PuckInGoal);
                log::debug!("puck in goal at {:?}", state.puck.pos);
                if state.rules.goal_text_ticks == 0 {
                    award_goal(state);
                }
            }
        }
        MatchPhase::Goal { ticks_left } => {
            state.clock.advance(ClockTick::Excluded);
            if ticks_left <= 1 {
                award_goal(state);
            } else {
                state.phase = MatchPhase::Goal {
                    ticks_left: ticks_left - 1,
                };
            }
        }
        _ => {}
    }

    check_score_limit(state);
    check_time_limit(state);
}

/// Move the puck and resolve mallet contacts
fn step_puck(state: &mut GameState) {
    if !state.puck.alive {
        return;
    }

    if let Some(outcome) = advance_puck(&mut state.puck) {
        record_wall(state, outcome);
    }

    for side in Side::BOTH {
        if !state.puck.alive {
            break;
        }
        let mallet = &state.mallets[side.index()];
        if let Some(contact) = resolve_mallet_hit(mallet, &mut state.puck) {
            state.events.push(GameEvent::MalletHit {
                side: contact.side,
                speed_up: contact.speed_up,
            });
            if contact.speed_up {
                log::trace!("{:?} took the puck, speed {}", side, state.puck.speed);
            }
            if let Some(outcome) = contact.wall {
                record_wall(state, outcome);
            }
        }
    }
}

fn record_wall(state: &mut GameState, outcome: WallOutcome) {
    if let WallOutcome::Bounced(_) = outcome {
        state.events.push(GameEvent::WallBounce);
    }
}

/// Goal display finished: credit the player on the far half from the puck,
/// reset positions, and place a new puck for the faceoff.
fn award_goal(state: &mut GameState) {
    let scorer = Side::of_x(state.puck.pos.x).opposite();
    for mallet in &mut state.mallets {
        mallet.reset();
    }
    let mallet = state.mallet_mut(scorer);
    mallet.score += 1;
    let score = mallet.score;
    log::info!("goal for {} ({}), score now {}", mallet.name, side_name(scorer), score);
    state.events.push(GameEvent::Scored {
        side: scorer,
        score,
    });

    state.puck = Puck::serve(&mut state.rng);
    if state.rules.goal_wait_ticks == 0 {
        state.puck.moving = true;
        state.phase = MatchPhase::Playing;
    } else {
        state.phase = MatchPhase::Faceoff {
            ticks_left: state.rules.goal_wait_ticks,
        };
    }
}

fn check_score_limit(state: &mut GameState) {
    if state.phase == MatchPhase::Over {
        return;
    }
    let target = state.rules.target_score;
    let winner = Side::BOTH
        .into_iter()
        .find(|&side| state.mallet(side).score >= target);
    if let Some(side) = winner {
        finish(state, Outcome::Winner(side), EndReason::ScoreLimit);
    }
}

fn check_time_limit(state: &mut GameState) {
    if state.phase != MatchPhase::Playing {
        return;
    }
    if state.clock.elapsed_ticks() >= state.rules.time_limit_ticks {
        state.puck.alive = false;
        state.events.push(GameEvent::TimeUp);
        log::info!("time up at {}", state.clock_display());
        if state.rules.goal_text_ticks == 0 {
            let outcome = state.time_up_outcome();
            finish(state, outcome, EndReason::TimeUp);
        } else {
            state.phase = MatchPhase::TimeUp {
                ticks_left: state.rules.goal_text_ticks,
            };
        }
    }
}

fn finish(state: &mut GameState, outcome: Outcome, reason: EndReason) {
    state.puck.alive = false;
    state.phase = MatchPhase::Over;
    state.outcome = Some((outcome, reason));
    state.events.push(GameEvent::MatchOver { outcome, reason });
    log::info!(
        "match over ({:?}): {:?}, {} {} - {} {}",
        reason,
        outcome,
        state.mallets[0].name,
        state.mallets[0].score,
        state.mallets[1].score,
        state.mallets[1].name,
    );
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Left => "left",
        Side::Right => "right",
    }
}
