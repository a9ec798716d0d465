//! Match state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::{Rgb, court_center};

/// Which half of the court a mallet defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Half of the court containing `x` (the centre line counts as right)
    pub fn of_x(x: f32) -> Side {
        if x < COURT_WIDTH / 2.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Axis-aligned region a body is confined to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The whole court
    pub fn court() -> Self {
        Self::new(Vec2::ZERO, Vec2::new(COURT_WIDTH, COURT_HEIGHT))
    }

    /// One half of the court
    pub fn half(side: Side) -> Self {
        let mid = COURT_WIDTH / 2.0;
        match side {
            Side::Left => Self::new(Vec2::ZERO, Vec2::new(mid, COURT_HEIGHT)),
            Side::Right => Self::new(Vec2::new(mid, 0.0), Vec2::new(COURT_WIDTH, COURT_HEIGHT)),
        }
    }
}

/// Key bindings for one mallet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
}

impl Controls {
    pub const WSAD: Controls = Controls {
        up: 'w',
        down: 's',
        left: 'a',
        right: 'd',
    };
    pub const IKJL: Controls = Controls {
        up: 'i',
        down: 'k',
        left: 'j',
        right: 'l',
    };

    /// The hardcoded scheme for each side
    pub fn for_side(side: Side) -> Controls {
        match side {
            Side::Left => Self::WSAD,
            Side::Right => Self::IKJL,
        }
    }

    /// Sample which directions are held, given a key lookup
    pub fn steer(&self, held: impl Fn(char) -> bool) -> Steer {
        Steer {
            up: held(self.up),
            down: held(self.down),
            left: held(self.left),
            right: held(self.right),
        }
    }
}

/// Directions held for one mallet during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steer {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// A player-controlled mallet
#[derive(Debug, Clone)]
pub struct Mallet {
    pub side: Side,
    pub pos: Vec2,
    /// Kick-off position, restored after every goal
    pub home: Vec2,
    pub radius: f32,
    /// Distance moved per held direction per tick
    pub speed: f32,
    pub bounds: Bounds,
    /// `None` for mallets shown on menus that nobody drives
    pub controls: Option<Controls>,
    pub color: Rgb,
    pub score: u32,
    pub name: String,
}

impl Mallet {
    /// A mallet at its home position on `side`
    pub fn new(side: Side, name: impl Into<String>) -> Self {
        let home = Self::home_for(side);
        Self {
            side,
            pos: home,
            home,
            radius: MALLET_RADIUS,
            speed: MALLET_SPEED,
            bounds: Bounds::half(side),
            controls: Some(Controls::for_side(side)),
            color: match side {
                Side::Left => Rgb::RED,
                Side::Right => Rgb::BLUE,
            },
            score: 0,
            name: name.into(),
        }
    }

    /// A decorative mallet with no controls
    pub fn display(side: Side) -> Self {
        let mut mallet = Self::new(side, "");
        mallet.controls = None;
        mallet
    }

    pub fn home_for(side: Side) -> Vec2 {
        let y = COURT_HEIGHT / 2.0 - MALLET_HOME_LIFT;
        match side {
            Side::Left => Vec2::new(MALLET_HOME_INSET, y),
            Side::Right => Vec2::new(COURT_WIDTH - MALLET_HOME_INSET, y),
        }
    }

    /// Apply held directions; each step is only taken if it keeps the
    /// mallet (plus its radius) inside its bounds.
    pub fn steer(&mut self, steer: Steer) {
        let step = self.speed;
        let r = self.radius;
        let x_margin = step + r + MALLET_EDGE_MARGIN;

        if steer.up && self.pos.y >= self.bounds.min.y + step + r {
            self.pos.y -= step;
        }
        if steer.down && self.pos.y <= self.bounds.max.y - step - r {
            self.pos.y += step;
        }
        if steer.left && self.pos.x >= self.bounds.min.x + x_margin {
            self.pos.x -= step;
        }
        if steer.right && self.pos.x <= self.bounds.max.x - x_margin {
            self.pos.x += step;
        }
    }

    /// Back to the kick-off spot
    pub fn reset(&mut self) {
        self.pos = self.home;
    }

    /// Whether the mallet body lies inside its half-court
    pub fn within_bounds(&self) -> bool {
        let r = self.radius;
        self.pos.x - r >= self.bounds.min.x
            && self.pos.x + r <= self.bounds.max.x
            && self.pos.y - r >= self.bounds.min.y
            && self.pos.y + r <= self.bounds.max.y
    }
}

/// The puck
#[derive(Debug, Clone)]
pub struct Puck {
    pub pos: Vec2,
    pub radius: f32,
    /// Distance travelled per tick
    pub speed: f32,
    pub speed_increment: f32,
    /// Travel direction (radians, screen coordinates: +y is down)
    pub angle: f32,
    pub bounds: Bounds,
    /// Side of the mallet that touched the puck last
    pub last_toucher: Option<Side>,
    /// A freshly placed puck sits still until something sets it going
    pub moving: bool,
    /// Cleared when the puck goes into a goal
    pub alive: bool,
}

impl Puck {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            radius: PUCK_RADIUS,
            speed: PUCK_START_SPEED,
            speed_increment: PUCK_SPEED_INCREMENT,
            angle,
            bounds: Bounds::court(),
            last_toucher: None,
            moving: false,
            alive: true,
        }
    }

    /// A stationary puck at centre court, pointing at one of the players
    pub fn serve(rng: &mut Pcg32) -> Self {
        let angle = if rng.random_bool(0.5) {
            std::f32::consts::PI - SERVE_ANGLE_OFFSET
        } else {
            -SERVE_ANGLE_OFFSET
        };
        Self::new(court_center(), angle)
    }

    /// Unit vector of the travel direction
    #[inline]
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// Radius plus one tick of travel: how close the puck may get to a wall
    #[inline]
    pub fn margin(&self) -> f32 {
        self.radius + self.speed
    }

    /// Whether the puck lies entirely within the goal-mouth band
    pub fn in_goal_mouth(&self) -> bool {
        self.pos.y - self.radius >= GOAL_TOP && self.pos.y + self.radius <= GOAL_BOTTOM
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Active gameplay
    Playing,
    /// Puck is in a goal; "Goal!" is shown, mallets can still move
    Goal { ticks_left: u32 },
    /// Positions reset after a goal; everything is frozen
    Faceoff { ticks_left: u32 },
    /// Paused from the pause button
    Paused,
    /// Time limit reached; "Time Up!" is shown before the result
    TimeUp { ticks_left: u32 },
    /// Match finished
    Over,
}

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

/// Why a match finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    ScoreLimit,
    TimeUp,
}

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    MalletHit { side: Side, speed_up: bool },
    WallBounce,
    /// Puck went in; the scorer is credited when the goal display ends
    PuckInGoal,
    Scored { side: Side, score: u32 },
    Paused,
    Resumed,
    TimeUp,
    MatchOver { outcome: Outcome, reason: EndReason },
}

/// Win conditions and timers, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRules {
    pub ticks_per_sec: u32,
    pub target_score: u32,
    pub time_limit_ticks: u64,
    pub goal_text_ticks: u32,
    pub goal_wait_ticks: u32,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            ticks_per_sec: TICKS_PER_SEC,
            target_score: 7,
            time_limit_ticks: 3 * 60 * TICKS_PER_SEC as u64,
            goal_text_ticks: 2 * TICKS_PER_SEC,
            goal_wait_ticks: TICKS_PER_SEC,
        }
    }
}

/// Match clock. Counts every tick the match runs and how many of those
/// were spent paused or celebrating goals; only the rest is elapsed time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionClock {
    pub run_ticks: u64,
    pub excluded_ticks: u64,
    /// Portion of `excluded_ticks` spent on the pause screen
    pub paused_ticks: u64,
}

/// What a tick was spent on, for the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    Counted,
    Excluded,
    Paused,
}

impl SessionClock {
    pub fn advance(&mut self, kind: ClockTick) {
        self.run_ticks += 1;
        match kind {
            ClockTick::Counted => {}
            ClockTick::Excluded => self.excluded_ticks += 1,
            ClockTick::Paused => {
                self.excluded_ticks += 1;
                self.paused_ticks += 1;
            }
        }
    }

    #[inline]
    pub fn elapsed_ticks(&self) -> u64 {
        self.run_ticks - self.excluded_ticks
    }

    /// Whole seconds of play
    pub fn elapsed_secs(&self, ticks_per_sec: u32) -> u64 {
        self.elapsed_ticks() / ticks_per_sec.max(1) as u64
    }
}

/// Format seconds as `MM:SS`
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Complete state of one match
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the serve RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Indexed by [`Side::index`]
    pub mallets: [Mallet; 2],
    pub puck: Puck,
    pub phase: MatchPhase,
    pub clock: SessionClock,
    pub rules: MatchRules,
    pub outcome: Option<(Outcome, EndReason)>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, rules: MatchRules, names: [String; 2]) -> Self {
        let [left, right] = names;
        let mut rng = Pcg32::seed_from_u64(seed);
        let puck = Puck::serve(&mut rng);
        Self {
            seed,
            rng,
            mallets: [Mallet::new(Side::Left, left), Mallet::new(Side::Right, right)],
            puck,
            phase: MatchPhase::Playing,
            clock: SessionClock::default(),
            rules,
            outcome: None,
            events: Vec::new(),
        }
    }

    pub fn mallet(&self, side: Side) -> &Mallet {
        &self.mallets[side.index()]
    }

    pub fn mallet_mut(&mut self, side: Side) -> &mut Mallet {
        &mut self.mallets[side.index()]
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::Over
    }

    /// The clock is hidden while goals and the time-up banner are shown
    pub fn clock_visible(&self) -> bool {
        matches!(self.phase, MatchPhase::Playing | MatchPhase::Paused)
    }

    /// Elapsed play time as `MM:SS`
    pub fn clock_display(&self) -> String {
        format_clock(self.clock.elapsed_secs(self.rules.ticks_per_sec))
    }

    /// Mallets credited with the win: one winner, or both on a draw
    pub fn winners(&self) -> Vec<&Mallet> {
        match self.outcome {
            Some((Outcome::Winner(side), _)) => vec![self.mallet(side)],
            Some((Outcome::Draw, _)) => self.mallets.iter().collect(),
            None => Vec::new(),
        }
    }

    /// Result when the clock runs out: higher score wins, equal is a draw
    pub fn time_up_outcome(&self) -> Outcome {
        let left = self.mallets[0].score;
        let right = self.mallets[1].score;
        match left.cmp(&right) {
            std::cmp::Ordering::Greater => Outcome::Winner(Side::Left),
            std::cmp::Ordering::Less => Outcome::Winner(Side::Right),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names() -> [String; 2] {
        ["Ada".to_string(), "Bob".to_string()]
    }

    #[test]
    fn test_mallets_start_home_in_their_half() {
        let state = GameState::new(1, MatchRules::default(), names());
        assert_eq!(state.mallets[0].pos, Vec2::new(75.0, 240.0));
        assert_eq!(state.mallets[1].pos, Vec2::new(925.0, 240.0));
        assert!(state.mallets.iter().all(Mallet::within_bounds));
        assert_eq!(state.mallets[0].controls, Some(Controls::WSAD));
        assert_eq!(state.mallets[1].controls, Some(Controls::IKJL));
    }

    #[test]
    fn test_mallet_stops_at_top_edge() {
        let mut mallet = Mallet::new(Side::Left, "Ada");
        let up = Steer {
            up: true,
            ..Default::default()
        };
        for _ in 0..100 {
            mallet.steer(up);
        }
        assert!(mallet.pos.y - mallet.radius >= 0.0);
        assert!(mallet.pos.y - mallet.radius < mallet.speed);
    }

    #[test]
    fn test_mallet_cannot_cross_centre_line() {
        let mut mallet = Mallet::new(Side::Left, "Ada");
        let right = Steer {
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            mallet.steer(right);
        }
        assert!(mallet.pos.x + mallet.radius + MALLET_EDGE_MARGIN <= COURT_WIDTH / 2.0);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut mallet = Mallet::new(Side::Right, "Bob");
        let start = mallet.pos;
        mallet.steer(Steer {
            up: true,
            down: true,
            left: true,
            right: true,
        });
        assert_eq!(mallet.pos, start);
    }

    #[test]
    fn test_serve_points_at_a_player() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            let puck = Puck::serve(&mut rng);
            assert_eq!(puck.pos, court_center());
            assert!(!puck.moving);
            assert!(puck.heading().x.abs() > 0.99);
        }
    }

    #[test]
    fn test_clock_excludes_paused_ticks() {
        let mut clock = SessionClock::default();
        for _ in 0..120 {
            clock.advance(ClockTick::Counted);
        }
        for _ in 0..600 {
            clock.advance(ClockTick::Paused);
        }
        assert_eq!(clock.elapsed_secs(60), 2);
        assert_eq!(clock.paused_ticks, 600);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(180), "03:00");
    }

    #[test]
    fn test_time_up_outcome() {
        let mut state = GameState::new(1, MatchRules::default(), names());
        assert_eq!(state.time_up_outcome(), Outcome::Draw);
        state.mallets[1].score = 2;
        assert_eq!(state.time_up_outcome(), Outcome::Winner(Side::Right));
    }

    fn steer_strategy() -> impl Strategy<Value = Steer> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(up, down, left, right)| Steer {
                up,
                down,
                left,
                right,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_mallet_stays_in_half_court(
            left_side in any::<bool>(),
            steps in prop::collection::vec(steer_strategy(), 0..400),
        ) {
            let side = if left_side { Side::Left } else { Side::Right };
            let mut mallet = Mallet::new(side, "P");
            for steer in steps {
                mallet.steer(steer);
                prop_assert!(mallet.within_bounds());
                prop_assert_eq!(Side::of_x(mallet.pos.x), side);
            }
        }
    }
}
