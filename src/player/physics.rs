//! Per-tick kinematics: acceleration, friction, gravity, ground contact,
//! jumping and screen clamping. One tick is one unit of time.

use glam::Vec2;

use crate::geom::Rect;
use crate::input::{Controls, Direction};

/// The tunable physics constants. Units are pixels and ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every tick.
    pub gravity: f32,
    /// Vertical velocity set on jump (negative is up).
    pub jump_velocity: f32,
    /// Horizontal velocity change per tick while a direction is held.
    pub acceleration: f32,
    /// Horizontal velocity removed per tick with no direction held.
    pub friction: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_velocity: -10.0,
            acceleration: 0.1,
            friction: 0.1,
        }
    }
}

/// Static playfield: the screen box and the ground slab.
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    pub screen: Vec2,
    pub ground: Rect,
}

impl Arena {
    pub fn new(screen: Vec2, ground_height: f32) -> Self {
        Self {
            screen,
            ground: Rect::new(0.0, screen.y - ground_height, screen.x, ground_height),
        }
    }
}

/// Moving state of the player.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing_right: bool,
    pub grounded: bool,
}

impl Body {
    pub fn at_rest(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing_right: true,
            grounded: false,
        }
    }
}

/// What happened during a step, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Grounded went from false to true.
    pub landed: bool,
    pub jumped: bool,
}

/// Advance `body` by one tick. `size` is the drawn frame size (w, h).
///
/// Order is fixed: horizontal, gravity, integrate, ground, jump, clamp.
/// The clamp runs last and wins over the ground snap.
pub fn step(
    body: &mut Body,
    controls: &Controls,
    size: Vec2,
    arena: &Arena,
    cfg: &PhysicsConfig,
) -> StepOutcome {
    let was_grounded = body.grounded;
    let mut outcome = StepOutcome::default();

    match controls.direction {
        Direction::Right => {
            body.vel.x += cfg.acceleration;
            body.facing_right = true;
        }
        Direction::Left => {
            body.vel.x -= cfg.acceleration;
            body.facing_right = false;
        }
        Direction::Still => apply_friction(&mut body.vel.x, cfg.friction),
    }

    body.vel.y += cfg.gravity;

    body.pos += body.vel;

    let ground_y = arena.ground.y;
    if body.pos.y + size.y >= ground_y {
        body.pos.y = ground_y - size.y;
        body.vel.y = 0.0;
        body.grounded = true;
        outcome.landed = !was_grounded;
    } else {
        body.grounded = false;
    }

    if body.grounded && controls.jump {
        body.vel.y = cfg.jump_velocity;
        body.grounded = false;
        outcome.jumped = true;
    }

    body.pos.x = body.pos.x.clamp(0.0, arena.screen.x - size.x);
    body.pos.y = body.pos.y.clamp(0.0, arena.screen.y - size.y);

    outcome
}

/// Pull `vx` toward zero by `friction`, snapping to 0 instead of crossing it.
fn apply_friction(vx: &mut f32, friction: f32) {
    if *vx > 0.0 {
        *vx -= friction;
        if *vx < 0.0 {
            *vx = 0.0;
        }
    } else if *vx < 0.0 {
        *vx += friction;
        if *vx > 0.0 {
            *vx = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SpeedStep;

    const SCREEN: Vec2 = Vec2::new(1200.0, 800.0);
    const SIZE: Vec2 = Vec2::new(128.0, 128.0);

    fn arena() -> Arena {
        Arena::new(SCREEN, 50.0)
    }

    fn idle() -> Controls {
        Controls::default()
    }

    fn moving(direction: Direction) -> Controls {
        Controls {
            direction,
            ..Controls::default()
        }
    }

    fn jump() -> Controls {
        Controls {
            jump: true,
            ..Controls::default()
        }
    }

    #[test]
    fn ground_sits_at_bottom() {
        assert_eq!(arena().ground, Rect::new(0.0, 750.0, 1200.0, 50.0));
    }

    #[test]
    fn first_tick_from_start_position() {
        let mut body = Body::at_rest(Vec2::new(350.0, 280.0));
        let outcome = step(&mut body, &idle(), SIZE, &arena(), &PhysicsConfig::default());

        assert_eq!(body.vel.y, 0.5);
        assert_eq!(body.pos.y, 280.5);
        assert_eq!(body.pos.x, 350.0);
        assert!(!body.grounded);
        assert_eq!(outcome, StepOutcome::default());
    }

    #[test]
    fn falls_and_settles_on_ground() {
        let arena = arena();
        let mut body = Body::at_rest(Vec2::new(350.0, 280.0));
        let cfg = PhysicsConfig::default();

        let mut landings = 0;
        for _ in 0..200 {
            if step(&mut body, &idle(), SIZE, &arena, &cfg).landed {
                landings += 1;
            }
        }

        assert_eq!(landings, 1);
        assert!(body.grounded);
        assert_eq!(body.vel.y, 0.0);
        assert_eq!(body.pos.y, arena.ground.y - SIZE.y);
    }

    #[test]
    fn jump_only_from_ground() {
        let arena = arena();
        let cfg = PhysicsConfig::default();

        let mut airborne = Body::at_rest(Vec2::new(350.0, 280.0));
        let outcome = step(&mut airborne, &jump(), SIZE, &arena, &cfg);
        assert!(!outcome.jumped);
        assert_eq!(airborne.vel.y, 0.5);

        let mut body = Body::at_rest(Vec2::new(350.0, arena.ground.y - SIZE.y));
        body.grounded = true;
        let outcome = step(&mut body, &jump(), SIZE, &arena, &cfg);
        assert!(outcome.jumped);
        assert_eq!(body.vel.y, -10.0);
        assert!(!body.grounded);
        assert_eq!(body.pos.y, arena.ground.y - SIZE.y);

        // Next tick the body actually leaves the ground.
        step(&mut body, &idle(), SIZE, &arena, &cfg);
        assert_eq!(body.vel.y, -9.5);
        assert!(body.pos.y < arena.ground.y - SIZE.y);
        assert!(!body.grounded);
    }

    #[test]
    fn jump_lands_again() {
        let arena = arena();
        let cfg = PhysicsConfig::default();
        let mut body = Body::at_rest(Vec2::new(350.0, arena.ground.y - SIZE.y));
        body.grounded = true;

        step(&mut body, &jump(), SIZE, &arena, &cfg);
        let mut landed_after = None;
        for tick in 1..100 {
            if step(&mut body, &idle(), SIZE, &arena, &cfg).landed {
                landed_after = Some(tick);
                break;
            }
        }
        // -10 + 0.5t reaches the ground again after ~40 ticks.
        assert!(matches!(landed_after, Some(38..=42)), "{landed_after:?}");
        assert_eq!(body.pos.y, arena.ground.y - SIZE.y);
    }

    #[test]
    fn acceleration_has_no_cap_and_sets_facing() {
        let arena = arena();
        let cfg = PhysicsConfig::default();
        let mut body = Body::at_rest(Vec2::new(10.0, 100.0));

        for _ in 0..20 {
            step(&mut body, &moving(Direction::Left), SIZE, &arena, &cfg);
        }
        assert!(!body.facing_right);
        assert!((body.vel.x + 2.0).abs() < 1e-4);
        assert_eq!(body.pos.x, 0.0, "clamped at the left edge");

        for _ in 0..60 {
            step(&mut body, &moving(Direction::Right), SIZE, &arena, &cfg);
        }
        assert!(body.facing_right);
        assert!((body.vel.x - 4.0).abs() < 1e-4);
    }

    #[test]
    fn friction_stops_exactly_at_zero() {
        // Quarter-pixel steps are exact in binary floating point.
        let cfg = PhysicsConfig {
            acceleration: 0.25,
            friction: 0.25,
            ..PhysicsConfig::default()
        };
        let arena = arena();

        for held in [1u32, 3, 7, 12] {
            let mut body = Body::at_rest(Vec2::new(100.0, 100.0));
            for _ in 0..held {
                step(&mut body, &moving(Direction::Right), SIZE, &arena, &cfg);
            }
            let v = body.vel.x;
            let budget = (v / cfg.friction).ceil() as u32;

            for _ in 0..budget {
                step(&mut body, &idle(), SIZE, &arena, &cfg);
                assert!(body.vel.x >= 0.0);
            }
            assert_eq!(body.vel.x, 0.0, "held {held} ticks, v = {v}");
        }
    }

    #[test]
    fn friction_never_overshoots_with_default_constants() {
        let arena = arena();
        let cfg = PhysicsConfig::default();

        let mut body = Body::at_rest(Vec2::new(600.0, 100.0));
        for _ in 0..17 {
            step(&mut body, &moving(Direction::Left), SIZE, &arena, &cfg);
        }
        for _ in 0..30 {
            step(&mut body, &idle(), SIZE, &arena, &cfg);
            assert!(body.vel.x <= 0.0);
        }
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn stays_inside_bounds_for_any_input() {
        let arena = arena();
        let cfg = PhysicsConfig::default();
        let mut body = Body::at_rest(Vec2::new(350.0, 280.0));

        // Deterministic pseudo-random input stream.
        let mut seed = 0x2545_f491_u32;
        for _ in 0..20_000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let controls = Controls {
                direction: match seed % 5 {
                    0 | 1 => Direction::Right,
                    2 | 3 => Direction::Left,
                    _ => Direction::Still,
                },
                jump: seed % 7 == 0,
                speed: SpeedStep::Hold,
            };
            step(&mut body, &controls, SIZE, &arena, &cfg);

            assert!(body.pos.x >= 0.0 && body.pos.x <= SCREEN.x - SIZE.x);
            assert!(body.pos.y >= 0.0 && body.pos.y <= SCREEN.y - SIZE.y);
        }
    }

    #[test]
    fn clamp_overrides_ground_snap() {
        // Ground below the screen edge: the snap puts the body past the
        // bottom bound and the clamp pulls it back.
        let arena = Arena {
            screen: SCREEN,
            ground: Rect::new(0.0, 900.0, 1200.0, 50.0),
        };
        let mut body = Body::at_rest(Vec2::new(0.0, 780.0));
        step(&mut body, &idle(), SIZE, &arena, &PhysicsConfig::default());

        assert!(body.grounded);
        assert_eq!(body.pos.y, SCREEN.y - SIZE.y);
    }
}
