pub mod animation;
pub mod physics;

use glam::Vec2;

use self::animation::Animator;
use self::physics::{Arena, Body, PhysicsConfig};
use crate::geom::Rect;
use crate::input::Controls;

/// Where the player appears on startup.
pub const START_POSITION: Vec2 = Vec2::new(350.0, 280.0);
/// Height of the ground slab along the bottom of the screen.
pub const GROUND_HEIGHT: f32 = 50.0;

/// The animated, player-controlled sprite.
#[derive(Debug, Clone)]
pub struct Player {
    body: Body,
    animator: Animator,
    arena: Arena,
    physics: PhysicsConfig,
}

impl Player {
    /// `sheet` is the full sprite sheet size in pixels.
    pub fn new(sheet: Vec2, start: Vec2, screen: Vec2) -> Self {
        Self {
            body: Body::at_rest(start),
            animator: Animator::new(sheet.x, sheet.y),
            arena: Arena::new(screen, GROUND_HEIGHT),
            physics: PhysicsConfig::default(),
        }
    }

    #[cfg(test)]
    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    /// Run one simulation tick.
    pub fn update(&mut self, controls: &Controls) {
        self.animator.advance();
        if self.animator.adjust_speed(controls.speed) {
            log::debug!("Frame speed now {} FPS", self.animator.speed());
        }

        let size = self.animator.cell().size();
        let outcome = physics::step(&mut self.body, controls, size, &self.arena, &self.physics);

        if outcome.landed {
            log::debug!("Landed at x={:.1}", self.body.pos.x);
        }
        if outcome.jumped {
            log::debug!("Jump from x={:.1}", self.body.pos.x);
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.vel
    }

    pub fn facing_right(&self) -> bool {
        self.body.facing_right
    }

    pub fn grounded(&self) -> bool {
        self.body.grounded
    }

    pub fn frame_index(&self) -> u32 {
        self.animator.frame()
    }

    /// Playback speed in cells per second.
    pub fn frame_speed(&self) -> u32 {
        self.animator.speed()
    }

    /// Visible cell in texture space, unflipped.
    pub fn frame_rec(&self) -> Rect {
        self.animator.cell()
    }

    /// Cell to sample when drawing; mirrored when facing left.
    pub fn source_rect(&self) -> Rect {
        let cell = self.animator.cell();
        if self.body.facing_right {
            cell
        } else {
            cell.flipped_x()
        }
    }

    pub fn ground(&self) -> Rect {
        self.arena.ground
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Direction, SpeedStep};

    const SHEET: Vec2 = Vec2::new(768.0, 128.0);
    const SCREEN: Vec2 = Vec2::new(1200.0, 800.0);

    fn player() -> Player {
        Player::new(SHEET, START_POSITION, SCREEN)
    }

    #[test]
    fn starts_at_rest_facing_right() {
        let p = player();
        assert_eq!(p.position(), START_POSITION);
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert!(p.facing_right());
        assert!(!p.grounded());
        assert_eq!(p.frame_index(), 0);
        assert_eq!(p.frame_speed(), 8);
        assert_eq!(p.ground(), Rect::new(0.0, 750.0, 1200.0, 50.0));
    }

    #[test]
    fn update_advances_physics_and_animation_together() {
        let mut p = player();
        for _ in 0..7 {
            p.update(&Controls::default());
        }
        assert_eq!(p.frame_index(), 1);
        assert_eq!(p.frame_rec().x, 128.0);
        assert!(p.velocity().y > 0.0);
    }

    #[test]
    fn speed_change_takes_effect_after_this_ticks_advance() {
        let mut p = player();
        let faster = Controls {
            speed: SpeedStep::Faster,
            ..Controls::default()
        };
        p.update(&faster);
        assert_eq!(p.frame_speed(), 9);
        assert_eq!(p.frame_index(), 0);
    }

    #[test]
    fn facing_left_mirrors_source() {
        let mut p = player();
        let left = Controls {
            direction: Direction::Left,
            ..Controls::default()
        };
        p.update(&left);
        assert!(!p.facing_right());
        assert_eq!(p.source_rect().w, -128.0);
        assert_eq!(p.frame_rec().w, 128.0);

        // Letting go keeps the last facing.
        p.update(&Controls::default());
        assert!(!p.facing_right());
    }

    #[test]
    fn window_sized_cell_stays_pinned_in_bounds() {
        let mut p = Player::new(Vec2::new(SCREEN.x * 6.0, SCREEN.y), START_POSITION, SCREEN);
        for _ in 0..120 {
            p.update(&Controls::default());
        }
        assert_eq!(p.position(), Vec2::ZERO);
    }

    #[test]
    fn custom_physics_is_used() {
        let mut p = player().with_physics(PhysicsConfig {
            gravity: 2.0,
            ..PhysicsConfig::default()
        });
        p.update(&Controls::default());
        assert_eq!(p.velocity().y, 2.0);
        assert_eq!(p.position().y, 282.0);
    }
}
