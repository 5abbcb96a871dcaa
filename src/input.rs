use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keys the simulation reads. Anything else is ignored.
const TRACKED_KEYS: [KeyCode; 5] = [
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
];

/// Horizontal movement intent. `D` wins over `A` when both are held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Still,
    Left,
    Right,
}

/// Playback speed adjustment requested this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpeedStep {
    #[default]
    Hold,
    Faster,
    Slower,
}

/// Player control inputs for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    /// Held movement keys.
    pub direction: Direction,
    /// Jump key went down since the previous tick.
    pub jump: bool,
    /// Arrow key went down since the previous tick.
    pub speed: SpeedStep,
}

/// Folds winit key events into held / just-pressed state.
///
/// A press stays visible until `end_tick`, so a key tapped between two
/// simulation ticks is still seen by exactly one of them.
#[derive(Debug, Default)]
pub struct Keyboard {
    held: [bool; TRACKED_KEYS.len()],
    pressed: [bool; TRACKED_KEYS.len()],
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key event. OS auto-repeat never counts as a fresh press.
    pub fn process_key(&mut self, key: PhysicalKey, state: ElementState, repeat: bool) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        let Some(slot) = slot(code) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                if !self.held[slot] && !repeat {
                    self.pressed[slot] = true;
                }
                self.held[slot] = true;
            }
            ElementState::Released => self.held[slot] = false,
        }
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        slot(code).is_some_and(|i| self.held[i])
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        slot(code).is_some_and(|i| self.pressed[i])
    }

    /// Snapshot the controls for the tick about to run.
    pub fn controls(&self) -> Controls {
        let direction = if self.is_down(KeyCode::KeyD) {
            Direction::Right
        } else if self.is_down(KeyCode::KeyA) {
            Direction::Left
        } else {
            Direction::Still
        };

        let speed = if self.is_pressed(KeyCode::ArrowRight) {
            SpeedStep::Faster
        } else if self.is_pressed(KeyCode::ArrowLeft) {
            SpeedStep::Slower
        } else {
            SpeedStep::Hold
        };

        Controls {
            direction,
            jump: self.is_pressed(KeyCode::Space),
            speed,
        }
    }

    /// Consume the just-pressed edges after a tick has seen them.
    pub fn end_tick(&mut self) {
        self.pressed = [false; TRACKED_KEYS.len()];
    }

    /// Drop all state (e.g., on focus loss, when releases never arrive).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn slot(code: KeyCode) -> Option<usize> {
    TRACKED_KEYS.iter().position(|&k| k == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(kb: &mut Keyboard, code: KeyCode) {
        kb.process_key(PhysicalKey::Code(code), ElementState::Pressed, false);
    }

    fn release(kb: &mut Keyboard, code: KeyCode) {
        kb.process_key(PhysicalKey::Code(code), ElementState::Released, false);
    }

    #[test]
    fn held_keys_map_to_direction() {
        let mut kb = Keyboard::new();
        assert_eq!(kb.controls().direction, Direction::Still);

        press(&mut kb, KeyCode::KeyA);
        assert_eq!(kb.controls().direction, Direction::Left);

        // D takes precedence while both are held.
        press(&mut kb, KeyCode::KeyD);
        assert_eq!(kb.controls().direction, Direction::Right);

        release(&mut kb, KeyCode::KeyD);
        assert_eq!(kb.controls().direction, Direction::Left);
    }

    #[test]
    fn jump_is_edge_triggered() {
        let mut kb = Keyboard::new();
        press(&mut kb, KeyCode::Space);
        assert!(kb.controls().jump);

        kb.end_tick();
        assert!(!kb.controls().jump, "holding space must not re-trigger");
        assert!(kb.is_down(KeyCode::Space));

        // Auto-repeat while held is not a new press.
        kb.process_key(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed, true);
        assert!(!kb.controls().jump);

        release(&mut kb, KeyCode::Space);
        press(&mut kb, KeyCode::Space);
        assert!(kb.controls().jump);
    }

    #[test]
    fn tap_between_ticks_survives_until_consumed() {
        let mut kb = Keyboard::new();
        press(&mut kb, KeyCode::ArrowRight);
        release(&mut kb, KeyCode::ArrowRight);
        assert_eq!(kb.controls().speed, SpeedStep::Faster);
        kb.end_tick();
        assert_eq!(kb.controls().speed, SpeedStep::Hold);
    }

    #[test]
    fn right_arrow_wins_over_left() {
        let mut kb = Keyboard::new();
        press(&mut kb, KeyCode::ArrowLeft);
        assert_eq!(kb.controls().speed, SpeedStep::Slower);
        press(&mut kb, KeyCode::ArrowRight);
        assert_eq!(kb.controls().speed, SpeedStep::Faster);
    }

    #[test]
    fn untracked_keys_are_ignored() {
        let mut kb = Keyboard::new();
        press(&mut kb, KeyCode::KeyW);
        assert_eq!(kb.controls(), Controls::default());

        press(&mut kb, KeyCode::KeyD);
        kb.reset();
        assert!(!kb.is_down(KeyCode::KeyD));
    }
}
