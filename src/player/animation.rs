use crate::geom::Rect;
use crate::input::SpeedStep;

/// Number of cells laid out horizontally in the sprite sheet.
pub const SHEET_CELLS: u32 = 6;
/// Host loop rate the playback speed is expressed against.
pub const TICKS_PER_SECOND: u32 = 60;
pub const MIN_FRAME_SPEED: u32 = 1;
pub const MAX_FRAME_SPEED: u32 = 15;
pub const DEFAULT_FRAME_SPEED: u32 = 8;

/// Sprite-sheet playback state.
#[derive(Debug, Clone, Copy)]
pub struct Animator {
    /// Visible cell, 0..SHEET_CELLS.
    frame: u32,
    /// Ticks since the last frame change.
    counter: u32,
    /// Cells shown per second.
    speed: u32,
    sheet_width: f32,
    cell: Rect,
}

impl Animator {
    pub fn new(sheet_width: f32, sheet_height: f32) -> Self {
        Self {
            frame: 0,
            counter: 0,
            speed: DEFAULT_FRAME_SPEED,
            sheet_width,
            cell: Rect::new(0.0, 0.0, sheet_width / SHEET_CELLS as f32, sheet_height),
        }
    }

    /// Count one tick. Returns true when the visible cell changed.
    pub fn advance(&mut self) -> bool {
        self.counter += 1;
        if self.counter < self.ticks_per_frame() {
            return false;
        }

        self.counter = 0;
        self.frame = (self.frame + 1) % SHEET_CELLS;
        self.cell.x = self.frame as f32 * self.sheet_width / SHEET_CELLS as f32;
        true
    }

    /// Apply a speed step, clamped to [MIN_FRAME_SPEED, MAX_FRAME_SPEED].
    /// Returns true if the speed actually changed.
    pub fn adjust_speed(&mut self, step: SpeedStep) -> bool {
        let before = self.speed;
        self.speed = match step {
            SpeedStep::Hold => self.speed,
            SpeedStep::Faster => self.speed + 1,
            SpeedStep::Slower => self.speed.saturating_sub(1),
        }
        .clamp(MIN_FRAME_SPEED, MAX_FRAME_SPEED);
        self.speed != before
    }

    /// Ticks each cell stays on screen: floor(60 / speed).
    pub fn ticks_per_frame(&self) -> u32 {
        TICKS_PER_SECOND / self.speed
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Source rectangle of the visible cell in texture space.
    pub fn cell(&self) -> Rect {
        self.cell
    }
}
