use glam::Vec2;

/// Axis-aligned rectangle in pixels. Used for both texture-space
/// (sprite sheet cells) and screen-space (ground, HUD boxes) geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
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

    /// Rectangle with its top-left corner at `pos`.
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn size(self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Same rectangle with the width negated. A negative source width
    /// mirrors the sampled cell horizontally when drawn.
    pub fn flipped_x(self) -> Self {
        Self { w: -self.w, ..self }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_only_touches_width() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0).flipped_x();
        assert_eq!(r, Rect::new(10.0, 20.0, -30.0, 40.0));
        assert_eq!(r.flipped_x(), Rect::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn offset_moves_origin() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).offset(15.0, 40.0);
        assert_eq!(r, Rect::new(16.0, 42.0, 3.0, 4.0));
    }
}
