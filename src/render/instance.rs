use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::scene::Primitive;

/// Per-instance data uploaded to GPU each frame.
/// Stride = 40 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    /// Destination rectangle in screen pixels (x, y, w, h).
    pub dest: [f32; 4],
    /// Source UV rectangle (u0, v0, u1, v1). u1 < u0 mirrors the quad.
    pub uv: [f32; 4],
    /// RGBA color packed as u32; the tint for textured quads.
    pub color: u32,
    /// 1 = sample the sprite sheet, 0 = solid color.
    pub textured: u32,
}

impl QuadInstance {
    /// Convert a primitive to a quad. Text is drawn elsewhere and yields None.
    /// `sheet` is the sprite sheet size in pixels.
    pub fn from_primitive(prim: &Primitive, sheet: Vec2) -> Option<Self> {
        match *prim {
            Primitive::Sprite { src, pos, tint } => {
                // Negative width: sample the same cell right-to-left.
                let (left, right) = if src.w < 0.0 {
                    (src.x - src.w, src.x)
                } else {
                    (src.x, src.x + src.w)
                };
                Some(Self {
                    dest: [pos.x, pos.y, src.w.abs(), src.h],
                    uv: [
                        left / sheet.x,
                        src.y / sheet.y,
                        right / sheet.x,
                        (src.y + src.h) / sheet.y,
                    ],
                    color: tint,
                    textured: 1,
                })
            }
            Primitive::Fill { rect, color } => Some(Self {
                dest: [rect.x, rect.y, rect.w, rect.h],
                uv: [0.0; 4],
                color,
                textured: 0,
            }),
            Primitive::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rect;
    use crate::scene::palette;

    const SHEET: Vec2 = Vec2::new(768.0, 128.0);

    #[test]
    fn stride_matches_vertex_layout() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 40);
    }

    #[test]
    fn sprite_maps_cell_to_uv() {
        let prim = Primitive::Sprite {
            src: Rect::new(256.0, 0.0, 128.0, 128.0),
            pos: Vec2::new(350.0, 280.0),
            tint: palette::WHITE,
        };
        let q = QuadInstance::from_primitive(&prim, SHEET).unwrap();
        assert_eq!(q.dest, [350.0, 280.0, 128.0, 128.0]);
        assert_eq!(q.uv, [256.0 / 768.0, 0.0, 384.0 / 768.0, 1.0]);
        assert_eq!(q.textured, 1);
    }

    #[test]
    fn negative_width_mirrors_same_cell() {
        let cell = Rect::new(256.0, 0.0, 128.0, 128.0);
        let prim = Primitive::Sprite {
            src: cell.flipped_x(),
            pos: Vec2::ZERO,
            tint: palette::WHITE,
        };
        let q = QuadInstance::from_primitive(&prim, SHEET).unwrap();
        assert_eq!(q.dest[2], 128.0, "drawn at full width");
        assert_eq!(q.uv[0], 384.0 / 768.0);
        assert_eq!(q.uv[2], 256.0 / 768.0);
    }

    #[test]
    fn fill_is_untextured_and_text_is_skipped() {
        let fill = Primitive::Fill {
            rect: Rect::new(0.0, 750.0, 1200.0, 50.0),
            color: palette::BROWN,
        };
        let q = QuadInstance::from_primitive(&fill, SHEET).unwrap();
        assert_eq!(q.textured, 0);
        assert_eq!(q.color, palette::BROWN);

        let text = Primitive::Text(crate::scene::TextItem {
            text: "hi".into(),
            pos: Vec2::ZERO,
            size: 10.0,
            color: palette::GRAY,
        });
        assert!(QuadInstance::from_primitive(&text, SHEET).is_none());
    }
}
