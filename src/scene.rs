use glam::Vec2;

use crate::geom::Rect;
use crate::player::animation::MAX_FRAME_SPEED;
use crate::player::Player;

/// Colors packed as RGBA u32 (0xRRGGBBAA).
pub mod palette {
    pub const RAYWHITE: u32 = 0xF5F5F5FF;
    pub const WHITE: u32 = 0xFFFFFFFF;
    pub const LIME: u32 = 0x009E2FFF;
    pub const RED: u32 = 0xE62937FF;
    pub const MAROON: u32 = 0xBE2137FF;
    pub const DARKGRAY: u32 = 0x505050FF;
    pub const GRAY: u32 = 0x828282FF;
    pub const BROWN: u32 = 0x7F6A4FFF;

    pub fn to_rgba(c: u32) -> [u8; 4] {
        c.to_be_bytes()
    }
}

/// Where the whole sheet preview is drawn.
const SHEET_ORIGIN: Vec2 = Vec2::new(15.0, 40.0);
const TEXT_SIZE: f32 = 10.0;
const SPEED_CELL: f32 = 20.0;
const SPEED_CELL_STRIDE: f32 = 21.0;

/// A line of text at a screen position (top-left anchored).
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
}

/// One drawing primitive, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Part of the sprite sheet. A negative `src.w` mirrors horizontally.
    Sprite { src: Rect, pos: Vec2, tint: u32 },
    /// Solid rectangle.
    Fill { rect: Rect, color: u32 },
    Text(TextItem),
}

/// Everything to draw for one frame, in painter's order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    clear: u32,
    items: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame cleared to `color`. Keeps the allocation.
    pub fn clear(&mut self, color: u32) {
        self.clear = color;
        self.items.clear();
    }

    pub fn clear_color(&self) -> u32 {
        self.clear
    }

    pub fn items(&self) -> &[Primitive] {
        &self.items
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn sprite(&mut self, src: Rect, pos: Vec2, tint: u32) {
        self.items.push(Primitive::Sprite { src, pos, tint });
    }

    pub fn rect_filled(&mut self, rect: Rect, color: u32) {
        self.items.push(Primitive::Fill { rect, color });
    }

    /// 1-pixel outline drawn inside `rect`.
    pub fn rect_outline(&mut self, rect: Rect, color: u32) {
        let Rect { x, y, w, h } = rect;
        self.rect_filled(Rect::new(x, y, w, 1.0), color);
        self.rect_filled(Rect::new(x, y + h - 1.0, w, 1.0), color);
        self.rect_filled(Rect::new(x, y + 1.0, 1.0, h - 2.0), color);
        self.rect_filled(Rect::new(x + w - 1.0, y + 1.0, 1.0, h - 2.0), color);
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: u32) {
        self.items.push(Primitive::Text(TextItem {
            text: text.into(),
            pos,
            size,
            color,
        }));
    }
}

/// Build the frame: sheet preview, speed meter, player, credit, ground.
pub fn compose(player: &Player, sheet: Vec2, screen: Vec2, list: &mut DrawList) {
    list.clear(palette::RAYWHITE);

    // Whole sheet with the current cell highlighted.
    list.sprite(Rect::at(Vec2::ZERO, sheet), SHEET_ORIGIN, palette::WHITE);
    list.rect_outline(Rect::at(SHEET_ORIGIN, sheet), palette::LIME);
    list.rect_outline(
        player.frame_rec().offset(SHEET_ORIGIN.x, SHEET_ORIGIN.y),
        palette::RED,
    );

    let speed = player.frame_speed();
    list.text("FRAME SPEED: ", Vec2::new(165.0, 210.0), TEXT_SIZE, palette::DARKGRAY);
    list.text(
        format!("{speed:02} FPS"),
        Vec2::new(575.0, 210.0),
        TEXT_SIZE,
        palette::DARKGRAY,
    );
    list.text(
        "PRESS RIGHT/LEFT KEYS to CHANGE SPEED!",
        Vec2::new(290.0, 240.0),
        TEXT_SIZE,
        palette::DARKGRAY,
    );

    for i in 0..MAX_FRAME_SPEED {
        let cell = Rect::new(250.0 + SPEED_CELL_STRIDE * i as f32, 205.0, SPEED_CELL, SPEED_CELL);
        if i < speed {
            list.rect_filled(cell, palette::RED);
        }
        list.rect_outline(cell, palette::MAROON);
    }

    list.sprite(player.source_rect(), player.position(), palette::WHITE);

    list.text(
        "(c) Scarfy sprite by Eiden Marsal",
        Vec2::new(screen.x - 200.0, screen.y - 20.0),
        TEXT_SIZE,
        palette::GRAY,
    );

    list.rect_filled(player.ground(), palette::BROWN);
}
