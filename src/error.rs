use std::path::PathBuf;

use thiserror::Error;

use crate::app::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::player::animation::SHEET_CELLS;

/// Exit code reported when the sprite sheet cannot be loaded.
pub const EXIT_LOAD_FAILURE: i32 = -1;

/// Why a sprite sheet could not be turned into a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error(transparent)]
    Decode(#[from] image::ImageError),
    #[error("sheet is {width}x{height}, need at least {} pixels across and 1 down", SHEET_CELLS)]
    TooSmall { width: u32, height: u32 },
    #[error(
        "sheet is {width}x{height}, one cell must fit in the {}x{} window",
        SCREEN_WIDTH,
        SCREEN_HEIGHT
    )]
    TooLarge { width: u32, height: u32 },
}

/// Fatal application errors. Everything past startup is infallible.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to load texture {}: {source}", path.display())]
    ResourceLoadFailure {
        path: PathBuf,
        #[source]
        source: TextureError,
    },
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("wgpu surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("wgpu device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ResourceLoadFailure { .. } => EXIT_LOAD_FAILURE,
            _ => 1,
        }
    }
}
