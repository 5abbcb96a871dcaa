use std::path::Path;

use glam::Vec2;

use crate::app::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::{AppError, TextureError};
use crate::player::animation::SHEET_CELLS;

/// Decoded sprite sheet pixels (RGBA8, row-major).
#[derive(Debug, Clone)]
pub struct SheetImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SheetImage {
    /// Read and decode a sheet from disk.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        image::open(path)
            .map_err(TextureError::from)
            .and_then(Self::from_image)
            .map_err(|source| AppError::ResourceLoadFailure {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Decode a sheet from an in-memory encoded image.
    #[cfg(test)]
    pub fn decode(bytes: &[u8]) -> Result<Self, TextureError> {
        Self::from_image(image::load_from_memory(bytes)?)
    }

    fn from_image(img: image::DynamicImage) -> Result<Self, TextureError> {
        let rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();
        if width < SHEET_CELLS || height == 0 {
            return Err(TextureError::TooSmall { width, height });
        }
        // A cell larger than the window leaves the bounds clamp with no room.
        if width > SCREEN_WIDTH * SHEET_CELLS || height > SCREEN_HEIGHT {
            return Err(TextureError::TooLarge { width, height });
        }
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// The sprite sheet on the GPU. Released when dropped.
pub struct SpriteTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl SpriteTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &SheetImage) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sprite_sheet"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Pixel art: no filtering between texels.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sheet_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        log::info!("Sprite sheet uploaded: {}x{}", image.width, image.height);

        Self {
            texture,
            view,
            sampler,
            width: image.width,
            height: image.height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl Drop for SpriteTexture {
    fn drop(&mut self) {
        self.texture.destroy();
        log::info!("Sprite sheet unloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_to_rgba() {
        let sheet = SheetImage::decode(&png(12, 4)).unwrap();
        assert_eq!((sheet.width, sheet.height), (12, 4));
        assert_eq!(sheet.rgba.len(), 12 * 4 * 4);
        assert_eq!(&sheet.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn rejects_sheet_narrower_than_cell_count() {
        let err = SheetImage::decode(&png(5, 4)).unwrap_err();
        assert!(matches!(err, TextureError::TooSmall { width: 5, height: 4 }));
    }

    #[test]
    fn rejects_cell_larger_than_window() {
        let err = SheetImage::decode(&png(768, SCREEN_HEIGHT + 100)).unwrap_err();
        assert!(matches!(err, TextureError::TooLarge { width: 768, height: 900 }));

        let wide = SCREEN_WIDTH * SHEET_CELLS + SHEET_CELLS;
        let err = SheetImage::decode(&png(wide, 4)).unwrap_err();
        assert!(matches!(err, TextureError::TooLarge { .. }));
    }

    #[test]
    fn accepts_cell_exactly_window_sized() {
        let sheet = SheetImage::decode(&png(SCREEN_WIDTH * SHEET_CELLS, SCREEN_HEIGHT)).unwrap();
        assert_eq!(sheet.height, SCREEN_HEIGHT);
    }

    #[test]
    fn rejects_garbage() {
        let err = SheetImage::decode(b"definitely not a png").unwrap_err();
        assert!(matches!(err, TextureError::Decode(_)));
    }

    #[test]
    fn missing_file_is_a_load_failure() {
        let path = Path::new("no/such/dir/scarfy.png");
        let err = SheetImage::open(path).unwrap_err();
        assert_eq!(err.exit_code(), -1);
        assert!(matches!(err, AppError::ResourceLoadFailure { .. }));
    }
}
