//! egui layer drawn over the sprite pass: the scene's text lines and the
//! F12 debug window.

pub mod debug;
pub mod ring;
pub mod timer;

use winit::window::Window;

use self::debug::DebugSnapshot;
use crate::render::GpuState;
use crate::scene::{palette, TextItem};

/// Output of one egui frame, ready to upload and render.
pub struct HudFrame {
    pub primitives: Vec<egui::epaint::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub screen_descriptor: egui_wgpu::ScreenDescriptor,
}

/// egui context, winit glue and wgpu renderer.
pub struct Hud {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub debug_visible: bool,
}

impl Hud {
    pub fn new(window: &Window, gpu: &GpuState) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            debug_visible: false,
        }
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::info!(
            "Debug overlay {}",
            if self.debug_visible { "shown" } else { "hidden" }
        );
    }

    /// Forward a winit event to egui. The debug window never takes keyboard
    /// focus, so whether egui consumed the event is not reported.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) {
        let _ = self.egui_state.on_window_event(window, event);
    }

    /// Run the egui frame: scene text plus the debug window when visible.
    pub fn run_frame<'a>(
        &mut self,
        window: &Window,
        texts: impl Iterator<Item = &'a TextItem>,
        debug: &DebugSnapshot<'_>,
        size_in_pixels: [u32; 2],
    ) -> HudFrame {
        let raw_input = self.egui_state.take_egui_input(window);
        let show_debug = self.debug_visible;
        // egui may run the closure more than once per frame.
        let texts: Vec<&TextItem> = texts.collect();

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            for item in &texts {
                let [r, g, b, a] = palette::to_rgba(item.color);
                painter.text(
                    egui::pos2(item.pos.x, item.pos.y),
                    egui::Align2::LEFT_TOP,
                    &item.text,
                    egui::FontId::proportional(item.size),
                    egui::Color32::from_rgba_unmultiplied(r, g, b, a),
                );
            }

            if show_debug {
                debug::draw_window(ctx, debug);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        HudFrame {
            primitives,
            textures_delta: full_output.textures_delta,
            screen_descriptor: egui_wgpu::ScreenDescriptor {
                size_in_pixels,
                pixels_per_point,
            },
        }
    }

    /// Upload egui textures and buffers. Call before the egui render pass.
    pub fn prepare(
        &mut self,
        gpu: &GpuState,
        encoder: &mut wgpu::CommandEncoder,
        frame: &HudFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &frame.textures_delta.set {
            self.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            encoder,
            &frame.primitives,
            &frame.screen_descriptor,
        )
    }

    /// Render egui into the given render pass.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'static>, frame: &HudFrame) {
        self.egui_renderer
            .render(render_pass, &frame.primitives, &frame.screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, frame: &HudFrame) {
        for id in &frame.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
