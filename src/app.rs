use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::hud::debug::{DebugSnapshot, FrameStats, PlayerReadout};
use crate::hud::timer::{FramePhase, PhaseTimers};
use crate::hud::Hud;
use crate::input::Keyboard;
use crate::player::{Player, START_POSITION};
use crate::render::instance::QuadInstance;
use crate::render::GpuState;
use crate::scene::{self, DrawList};

/// Target simulation tick rate (seconds per tick).
const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
pub const SCREEN_WIDTH: u32 = 1200;
pub const SCREEN_HEIGHT: u32 = 800;
const WINDOW_TITLE: &str = "sprite anim - texture rectangle";
/// Sheet loaded when no path is given on the command line.
pub const DEFAULT_SHEET_PATH: &str = "resources/scarfy.png";

/// Top-level application state.
struct App {
    sheet_path: PathBuf,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    hud: Option<Hud>,
    player: Option<Player>,

    keyboard: Keyboard,

    // Fixed timestep
    last_frame_time: Option<Instant>,
    accumulator: f64,
    tick_count: u64,

    // Frame timing
    frame_stats: FrameStats,
    timers: PhaseTimers,

    // Reused every frame (avoid per-frame allocation)
    draw_list: DrawList,
    instance_buf: Vec<QuadInstance>,

    /// Startup failure to report once the loop exits.
    error: Option<AppError>,
}

impl App {
    fn new(sheet_path: PathBuf) -> Self {
        Self {
            sheet_path,
            window: None,
            gpu: None,
            hud: None,
            player: None,
            keyboard: Keyboard::new(),
            last_frame_time: None,
            accumulator: 0.0,
            tick_count: 0,
            frame_stats: FrameStats::new(),
            timers: PhaseTimers::new(),
            draw_list: DrawList::new(),
            instance_buf: Vec::with_capacity(128),
            error: None,
        }
    }

    fn screen() -> Vec2 {
        Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32)
    }

    /// Window, GPU, sprite sheet, player. The sheet needs a live device,
    /// so it is loaded after the window exists.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();
        log::info!(
            "Window created: {}x{} (scale {:.2})",
            size.width,
            size.height,
            window.scale_factor()
        );

        let screen = Self::screen();
        let mut gpu = GpuState::new(window.clone(), (screen.x, screen.y))?;
        log::info!("wgpu + sprite pipeline initialized");

        let sheet = gpu.load_sheet(&self.sheet_path)?.size();
        log::info!("Loaded {}", self.sheet_path.display());

        self.player = Some(Player::new(sheet, START_POSITION, screen));
        self.hud = Some(Hud::new(&window, &gpu));
        self.gpu = Some(gpu);
        self.window = Some(window);

        log::info!("Press RIGHT/LEFT arrows to change speed!");
        Ok(())
    }

    /// Run fixed-timestep simulation ticks.
    fn run_fixed_update(&mut self, dt: f64) {
        let Some(player) = &mut self.player else {
            return;
        };

        self.accumulator = (self.accumulator + dt).min(MAX_ACCUMULATOR);

        while self.accumulator >= TICK_RATE {
            let controls = self.keyboard.controls();
            player.update(&controls);
            self.keyboard.end_tick();

            self.accumulator -= TICK_RATE;
            self.tick_count += 1;
        }
    }

    /// Compose the scene, draw the quads, then the egui layer on top.
    fn render(&mut self) {
        let (Some(window), Some(gpu), Some(hud), Some(player)) = (
            self.window.as_ref(),
            self.gpu.as_mut(),
            self.hud.as_mut(),
            self.player.as_ref(),
        ) else {
            return;
        };
        let Some(sheet) = gpu.sheet().map(|s| s.size()) else {
            return;
        };

        // --- Draw list + instances ---
        self.timers.begin();
        scene::compose(player, sheet, Self::screen(), &mut self.draw_list);
        self.instance_buf.clear();
        self.instance_buf.extend(
            self.draw_list
                .items()
                .iter()
                .filter_map(|p| QuadInstance::from_primitive(p, sheet)),
        );
        self.timers.end(FramePhase::Compose);

        self.timers.begin();
        gpu.update_instances(&self.instance_buf);
        self.timers.end(FramePhase::Upload);

        let Some(frame) = gpu.begin_frame() else {
            return;
        };
        let mut encoder = frame.encoder;

        gpu.draw_quads(&mut encoder, &frame.view, self.draw_list.clear_color());

        // --- Text + debug overlay ---
        self.timers.begin();
        let snapshot = DebugSnapshot {
            stats: &self.frame_stats,
            phase_durations: self.timers.durations_us,
            tick_count: self.tick_count,
            player: PlayerReadout {
                position: player.position(),
                velocity: player.velocity(),
                grounded: player.grounded(),
                facing_right: player.facing_right(),
                frame: player.frame_index(),
                speed: player.frame_speed(),
            },
        };
        let size = [gpu.surface_config.width, gpu.surface_config.height];
        let hud_frame = hud.run_frame(window, self.draw_list.texts(), &snapshot, size);
        let extra_cmd_bufs = hud.prepare(gpu, &mut encoder, &hud_frame);
        {
            let mut pass = GpuState::begin_egui_pass(&mut encoder, &frame.view);
            hud.render(&mut pass, &hud_frame);
        }
        self.timers.end(FramePhase::Overlay);

        self.timers.begin();
        gpu.finish_frame(encoder, frame.output, extra_cmd_bufs);
        hud.free_textures(&hud_frame);
        self.timers.end(FramePhase::Submit);
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state == ElementState::Pressed && !event.repeat {
            match event.physical_key {
                PhysicalKey::Code(KeyCode::Escape) => {
                    log::info!("ESC pressed, exiting");
                    event_loop.exit();
                    return;
                }
                PhysicalKey::Code(KeyCode::F12) => {
                    if let Some(hud) = &mut self.hud {
                        hud.toggle_debug();
                    }
                    return;
                }
                _ => {}
            }
        }
        self.keyboard
            .process_key(event.physical_key, event.state, event.repeat);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {e}");
            self.error = Some(e);
            event_loop.exit();
            return;
        }

        // Continuous game loop
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(window), Some(hud)) = (&self.window, &mut self.hud) {
            // Gameplay keys are processed regardless.
            hud.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::Focused(false) => self.keyboard.reset(),
            WindowEvent::KeyboardInput { event, .. } => self.on_key(event_loop, &event),
            WindowEvent::RedrawRequested => {
                // --- Timing ---
                let now = Instant::now();
                if let Some(last) = self.last_frame_time {
                    let dt = now.duration_since(last).as_secs_f64();

                    // Frame stats
                    self.frame_stats.record_frame(dt);

                    // Fixed timestep sim
                    self.timers.begin();
                    self.run_fixed_update(dt);
                    self.timers.end(FramePhase::Update);
                }
                self.last_frame_time = Some(now);

                // --- Render ---
                self.render();
            }
            _ => {}
        }
    }
}

/// Entry point — create event loop and run until the window closes.
/// GPU resources, the sprite sheet included, are released when `App` drops.
pub fn run(sheet_path: PathBuf) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(sheet_path);
    event_loop.run_app(&mut app)?;
    log::info!("Shutting down after {} ticks", app.tick_count);

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
