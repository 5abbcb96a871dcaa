use glam::Vec2;

use super::ring::RingBuffer;
use super::timer::FramePhase;

/// Number of frame times to keep in the histogram.
const FRAME_HISTORY_LEN: usize = 300;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// One 60 Hz frame, in seconds.
const TARGET_FRAME_TIME: f64 = 1.0 / 60.0;

/// Rolling frame-time statistics with a periodic log line.
pub struct FrameStats {
    pub frame_times: RingBuffer<f64>,
    pub fps: f64,
    pub frame_time_avg: f64,
    pub frame_time_min: f64,
    pub frame_time_max: f64,

    frame_count: u64,
    log_timer: f64,
    log_frame_count: u32,
    log_frame_sum: f64,
    log_frame_min: f64,
    log_frame_max: f64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frame_times: RingBuffer::new(FRAME_HISTORY_LEN),
            fps: 0.0,
            frame_time_avg: 0.0,
            frame_time_min: 0.0,
            frame_time_max: 0.0,
            frame_count: 0,
            log_timer: 0.0,
            log_frame_count: 0,
            log_frame_sum: 0.0,
            log_frame_min: f64::MAX,
            log_frame_max: 0.0,
        }
    }

    /// Record a frame time, update rolling stats, and periodically log.
    pub fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frame_times.push(dt);

        let len = self.frame_times.len();
        let mut sum = 0.0;
        let mut min = f64::MAX;
        let mut max = 0.0f64;
        for &t in self.frame_times.iter() {
            sum += t;
            min = min.min(t);
            max = max.max(t);
        }
        self.frame_time_avg = sum / len as f64;
        self.frame_time_min = min;
        self.frame_time_max = max;
        self.fps = if self.frame_time_avg > 0.0 {
            1.0 / self.frame_time_avg
        } else {
            0.0
        };

        self.log_frame_count += 1;
        self.log_frame_sum += dt;
        self.log_frame_min = self.log_frame_min.min(dt);
        self.log_frame_max = self.log_frame_max.max(dt);
        self.log_timer += dt;

        if self.log_timer >= FPS_LOG_INTERVAL {
            let avg_ms = (self.log_frame_sum / self.log_frame_count as f64) * 1000.0;
            let fps = self.log_frame_count as f64 / self.log_timer;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.log_frame_min * 1000.0,
                self.log_frame_max * 1000.0,
                self.frame_count,
            );
            self.log_timer = 0.0;
            self.log_frame_count = 0;
            self.log_frame_sum = 0.0;
            self.log_frame_min = f64::MAX;
            self.log_frame_max = 0.0;
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Player readout shown in the debug window.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerReadout {
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
    pub facing_right: bool,
    pub frame: u32,
    pub speed: u32,
}

/// Read-only state the debug window draws from.
pub struct DebugSnapshot<'a> {
    pub stats: &'a FrameStats,
    pub phase_durations: [f64; FramePhase::COUNT],
    pub tick_count: u64,
    pub player: PlayerReadout,
}

/// Draw the F12 debug window.
pub fn draw_window(ctx: &egui::Context, s: &DebugSnapshot<'_>) {
    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 220))
        .corner_radius(6.0)
        .inner_margin(10.0);

    egui::Window::new("Debug")
        .default_pos([850.0, 10.0])
        .default_width(320.0)
        .resizable(true)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.style_mut().visuals.override_text_color = Some(egui::Color32::from_gray(220));

            // --- Performance ---
            ui.heading("Performance");
            ui.label(format!("FPS: {:.1}", s.stats.fps));
            ui.label(format!(
                "Frame: {:.2}ms avg | {:.2} min | {:.2} max",
                s.stats.frame_time_avg * 1000.0,
                s.stats.frame_time_min * 1000.0,
                s.stats.frame_time_max * 1000.0,
            ));
            ui.add_space(4.0);

            // --- Frame time histogram ---
            ui.heading("Frame Time History");
            if !s.stats.frame_times.is_empty() {
                frame_histogram(ui, &s.stats.frame_times);
            }
            ui.add_space(4.0);

            // --- Phase timers ---
            ui.heading("Phase Timers");
            let total: f64 = s.phase_durations.iter().sum::<f64>().max(1.0);
            for phase in FramePhase::ALL {
                let us = s.phase_durations[phase as usize];
                ui.label(
                    egui::RichText::new(format!(
                        "{:<11}{:>6.0}us ({:>2.0}%)",
                        phase.label(),
                        us,
                        us / total * 100.0
                    ))
                    .monospace(),
                );
            }
            ui.add_space(4.0);

            // --- Player ---
            let p = &s.player;
            ui.heading("Player");
            ui.label(format!("Position: ({:.1}, {:.1})", p.position.x, p.position.y));
            ui.label(format!("Velocity: ({:.2}, {:.2})", p.velocity.x, p.velocity.y));
            ui.label(format!(
                "Grounded: {} | Facing: {}",
                p.grounded,
                if p.facing_right { "right" } else { "left" },
            ));
            ui.label(format!("Frame: {} | Speed: {} FPS", p.frame, p.speed));
            ui.add_space(4.0);

            // --- Info ---
            ui.heading("Info");
            ui.label(format!(
                "Ticks: {} | Frames: {}",
                s.tick_count,
                s.stats.frame_count()
            ));
            ui.label("A/D: Move | Space: Jump | Left/Right: Speed");
            ui.label("F12: Toggle | ESC: Quit");
        });
}

fn frame_histogram(ui: &mut egui::Ui, frame_times: &RingBuffer<f64>) {
    let max_time = frame_times
        .iter()
        .copied()
        .fold(0.0f64, f64::max)
        .max(0.020);

    let (response, painter) = ui.allocate_painter(egui::vec2(300.0, 60.0), egui::Sense::hover());
    let rect = response.rect;

    let bar_width = rect.width() / frame_times.len() as f32;
    let target_y = rect.bottom() - (TARGET_FRAME_TIME / max_time) as f32 * rect.height();

    for (i, &t) in frame_times.iter().enumerate() {
        let h = (t / max_time) as f32 * rect.height();
        let x = rect.left() + i as f32 * bar_width;
        let color = if t > TARGET_FRAME_TIME {
            egui::Color32::from_rgb(255, 100, 80)
        } else {
            egui::Color32::from_rgb(80, 200, 120)
        };
        painter.rect_filled(
            egui::Rect::from_min_max(
                egui::pos2(x, rect.bottom() - h),
                egui::pos2(x + bar_width - 1.0, rect.bottom()),
            ),
            0.0,
            color,
        );
    }

    // 16.67ms target line
    painter.line_segment(
        [
            egui::pos2(rect.left(), target_y),
            egui::pos2(rect.right(), target_y),
        ],
        egui::Stroke::new(1.0, egui::Color32::from_rgb(255, 255, 100)),
    );
}
