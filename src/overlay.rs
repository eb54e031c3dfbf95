use winit::window::Window;

use crate::render::GpuState;
use crate::scenario::{Scenario, ALL_SCENARIOS};

/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

/// Scene-selection overlay powered by egui, plus frame statistics.
pub struct Overlay {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,

    /// Scenario button pressed this frame, if any.
    pub selected_scenario: Option<Scenario>,
    /// Reset button pressed this frame.
    pub reset_requested: bool,
    /// Pause checkbox state.
    pub paused: bool,

    // Rolling frame stats.
    fps: f64,
    frame_time_avg: f64,
    frame_count: u64,
    log_timer: f64,
    log_frame_count: u32,
    log_frame_sum: f64,
}

impl Overlay {
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
            selected_scenario: None,
            reset_requested: false,
            paused: false,
            fps: 0.0,
            frame_time_avg: 0.0,
            frame_count: 0,
            log_timer: 0.0,
            log_frame_count: 0,
            log_frame_sum: 0.0,
        }
    }

    /// Record a frame time and periodically log throughput.
    pub fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.log_frame_count += 1;
        self.log_frame_sum += dt;
        self.log_timer += dt;

        if self.log_timer >= FPS_LOG_INTERVAL {
            self.frame_time_avg = self.log_frame_sum / self.log_frame_count as f64;
            self.fps = self.log_frame_count as f64 / self.log_timer;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | total frames: {}",
                self.fps,
                self.frame_time_avg * 1000.0,
                self.frame_count,
            );
            self.log_timer = 0.0;
            self.log_frame_count = 0;
            self.log_frame_sum = 0.0;
        }
    }

    /// Forward a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Run the egui frame and produce paint output.
    pub fn run_frame(
        &mut self,
        window: &Window,
        scenario: Scenario,
        running: bool,
        elapsed_position: f32,
    ) -> (
        Vec<egui::epaint::ClippedPrimitive>,
        egui::TexturesDelta,
        egui_wgpu::ScreenDescriptor,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        // One-shot actions reset each frame; the checkbox persists.
        self.selected_scenario = None;
        self.reset_requested = false;

        let status = UiSnapshot {
            scenario,
            running,
            elapsed_position,
            fps: self.fps,
        };

        let mut selected = None;
        let mut reset = false;
        let mut paused = self.paused;

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| {
            draw_ui(ctx, &status, &mut selected, &mut reset, &mut paused);
        });

        self.selected_scenario = selected;
        self.reset_requested = reset;
        self.paused = paused;

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [window.inner_size().width, window.inner_size().height],
            pixels_per_point,
        };

        (clipped_primitives, full_output.textures_delta, screen_descriptor)
    }

    /// Upload egui textures and buffers. Call before the egui render pass.
    pub fn prepare_egui(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::epaint::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor)
    }

    /// Render egui into the given render pass.
    pub fn render_egui(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::epaint::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, textures_delta: &egui::TexturesDelta) {
        for &id in &textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }
    }
}

struct UiSnapshot {
    scenario: Scenario,
    running: bool,
    elapsed_position: f32,
    fps: f64,
}

fn draw_ui(
    ctx: &egui::Context,
    s: &UiSnapshot,
    selected: &mut Option<Scenario>,
    reset: &mut bool,
    paused: &mut bool,
) {
    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 220))
        .corner_radius(6.0)
        .inner_margin(10.0);

    egui::Window::new("Trolley Problem")
        .default_pos([10.0, 10.0])
        .default_width(300.0)
        .resizable(false)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.style_mut().visuals.override_text_color = Some(egui::Color32::from_gray(220));

            ui.label(
                "A runaway trolley is headed toward the tracks. \
                 Pick a scenario to see how it plays out.",
            );
            ui.add_space(6.0);

            ui.heading("Scenario");
            for scenario in ALL_SCENARIOS {
                let active = scenario == s.scenario;
                if ui
                    .selectable_label(active, scenario.label())
                    .clicked()
                {
                    *selected = Some(scenario);
                }
            }
            ui.add_space(6.0);

            ui.heading("Playback");
            ui.checkbox(paused, "Pause");
            if ui.button("Reset").clicked() {
                *reset = true;
            }
            ui.add_space(6.0);

            ui.heading("Status");
            ui.label(format!(
                "{} | {}",
                s.scenario.label(),
                if s.running { "running" } else { "waiting" },
            ));
            ui.label(format!("Distance: {:.1}", s.elapsed_position));
            if s.fps > 0.0 {
                ui.label(format!("FPS: {:.0}", s.fps));
            }
            ui.label("Click the scene to start | ESC: Quit");
        });
}
