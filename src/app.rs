use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::anim::pose::{compute_pose, PoseRequest};
use crate::anim::AnimationClock;
use crate::assets::SceneAssets;
use crate::camera::Camera;
use crate::config::AnimConfig;
use crate::light::DirectionalLight;
use crate::overlay::Overlay;
use crate::render::GpuState;
use crate::scenario::Scenario;

/// Target simulation tick rate (seconds per tick). The fold increment is
/// defined per tick, so the tick length is part of the animation's look.
const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

/// Top-level application state: owns the clock, the selected scenario, and
/// every handle the renderer needs each frame.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    assets: Option<SceneAssets>,
    overlay: Option<Overlay>,

    cfg: AnimConfig,
    clock: AnimationClock,
    camera: Camera,
    light: DirectionalLight,
    scenario: Scenario,
    /// Set when the user picks a scenario or clicks the scene; cleared on reset.
    running: bool,

    last_frame_time: Option<Instant>,
    accumulator: f64,
}

impl App {
    fn new() -> Self {
        let cfg = AnimConfig::default();
        let clock = AnimationClock::new(&cfg);
        Self {
            window: None,
            gpu: None,
            assets: None,
            overlay: None,
            cfg,
            clock,
            camera: Camera::new(),
            light: DirectionalLight::new(),
            scenario: Scenario::Turn,
            running: false,
            last_frame_time: None,
            accumulator: 0.0,
        }
    }

    /// Run fixed-timestep animation ticks.
    fn run_fixed_update(&mut self, dt: f64, paused: bool) {
        self.accumulator += dt;

        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }

        let running = self.running && !paused;
        while self.accumulator >= TICK_RATE {
            let tick = TICK_RATE as f32;
            self.clock.advance(tick, running, &self.cfg);
            self.clock
                .advance_camera(tick, running, self.scenario, &self.cfg);
            self.clock.advance_fold(running, self.scenario, &self.cfg);
            self.camera
                .follow(tick, running, &self.clock, self.scenario, &self.cfg);

            self.accumulator -= TICK_RATE;
        }
    }

    /// Select a scenario and start the animation. Pressing a scene button
    /// always kicks things off, even mid-run.
    fn select_scenario(&mut self, scenario: Scenario) {
        if self.scenario != scenario {
            log::info!("Scenario selected: {}", scenario.label());
        }
        self.scenario = scenario;
        self.running = true;
    }

    fn reset(&mut self) {
        log::info!("Reset to pre-roll");
        self.clock.reset(&self.cfg);
        self.camera = Camera::new();
        self.running = false;
    }

    fn redraw(&mut self) {
        // --- Timing ---
        let now = Instant::now();
        let paused = self.overlay.as_ref().map(|o| o.paused).unwrap_or(false);
        if let Some(last) = self.last_frame_time {
            let dt = now.duration_since(last).as_secs_f64();
            if let Some(overlay) = self.overlay.as_mut() {
                overlay.record_frame(dt);
            }
            self.run_fixed_update(dt, paused);
        }
        self.last_frame_time = Some(now);

        let Some(window) = self.window.clone() else {
            return;
        };
        let (Some(gpu), Some(assets), Some(overlay)) =
            (self.gpu.as_mut(), self.assets.as_ref(), self.overlay.as_mut())
        else {
            return;
        };

        // --- GUI ---
        let (primitives, textures_delta, screen_descriptor) = overlay.run_frame(
            &window,
            self.scenario,
            self.running && !overlay.paused,
            self.clock.elapsed_position,
        );
        let selected = overlay.selected_scenario;
        let reset_requested = overlay.reset_requested;

        // --- Frame uniforms + per-object poses ---
        let view_proj =
            self.camera.projection_matrix(gpu.aspect_ratio()) * self.camera.view_matrix(&self.clock);
        gpu.mesh_pipeline.update_frame(
            &gpu.queue,
            view_proj,
            self.camera.position,
            self.light.to_uniform(),
        );

        for (slot, group) in assets.groups().iter().enumerate() {
            let pose = compute_pose(
                &PoseRequest {
                    group: group.group,
                    scenario: self.scenario,
                    clock: self.clock,
                },
                &self.cfg,
            );
            gpu.mesh_pipeline.update_model(&gpu.queue, slot, pose);
        }

        // --- Render ---
        let Some(mut frame) = gpu.begin_frame() else {
            return;
        };

        {
            let mut pass = gpu.begin_scene_pass(&mut frame.encoder, &frame.view);
            for (slot, group) in assets.groups().iter().enumerate() {
                pass.set_bind_group(
                    1,
                    &gpu.mesh_pipeline.model_bind_group,
                    &[gpu.mesh_pipeline.model_offset(slot)],
                );
                pass.set_bind_group(2, &group.texture.bind_group, &[]);
                for mesh in &group.meshes {
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.num_indices, 0, 0..1);
                }
            }
        }

        let egui_cmd_bufs = overlay.prepare_egui(
            &gpu.device,
            &gpu.queue,
            &mut frame.encoder,
            &primitives,
            &textures_delta,
            &screen_descriptor,
        );
        {
            let mut pass = GpuState::begin_egui_pass(&mut frame.encoder, &frame.view);
            overlay.render_egui(&mut pass, &primitives, &screen_descriptor);
        }

        gpu.finish_frame(frame.encoder, frame.output, egui_cmd_bufs);
        overlay.free_textures(&textures_delta);

        // --- Apply GUI actions for the next tick ---
        if let Some(scenario) = selected {
            self.select_scenario(scenario);
        }
        if reset_requested {
            self.reset();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Trolley Problem")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );

        let gpu = GpuState::new(window.clone());
        let assets = SceneAssets::load(&gpu.device, &gpu.queue, &gpu.mesh_pipeline.texture_layout);
        let overlay = Overlay::new(&window, &gpu);
        log::info!("wgpu + scene pipeline initialized");

        event_loop.set_control_flow(ControlFlow::Poll);

        self.gpu = Some(gpu);
        self.assets = Some(assets);
        self.overlay = Some(overlay);
        self.window = Some(window);
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
        // Let egui see everything first; it eats clicks on its own panel.
        let consumed = match (self.overlay.as_mut(), self.window.as_ref()) {
            (Some(overlay), Some(window)) => overlay.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.logical_key == Key::Named(NamedKey::Escape)
                    && event.state == ElementState::Pressed =>
            {
                log::info!("ESC pressed, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            // Clicking the scene itself starts the current scenario.
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !consumed => {
                self.running = true;
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

/// Entry point — create event loop and run.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
