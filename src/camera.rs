use glam::{Mat4, Vec3};

use crate::anim::AnimationClock;
use crate::config::AnimConfig;
use crate::scenario::Scenario;

const FOV_Y_DEG: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 500.0;

/// Follow camera. Orientation offsets (yaw/pitch) come from the animation
/// clock; only the eye position lives here.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Base orientation, degrees. The clock's follow angles are added on top.
    pub yaw_deg: f32,
    pub pitch_deg: f32,
}

impl Camera {
    pub fn new() -> Self {
        // Opening shot: above and behind the track, looking down at the start.
        Self {
            position: Vec3::new(-30.0, 30.0, 100.0),
            yaw_deg: 155.0,
            pitch_deg: -20.0,
        }
    }

    fn forward(&self, clock: &AnimationClock) -> Vec3 {
        let yaw = (self.yaw_deg + clock.camera_yaw_deg).to_radians();
        let pitch = (self.pitch_deg + clock.camera_pitch_deg).to_radians();
        Vec3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
        .normalize()
    }

    /// Move the eye along the coupled follow rule: a forward tracking shot
    /// during pre-roll, then (for the ramp) a climb alongside the trolley.
    pub fn follow(
        &mut self,
        dt: f32,
        running: bool,
        clock: &AnimationClock,
        scenario: Scenario,
        cfg: &AnimConfig,
    ) {
        if !running {
            return;
        }
        if clock.elapsed_position < 0.0 {
            self.position += self.forward(clock) * cfg.velocity * dt;
            return;
        }
        if scenario == Scenario::Ramp && clock.elapsed_position >= cfg.camera_ramp_threshold {
            let rise = cfg.ramp_grade_deg.to_radians().tan();
            self.position += Vec3::new(0.0, rise, 1.0).normalize() * cfg.velocity * dt;
        }
    }

    pub fn view_matrix(&self, clock: &AnimationClock) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(clock), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(position: f32) -> AnimationClock {
        let mut clock = AnimationClock::new(&AnimConfig::default());
        clock.elapsed_position = position;
        clock
    }

    #[test]
    fn frozen_camera_does_not_move() {
        let cfg = AnimConfig::default();
        let mut cam = Camera::new();
        let before = cam.position;
        cam.follow(1.0, false, &clock_at(-10.0), Scenario::Straight, &cfg);
        assert_eq!(before, cam.position);
    }

    #[test]
    fn preroll_tracks_forward() {
        let cfg = AnimConfig::default();
        let mut cam = Camera::new();
        let before = cam.position;
        cam.follow(1.0, true, &clock_at(-10.0), Scenario::Straight, &cfg);
        let moved = (cam.position - before).length();
        assert!((moved - cfg.velocity).abs() < 1e-3);
    }

    #[test]
    fn holds_position_after_start_outside_ramp() {
        let cfg = AnimConfig::default();
        let mut cam = Camera::new();
        let before = cam.position;
        cam.follow(1.0, true, &clock_at(10.0), Scenario::Turn, &cfg);
        assert_eq!(before, cam.position);
    }

    #[test]
    fn climbs_with_the_trolley_on_the_ramp() {
        let cfg = AnimConfig::default();
        let mut cam = Camera::new();
        let before = cam.position;
        cam.follow(1.0, true, &clock_at(cfg.camera_ramp_threshold + 5.0), Scenario::Ramp, &cfg);
        assert!(cam.position.y > before.y);
        assert!(cam.position.z > before.z);
    }

    #[test]
    fn view_matrix_respects_clock_yaw() {
        let cam = Camera::new();
        let mut clock = clock_at(10.0);
        let base = cam.view_matrix(&clock);
        clock.camera_yaw_deg = 30.0;
        let turned = cam.view_matrix(&clock);
        assert_ne!(base.to_cols_array(), turned.to_cols_array());
    }
}
