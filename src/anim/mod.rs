pub mod pose;

use crate::config::AnimConfig;
use crate::scenario::Scenario;

/// Per-frame animation state, owned by the app and advanced once per
/// simulation tick. Pose computation receives a copy, never a reference it
/// could outlive the frame with.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    /// Signed distance travelled along the track. Negative while the
    /// trolley is still behind the visible start (pre-roll).
    pub elapsed_position: f32,
    /// Wheel spin angle, kept in [0, 360) so it never loses float
    /// precision over long runs.
    pub wheel_angle_deg: f32,
    /// Accumulated fold of the third rail segment, in [0, fold_max].
    /// Never decreases once it starts.
    pub rail_fold_deg: f32,
    /// Camera yaw offset accumulated after the trolley passes the start.
    pub camera_yaw_deg: f32,
    /// Camera pitch offset accumulated during the ramp climb.
    pub camera_pitch_deg: f32,
}

impl AnimationClock {
    pub fn new(cfg: &AnimConfig) -> Self {
        Self {
            elapsed_position: cfg.start_position,
            wheel_angle_deg: 0.0,
            rail_fold_deg: 0.0,
            camera_yaw_deg: 0.0,
            camera_pitch_deg: 0.0,
        }
    }

    /// Advance trolley position and wheel spin. A tick with `running=false`
    /// leaves the clock untouched — the scene is frozen until the user
    /// starts a scenario.
    pub fn advance(&mut self, dt: f32, running: bool, cfg: &AnimConfig) {
        if !running {
            return;
        }
        self.elapsed_position += cfg.velocity * dt;
        self.wheel_angle_deg =
            (self.wheel_angle_deg + cfg.wheel_angular_speed * dt).rem_euclid(360.0);
    }

    /// Advance the camera-follow angles. Yaw starts once the trolley
    /// crosses the start line; pitch only joins in during the ramp climb.
    pub fn advance_camera(&mut self, dt: f32, running: bool, scenario: Scenario, cfg: &AnimConfig) {
        if !running || self.elapsed_position < 0.0 {
            return;
        }
        self.camera_yaw_deg += cfg.camera_yaw_rate * dt;
        if scenario == Scenario::Ramp && self.elapsed_position >= cfg.camera_ramp_threshold {
            self.camera_pitch_deg += cfg.camera_pitch_rate * dt;
        }
    }

    /// Accumulate the rail fold by one tick's increment. The fold is
    /// irreversible: it only grows, and clamps at the ceiling.
    pub fn advance_fold(&mut self, running: bool, scenario: Scenario, cfg: &AnimConfig) {
        if !running || scenario != Scenario::Ramp {
            return;
        }
        if self.elapsed_position <= cfg.fold_activation() {
            return;
        }
        self.rail_fold_deg = (self.rail_fold_deg + cfg.fold_increment_deg).min(cfg.fold_max_deg);
    }

    /// Back to the pre-roll state.
    pub fn reset(&mut self, cfg: &AnimConfig) {
        *self = Self::new(cfg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AnimConfig {
        AnimConfig::default()
    }

    #[test]
    fn paused_advance_is_noop() {
        let cfg = cfg();
        let mut clock = AnimationClock::new(&cfg);
        clock.elapsed_position = 12.5;
        clock.wheel_angle_deg = 123.0;
        let before = clock;

        clock.advance(0.25, false, &cfg);
        clock.advance_camera(0.25, false, Scenario::Ramp, &cfg);
        clock.advance_fold(false, Scenario::Ramp, &cfg);

        assert_eq!(before.elapsed_position, clock.elapsed_position);
        assert_eq!(before.wheel_angle_deg, clock.wheel_angle_deg);
        assert_eq!(before.rail_fold_deg, clock.rail_fold_deg);
        assert_eq!(before.camera_yaw_deg, clock.camera_yaw_deg);
        assert_eq!(before.camera_pitch_deg, clock.camera_pitch_deg);
    }

    #[test]
    fn wheel_angle_stays_in_range() {
        let cfg = cfg();
        let mut clock = AnimationClock::new(&cfg);
        // 300 deg/s at 60 Hz wraps every ~72 ticks; run well past several wraps.
        for _ in 0..1000 {
            clock.advance(1.0 / 60.0, true, &cfg);
            assert!(clock.wheel_angle_deg >= 0.0 && clock.wheel_angle_deg < 360.0);
        }
    }

    #[test]
    fn position_advances_at_configured_velocity() {
        let cfg = cfg();
        let mut clock = AnimationClock::new(&cfg);
        clock.elapsed_position = 0.0;
        clock.advance(2.0, true, &cfg);
        assert!((clock.elapsed_position - cfg.velocity * 2.0).abs() < 1e-5);
    }

    #[test]
    fn preroll_drifts_toward_start() {
        let cfg = cfg();
        let mut clock = AnimationClock::new(&cfg);
        assert!(clock.elapsed_position < 0.0);
        clock.advance(1.0, true, &cfg);
        assert!(clock.elapsed_position > cfg.start_position);
    }

    #[test]
    fn fold_is_monotonic_and_clamped() {
        let cfg = cfg();
        let mut clock = AnimationClock::new(&cfg);
        clock.elapsed_position = cfg.fold_activation() + 1.0;

        let mut prev = clock.rail_fold_deg;
        for _ in 0..500 {
            clock.advance_fold(true, Scenario::Ramp, &cfg);
            assert!(clock.rail_fold_deg >= prev);
            assert!(clock.rail_fold_deg <= cfg.fold_max_deg);
            prev = clock.rail_fold_deg;
        }
        assert_eq!(clock.rail_fold_deg, cfg.fold_max_deg);
    }

    #[test]
    fn fold_waits_for_activation_distance() {
        let cfg = cfg();
        let mut clock = AnimationClock::new(&cfg);
        clock.elapsed_position = cfg.fold_activation() - 0.5;
        clock.advance_fold(true, Scenario::Ramp, &cfg);
        assert_eq!(clock.rail_fold_deg, 0.0);
    }

    #[test]
    fn fold_only_runs_in_ramp_scenario() {
        let cfg = cfg();
        let mut clock = AnimationClock::new(&cfg);
        clock.elapsed_position = 100.0;
        clock.advance_fold(true, Scenario::Straight, &cfg);
        clock.advance_fold(true, Scenario::Turn, &cfg);
        assert_eq!(clock.rail_fold_deg, 0.0);
    }

    #[test]
    fn camera_angles_wait_for_start_line() {
        let cfg = cfg();
        let mut clock = AnimationClock::new(&cfg);
        clock.elapsed_position = -5.0;
        clock.advance_camera(1.0, true, Scenario::Straight, &cfg);
        assert_eq!(clock.camera_yaw_deg, 0.0);

        clock.elapsed_position = 1.0;
        clock.advance_camera(1.0, true, Scenario::Straight, &cfg);
        assert!(clock.camera_yaw_deg > 0.0);
        assert_eq!(clock.camera_pitch_deg, 0.0);
    }

    #[test]
    fn camera_pitch_joins_during_ramp_climb() {
        let cfg = cfg();
        let mut clock = AnimationClock::new(&cfg);
        clock.elapsed_position = cfg.camera_ramp_threshold + 1.0;
        clock.advance_camera(1.0, true, Scenario::Ramp, &cfg);
        assert!(clock.camera_pitch_deg > 0.0);
    }
}
