/// All animation tunables in one place.
///
/// The fold increments were tuned by eye against the rail meshes rather than
/// derived from a physical model; treat them as authored data, not physics.
#[derive(Debug, Clone)]
pub struct AnimConfig {
    /// Trolley forward speed along the track (units/sec).
    pub velocity: f32,
    /// Wheel spin rate (degrees/sec).
    pub wheel_angular_speed: f32,

    /// Distance at which the turn scenario switches to the diagonal track.
    pub turn_threshold: f32,
    /// Yaw applied on the diagonal track (degrees).
    pub turn_angle_deg: f32,

    /// Distance at which the ramp scenario starts climbing.
    pub ramp_threshold: f32,
    /// Ramp grade (degrees above horizontal).
    pub ramp_grade_deg: f32,

    /// The third rail segment starts folding this many units *before*
    /// the ramp itself activates.
    pub fold_lead: f32,
    /// Fold angle gained per simulation tick (degrees).
    pub fold_increment_deg: f32,
    /// Fold angle ceiling (degrees). The fold never exceeds or reverses this.
    pub fold_max_deg: f32,
    /// Vertical drop of the folding rail per degree of fold.
    pub fold_drop_per_deg: f32,
    /// Backward shift of the folding rail per degree of fold.
    pub fold_back_per_deg: f32,

    /// Camera yaw rate once the trolley passes the start line (degrees/sec).
    pub camera_yaw_rate: f32,
    /// Camera pitch rate during the ramp climb (degrees/sec).
    pub camera_pitch_rate: f32,
    /// Distance at which the camera starts tracking the ramp climb.
    pub camera_ramp_threshold: f32,

    /// Trolley position at reset. Negative = pre-roll: the trolley sits
    /// behind the visible start and drifts into view.
    pub start_position: f32,
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            velocity: 10.0,
            wheel_angular_speed: 300.0,
            turn_threshold: 60.0,
            turn_angle_deg: 45.0,
            ramp_threshold: 25.0,
            ramp_grade_deg: 30.0,
            fold_lead: 20.0,
            fold_increment_deg: 0.15,
            fold_max_deg: 30.0,
            // 12.5 units down / 5 units back at the 30 degree ceiling.
            fold_drop_per_deg: 12.5 / 30.0,
            fold_back_per_deg: 5.0 / 30.0,
            camera_yaw_rate: 5.0,
            camera_pitch_rate: 4.0,
            camera_ramp_threshold: 20.0,
            start_position: -40.0,
        }
    }
}

impl AnimConfig {
    /// Distance at which the rail fold starts accumulating.
    pub fn fold_activation(&self) -> f32 {
        self.ramp_threshold - self.fold_lead
    }
}
