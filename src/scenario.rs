/// One of the three scripted animation paths. Any scenario may be selected
/// from any other at any time; there is no transition animation between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Straight run, then a sharp 45 degree switch onto the diagonal track.
    Turn,
    /// Straight run with no switch.
    Straight,
    /// Straight run, then a climb up a fixed-grade ramp while the third
    /// rail segment folds away.
    Ramp,
}

pub const ALL_SCENARIOS: [Scenario; 3] = [Scenario::Turn, Scenario::Straight, Scenario::Ramp];

impl Scenario {
    pub fn label(self) -> &'static str {
        match self {
            Scenario::Turn => "Turn",
            Scenario::Straight => "Straight",
            Scenario::Ramp => "Ramp",
        }
    }
}
