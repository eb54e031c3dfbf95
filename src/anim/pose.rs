use glam::{Mat4, Vec3};

use super::AnimationClock;
use crate::config::AnimConfig;
use crate::scenario::Scenario;

pub const WHEEL_COUNT: usize = 6;
pub const RAIL_SEGMENT_COUNT: usize = 3;
pub const HUMAN_COUNT: usize = 7;
pub const PLANE_COUNT: usize = 2;

/// How far the second ground plane instance is pushed out on Z to keep
/// ground under the camera for the full run.
pub const PLANE_EXTENSION_Z: f32 = 200.0;

/// Everything the scene can draw. Indices select between instances that
/// share a mesh family (six wheels, three rail segments, seven humans).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectGroup {
    Plane(usize),
    TrolleyBody,
    Wheel(usize),
    RailSegment(usize),
    Human(usize),
    Rope,
    Lever,
}

/// All drawable groups in draw order (ground first).
pub fn all_groups() -> impl Iterator<Item = ObjectGroup> {
    let planes = (0..PLANE_COUNT).map(ObjectGroup::Plane);
    let wheels = (0..WHEEL_COUNT).map(ObjectGroup::Wheel);
    let rails = (0..RAIL_SEGMENT_COUNT).map(ObjectGroup::RailSegment);
    let humans = (0..HUMAN_COUNT).map(ObjectGroup::Human);
    planes
        .chain(rails)
        .chain(std::iter::once(ObjectGroup::TrolleyBody))
        .chain(wheels)
        .chain(humans)
        .chain([ObjectGroup::Rope, ObjectGroup::Lever])
}

/// One pose query: which object, under which scenario, at which instant.
/// Built per draw call and consumed immediately.
#[derive(Debug, Clone, Copy)]
pub struct PoseRequest {
    pub group: ObjectGroup,
    pub scenario: Scenario,
    pub clock: AnimationClock,
}

/// Axle pivot points for the six wheels in mesh-local space, front to back
/// then mirrored. Taken from the wheel meshes (Blender axis swap folded in).
const WHEEL_PIVOTS: [Vec3; WHEEL_COUNT] = [
    Vec3::new(0.0, 1.98191, -3.6229),
    Vec3::new(0.0, 1.78191, -0.056396),
    Vec3::new(0.0, 1.78191, 3.2106),
    Vec3::new(0.0, 1.78191, 3.2106),
    Vec3::new(0.0, 1.78191, -0.056396),
    Vec3::new(0.0, 1.98191, -3.6229),
];

/// Rotate about an arbitrary local point: bring the point to the origin,
/// rotate, move it back. Applied after a group's world placement this spins
/// a mesh about its own pivot instead of the world origin.
pub fn rotate_about(point: Vec3, rotation: Mat4) -> Mat4 {
    Mat4::from_translation(point) * rotation * Mat4::from_translation(-point)
}

/// World placement shared by the trolley body and its wheels under a given
/// scenario. Total over finite inputs; a negative position simply places
/// the trolley behind the visible start.
fn track_pose(scenario: Scenario, position: f32, cfg: &AnimConfig) -> Mat4 {
    let straight = Mat4::from_translation(Vec3::new(0.0, 0.0, position));
    match scenario {
        Scenario::Straight => straight,
        Scenario::Turn => {
            if position <= cfg.turn_threshold {
                straight
            } else {
                // Sharp switch: translation is continuous at the threshold,
                // orientation snaps to the diagonal in one frame.
                let d = position - cfg.turn_threshold;
                Mat4::from_translation(Vec3::new(d, 0.0, cfg.turn_threshold + d))
                    * Mat4::from_rotation_y(cfg.turn_angle_deg.to_radians())
            }
        }
        Scenario::Ramp => {
            if position <= cfg.ramp_threshold {
                straight
            } else {
                let u = position - cfg.ramp_threshold;
                let grade = cfg.ramp_grade_deg.to_radians();
                Mat4::from_translation(Vec3::new(0.0, u * grade.tan(), cfg.ramp_threshold + u))
                    * Mat4::from_rotation_x(-grade)
            }
        }
    }
}

/// Model matrix for one object group this frame.
pub fn compute_pose(req: &PoseRequest, cfg: &AnimConfig) -> Mat4 {
    let p = req.clock.elapsed_position;
    match req.group {
        ObjectGroup::TrolleyBody => track_pose(req.scenario, p, cfg),
        ObjectGroup::Wheel(i) => {
            let pivot = WHEEL_PIVOTS[i % WHEEL_COUNT];
            let spin = Mat4::from_rotation_x(req.clock.wheel_angle_deg.to_radians());
            track_pose(req.scenario, p, cfg) * rotate_about(pivot, spin)
        }
        // The third rail segment droops away during the ramp scenario. The
        // fold angle is accumulated by the clock, never recomputed here.
        ObjectGroup::RailSegment(2) if req.scenario == Scenario::Ramp => {
            let fold = req.clock.rail_fold_deg;
            Mat4::from_rotation_x((-fold).to_radians())
                * Mat4::from_translation(Vec3::new(
                    0.0,
                    -fold * cfg.fold_drop_per_deg,
                    -fold * cfg.fold_back_per_deg,
                ))
        }
        // Second ground patch extends the world for the longer camera travel.
        ObjectGroup::Plane(i) if i > 0 => {
            Mat4::from_translation(Vec3::new(0.0, 0.0, i as f32 * PLANE_EXTENSION_Z))
        }
        // Static props sit where they were modelled.
        ObjectGroup::Plane(_)
        | ObjectGroup::RailSegment(_)
        | ObjectGroup::Human(_)
        | ObjectGroup::Rope
        | ObjectGroup::Lever => Mat4::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::AnimationClock;

    fn clock_at(position: f32) -> AnimationClock {
        let mut clock = AnimationClock::new(&AnimConfig::default());
        clock.elapsed_position = position;
        clock
    }

    fn pose(group: ObjectGroup, scenario: Scenario, clock: AnimationClock) -> Mat4 {
        compute_pose(
            &PoseRequest {
                group,
                scenario,
                clock,
            },
            &AnimConfig::default(),
        )
    }

    fn mat_close(a: Mat4, b: Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn straight_is_pure_translation() {
        for p in [-40.0, 0.0, 17.5, 120.0] {
            let m = pose(ObjectGroup::TrolleyBody, Scenario::Straight, clock_at(p));
            assert!(mat_close(m, Mat4::from_translation(Vec3::new(0.0, 0.0, p))));
        }
    }

    #[test]
    fn turn_matches_straight_before_threshold() {
        let m = pose(ObjectGroup::TrolleyBody, Scenario::Turn, clock_at(59.0));
        assert!(mat_close(m, Mat4::from_translation(Vec3::new(0.0, 0.0, 59.0))));
    }

    #[test]
    fn turn_translation_is_continuous_at_threshold() {
        let eps = 1e-3;
        let before = pose(ObjectGroup::TrolleyBody, Scenario::Turn, clock_at(60.0 - eps));
        let after = pose(ObjectGroup::TrolleyBody, Scenario::Turn, clock_at(60.0 + eps));
        let delta = before.w_axis - after.w_axis;
        assert!(delta.length() < 0.01);
        // Orientation snaps: the rotation part differs across the threshold.
        assert!(!mat_close(
            Mat4::from_cols(before.x_axis, before.y_axis, before.z_axis, glam::Vec4::W),
            Mat4::from_cols(after.x_axis, after.y_axis, after.z_axis, glam::Vec4::W),
        ));
    }

    #[test]
    fn turn_past_threshold_runs_diagonally() {
        let m = pose(ObjectGroup::TrolleyBody, Scenario::Turn, clock_at(70.0));
        let expected = Mat4::from_translation(Vec3::new(10.0, 0.0, 70.0))
            * Mat4::from_rotation_y(45.0_f32.to_radians());
        assert!(mat_close(m, expected));
    }

    #[test]
    fn ramp_boundary_has_no_rotation() {
        // u = 0 exactly at the threshold: still a plain translation.
        let m = pose(ObjectGroup::TrolleyBody, Scenario::Ramp, clock_at(25.0));
        assert!(mat_close(m, Mat4::from_translation(Vec3::new(0.0, 0.0, 25.0))));
    }

    #[test]
    fn ramp_climbs_at_the_grade() {
        let m = pose(ObjectGroup::TrolleyBody, Scenario::Ramp, clock_at(35.0));
        let t = m.w_axis;
        assert!((t.x - 0.0).abs() < 1e-4);
        assert!((t.y - 10.0 * 30.0_f32.to_radians().tan()).abs() < 1e-3);
        assert!((t.z - 35.0).abs() < 1e-4);
        // Forward axis points up the ramp.
        let fwd = m.transform_vector3(Vec3::Z);
        assert!((fwd.y - 0.5).abs() < 1e-4);
        assert!((fwd.z - 30.0_f32.to_radians().cos()).abs() < 1e-4);
    }

    #[test]
    fn wheel_spins_about_its_own_axle() {
        let mut clock = clock_at(10.0);
        clock.wheel_angle_deg = 90.0;
        let m = pose(ObjectGroup::Wheel(0), Scenario::Straight, clock);

        let pivot = Vec3::new(0.0, 1.98191, -3.6229);
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0))
            * Mat4::from_translation(pivot)
            * Mat4::from_rotation_x(90.0_f32.to_radians())
            * Mat4::from_translation(-pivot);
        assert!(mat_close(m, expected));
    }

    #[test]
    fn wheel_with_zero_spin_matches_body() {
        let clock = clock_at(42.0);
        let wheel = pose(ObjectGroup::Wheel(3), Scenario::Ramp, clock);
        let body = pose(ObjectGroup::TrolleyBody, Scenario::Ramp, clock);
        assert!(mat_close(wheel, body));
    }

    #[test]
    fn third_rail_folds_only_in_ramp() {
        let mut clock = clock_at(30.0);
        clock.rail_fold_deg = 30.0;

        let folded = pose(ObjectGroup::RailSegment(2), Scenario::Ramp, clock);
        let expected = Mat4::from_rotation_x(-30.0_f32.to_radians())
            * Mat4::from_translation(Vec3::new(0.0, -12.5, -5.0));
        assert!(mat_close(folded, expected));

        let straight = pose(ObjectGroup::RailSegment(2), Scenario::Straight, clock);
        assert!(mat_close(straight, Mat4::IDENTITY));
    }

    #[test]
    fn other_rails_and_props_stay_put() {
        let clock = clock_at(80.0);
        for group in [
            ObjectGroup::RailSegment(0),
            ObjectGroup::RailSegment(1),
            ObjectGroup::Plane(0),
            ObjectGroup::Human(4),
            ObjectGroup::Rope,
            ObjectGroup::Lever,
        ] {
            let m = pose(group, Scenario::Ramp, clock);
            assert!(mat_close(m, Mat4::IDENTITY), "{group:?} moved");
        }
    }

    #[test]
    fn far_plane_extends_the_ground() {
        let m = pose(ObjectGroup::Plane(1), Scenario::Straight, clock_at(0.0));
        assert!(mat_close(
            m,
            Mat4::from_translation(Vec3::new(0.0, 0.0, PLANE_EXTENSION_Z))
        ));
    }

    #[test]
    fn all_groups_enumerates_every_instance() {
        let groups: Vec<_> = all_groups().collect();
        assert_eq!(
            groups.len(),
            PLANE_COUNT + 1 + WHEEL_COUNT + RAIL_SEGMENT_COUNT + HUMAN_COUNT + 2
        );
    }
}
