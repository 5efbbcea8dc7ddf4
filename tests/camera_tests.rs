// Host-side tests for camera targets, transitions and input gating.

use glam::{Vec3, Vec4};
use keyfall_core::{
    target_pose, CameraConfig, CameraContext, CameraController, CameraPose, CameraState,
    InputPolicy, ViewMode,
};

fn ctx(has_data: bool, view: ViewMode) -> CameraContext {
    CameraContext { has_data, view }
}

#[test]
fn starts_settled_on_the_overview() {
    let cam = CameraController::new(&CameraConfig::default());
    assert_eq!(cam.state(), CameraState::Settled);
    assert_eq!(cam.pose(), target_pose(ctx(false, ViewMode::Fall)));
    let input = cam.input_policy();
    assert!(input.enabled && input.rotate && input.auto_rotate);
}

#[test]
fn unchanged_context_does_not_restart() {
    let mut cam = CameraController::new(&CameraConfig::default());
    assert!(!cam.set_context(ctx(false, ViewMode::Fall)));
    assert!(!cam.is_transitioning());
    assert!(cam.set_context(ctx(true, ViewMode::Fall)));
    assert!(!cam.set_context(ctx(true, ViewMode::Fall)));
}

#[test]
fn input_is_frozen_until_transition_completes() {
    let mut cam = CameraController::new(&CameraConfig::default());
    cam.set_context(ctx(true, ViewMode::Fall));
    assert_eq!(cam.input_policy(), InputPolicy::FROZEN);

    for _ in 0..3 {
        cam.update(0.5);
        assert!(cam.is_transitioning());
        assert_eq!(cam.input_policy(), InputPolicy::FROZEN);
    }
    cam.update(0.5);
    assert_eq!(cam.state(), CameraState::Settled, "settled after 2s");
    let input = cam.input_policy();
    assert!(input.enabled && input.rotate && input.pan && input.zoom);
    assert!(!input.auto_rotate, "auto-rotate only without data");
}

#[test]
fn pose_converges_toward_target() {
    let mut cam = CameraController::new(&CameraConfig::default());
    cam.set_context(ctx(true, ViewMode::Fall));
    let target = target_pose(ctx(true, ViewMode::Fall));
    let mut last = cam.pose().eye.distance(target.eye);
    for _ in 0..120 {
        cam.update(1.0 / 60.0);
        let d = cam.pose().eye.distance(target.eye);
        assert!(d <= last + 1e-5);
        last = d;
    }
    assert!(last < 0.5, "eye still {last} away after 2s");
}

#[test]
fn recede_view_disables_rotation() {
    let mut cam = CameraController::new(&CameraConfig::default());
    cam.set_context(ctx(true, ViewMode::Recede));
    cam.update(2.5);
    let input = cam.input_policy();
    assert!(input.enabled);
    assert!(!input.rotate, "top-down view must not orbit");
    assert!(input.pan && input.zoom);
    assert_eq!(cam.target().up, Vec3::NEG_Z);
}

#[test]
fn context_change_mid_transition_restarts_timer() {
    let mut cam = CameraController::new(&CameraConfig::default());
    cam.set_context(ctx(true, ViewMode::Fall));
    cam.update(1.5);
    cam.set_context(ctx(true, ViewMode::Recede));
    assert_eq!(cam.state(), CameraState::Transitioning { elapsed: 0.0 });
    cam.update(1.5);
    assert!(cam.is_transitioning());
}

#[test]
fn user_pose_refused_while_transitioning() {
    let mut cam = CameraController::new(&CameraConfig::default());
    let custom = CameraPose {
        eye: Vec3::new(5.0, 5.0, 5.0),
        target: Vec3::ZERO,
        up: Vec3::Y,
    };
    cam.set_context(ctx(true, ViewMode::Fall));
    assert!(!cam.offer_user_pose(custom));
    assert_ne!(cam.pose(), custom);
    cam.update(3.0);
    assert!(cam.offer_user_pose(custom));
    assert_eq!(cam.pose(), custom);
}

#[test]
fn blend_clamps_factor_and_keeps_up_unit_length() {
    let a = target_pose(ctx(true, ViewMode::Fall));
    let b = target_pose(ctx(true, ViewMode::Recede));
    assert_eq!(a.blend_toward(&b, 5.0), b);
    assert_eq!(a.blend_toward(&b, -1.0), a);
    let mid = a.blend_toward(&b, 0.5);
    assert!((mid.up.length() - 1.0).abs() < 1e-5);
}

#[test]
fn view_matrix_maps_target_onto_forward_axis() {
    let pose = target_pose(ctx(true, ViewMode::Fall));
    let view = pose.view_matrix();
    let t = view * Vec4::new(pose.target.x, pose.target.y, pose.target.z, 1.0);
    assert!(t.x.abs() < 1e-4 && t.y.abs() < 1e-4);
    assert!(t.z < 0.0, "right-handed view looks down -Z");
    let clip = pose.view_proj(16.0 / 9.0) * Vec4::new(0.0, 12.0, 0.0, 1.0);
    assert!(clip.w > 0.0);
}
