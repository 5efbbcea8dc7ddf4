//! Camera pose targets and the transition state machine.
//!
//! A change of `(has_data, view)` starts a fixed-length transition during
//! which the live pose is blended toward a target from a small table and user
//! input is refused. Afterwards the camera is Settled and free input resumes.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;
use crate::constants::{CAMERA_FOVY_RADIANS, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::window::ViewMode;

/// Right-handed look-at pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    /// World to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Clip-space projection times view, with the default lens.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(CAMERA_FOVY_RADIANS, aspect, CAMERA_ZNEAR, CAMERA_ZFAR);
        proj * self.view_matrix()
    }

    /// Move `factor` (0..1) of the way toward `to`. The up vector is
    /// re-normalized; if it degenerates the target's up is taken.
    pub fn blend_toward(&self, to: &CameraPose, factor: f32) -> CameraPose {
        let f = factor.clamp(0.0, 1.0);
        let up = (self.up + (to.up - self.up) * f)
            .try_normalize()
            .unwrap_or(to.up);
        CameraPose {
            eye: self.eye + (to.eye - self.eye) * f,
            target: self.target + (to.target - self.target) * f,
            up,
        }
    }
}

/// Inputs that select the camera target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CameraContext {
    pub has_data: bool,
    pub view: ViewMode,
}

/// Target pose for a context.
///
/// - no data: wide, slowly orbiting overview
/// - fall: angled 3-D view over the keyboard
/// - recede: top-down, screen-up pointing along -Z where notes come from
pub fn target_pose(ctx: CameraContext) -> CameraPose {
    match (ctx.has_data, ctx.view) {
        (false, _) => CameraPose {
            eye: Vec3::new(0.0, 30.0, 70.0),
            target: Vec3::new(0.0, 5.0, 0.0),
            up: Vec3::Y,
        },
        (true, ViewMode::Fall) => CameraPose {
            eye: Vec3::new(0.0, 22.0, 42.0),
            target: Vec3::new(0.0, 12.0, 0.0),
            up: Vec3::Y,
        },
        (true, ViewMode::Recede) => CameraPose {
            eye: Vec3::new(0.0, 70.0, -20.0),
            target: Vec3::new(0.0, 0.0, -20.0),
            up: Vec3::NEG_Z,
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraState {
    Transitioning { elapsed: f32 },
    Settled,
}

/// What free camera input the host may apply right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputPolicy {
    pub enabled: bool,
    pub rotate: bool,
    pub pan: bool,
    pub zoom: bool,
    pub auto_rotate: bool,
}

impl InputPolicy {
    pub const FROZEN: InputPolicy = InputPolicy {
        enabled: false,
        rotate: false,
        pan: false,
        zoom: false,
        auto_rotate: false,
    };
}

pub struct CameraController {
    pose: CameraPose,
    target: CameraPose,
    context: CameraContext,
    state: CameraState,
    config: CameraConfig,
}

impl CameraController {
    /// Start Settled at the no-data pose.
    pub fn new(config: &CameraConfig) -> Self {
        let context = CameraContext {
            has_data: false,
            view: ViewMode::default(),
        };
        let pose = target_pose(context);
        Self {
            pose,
            target: pose,
            context,
            state: CameraState::Settled,
            config: config.clone(),
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn target(&self) -> CameraPose {
        self.target
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn context(&self) -> CameraContext {
        self.context
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, CameraState::Transitioning { .. })
    }

    /// Report the current `(has_data, view)`. A change (re)starts the
    /// transition from the live pose; returns whether one was started.
    pub fn set_context(&mut self, context: CameraContext) -> bool {
        if context == self.context {
            return false;
        }
        log::debug!(
            "[camera] context {:?} -> {:?}, transitioning",
            self.context,
            context
        );
        self.context = context;
        self.target = target_pose(context);
        self.state = CameraState::Transitioning { elapsed: 0.0 };
        true
    }

    /// Advance the blend by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let CameraState::Transitioning { elapsed } = self.state else {
            return;
        };
        let dt = dt.max(0.0);
        self.pose = self
            .pose
            .blend_toward(&self.target, self.config.blend_rate * dt);
        let elapsed = elapsed + dt;
        if elapsed >= self.config.transition_secs {
            log::debug!("[camera] settled for {:?}", self.context);
            self.state = CameraState::Settled;
        } else {
            self.state = CameraState::Transitioning { elapsed };
        }
    }

    pub fn input_policy(&self) -> InputPolicy {
        if self.is_transitioning() {
            return InputPolicy::FROZEN;
        }
        let top_down = self.context.has_data && self.context.view == ViewMode::Recede;
        InputPolicy {
            enabled: true,
            rotate: !top_down,
            pan: true,
            zoom: true,
            auto_rotate: !self.context.has_data,
        }
    }

    /// Apply a pose produced by free user input (orbit/pan/zoom). Refused
    /// while transitioning.
    pub fn offer_user_pose(&mut self, pose: CameraPose) -> bool {
        if !self.input_policy().enabled {
            return false;
        }
        self.pose = pose;
        true
    }
}
