//! Camera-side state types shared with the web and native frontends.
//!
//! These types avoid platform-specific APIs. Frontends read `CameraState`
//! once per frame and turn it into matrices through `Camera`.

use crate::constants::{CAMERA_ZFAR, CAMERA_ZNEAR, DEFAULT_FOV_DEG, START_POSITION};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Pack the matrices for a GPU uniform upload.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

/// A camera position plus the point it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewpoint {
    pub position: Vec3,
    pub look_target: Vec3,
}

/// User-savable camera bookmark.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetSlot {
    pub position: Vec3,
    pub look_target: Vec3,
    pub label: String,
}

impl PresetSlot {
    pub fn viewpoint(&self) -> Viewpoint {
        Viewpoint {
            position: self.position,
            look_target: self.look_target,
        }
    }
}

/// Which navigation desire currently drives the camera. Exactly one is active.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    FreeFly,
    FocusEntity(String),
    PresetSlot(usize),
    CinematicWarp { target_universe: u32, progress: f32 },
}

impl Intent {
    pub fn is_warp(&self) -> bool {
        matches!(self, Intent::CinematicWarp { .. })
    }
}

/// The controller's per-frame output, written back to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub look_target: Vec3,
    pub fov_degrees: f32,
    pub intent: Intent,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: START_POSITION,
            look_target: Vec3::ZERO,
            fov_degrees: DEFAULT_FOV_DEG,
            intent: Intent::FreeFly,
        }
    }
}

impl CameraState {
    /// Unit vector from the camera toward its look target, `-Z` when degenerate.
    pub fn view_direction(&self) -> Vec3 {
        (self.look_target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    pub fn to_camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.position,
            target: self.look_target,
            up: Vec3::Y,
            aspect,
            fovy_radians: self.fov_degrees.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
