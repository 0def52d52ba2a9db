//! First-person camera pose
//!
//! Orientation is yaw (around +Y) followed by pitch (around the local X
//! axis), i.e. Euler order YXZ. With zero yaw and pitch the camera looks
//! down -Z.

use crate::foundation::math::{constants::HALF_PI, utils, Mat4, Point3, Vec3, UP};

/// Pitch stays just short of straight up/down so a horizontal heading always exists
const PITCH_LIMIT: f32 = HALF_PI - 0.01;

/// Position and look direction handed to the rendering layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space
    pub position: Vec3,
    /// Unit look direction
    pub direction: Vec3,
}

/// Camera driven by the player capsule and pointer motion
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonCamera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

impl FirstPersonCamera {
    /// Camera at `position` looking down -Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Eye position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the eye
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Rotation around +Y in radians
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Rotation around the local X axis in radians, positive looks up
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set yaw and pitch directly (pitch is clamped)
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Apply relative pointer motion
    ///
    /// Moving right turns right, moving down looks down.
    pub fn rotate(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.set_orientation(self.yaw - dx * sensitivity, self.pitch - dy * sensitivity);
    }

    /// Unit world-space look direction
    pub fn look_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Look direction flattened onto the ground plane
    pub fn forward_vector(&self) -> Vec3 {
        utils::horizontal_direction(self.look_direction())
            .unwrap_or_else(|| Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos()))
    }

    /// Horizontal right-hand side of the forward vector
    pub fn side_vector(&self) -> Vec3 {
        self.forward_vector().cross(&UP)
    }

    /// Current pose for the renderer
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            direction: self.look_direction(),
        }
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        let eye = Point3::from(self.position);
        let target = eye + self.look_direction();
        Mat4::look_at_rh(&eye, &target, &UP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = FirstPersonCamera::default();
        assert_relative_eq!(camera.look_direction(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.side_vector(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_turned_around_faces_positive_z() {
        let mut camera = FirstPersonCamera::default();
        camera.set_orientation(PI, 0.0);
        assert_relative_eq!(camera.forward_vector(), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.side_vector(), Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_forward_ignores_pitch() {
        let mut camera = FirstPersonCamera::default();
        camera.set_orientation(PI * 0.5, 1.2);

        let look = camera.look_direction();
        assert!(look.y > 0.9);
        assert_relative_eq!(camera.forward_vector(), Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_pointer_rotation_and_pitch_clamp() {
        let mut camera = FirstPersonCamera::default();
        camera.rotate(100.0, 0.0, 1.0 / 500.0);
        assert_relative_eq!(camera.yaw(), -0.2, epsilon = 1e-6);

        camera.rotate(0.0, -10_000.0, 1.0 / 500.0);
        assert!(camera.pitch() < HALF_PI);
        assert_relative_eq!(camera.forward_vector().norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let mut camera = FirstPersonCamera::new(Vec3::new(1.0, 2.0, 3.0));
        camera.set_orientation(0.3, -0.2);

        let eye_in_view = camera.view_matrix().transform_point(&Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(eye_in_view.coords, Vec3::zeros(), epsilon = 1e-5);
    }
}
