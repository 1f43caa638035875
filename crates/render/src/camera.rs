use glam::{Mat4, Vec2, Vec3};
use shoreline_input::{CameraBindings, InputProvider};
use std::ops::Deref;

/// Absolute limit enforced by the yaw/pitch setters, and the per-frame limit
/// on mouse-look deltas.
pub const MAX_CAMERA_ANGLE: f32 = 70.0;
/// Degrees of rotation per pixel of mouse travel.
pub const TURN_SPEED: f32 = 0.1;
/// World units per second.
pub const MOVEMENT_SPEED: f32 = 1.0;
pub const SPRINT_MULTIPLIER: f32 = 5.0;
pub const FOV_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Fly camera driven by spherical angles in degrees.
///
/// `theta` is yaw measured from +X towards +Z, `phi` is pitch above the
/// horizon. The setters clamp to ±[`MAX_CAMERA_ANGLE`]; mouse look in
/// [`Camera::update`] clamps only the per-frame delta, so yaw and pitch can
/// drift past that range while looking around.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    theta: f32,
    phi: f32,
    last_mouse: Vec2,
    /// Sign applied to mouse-look deltas on each axis.
    pub invert_mouse: Vec2,
    pub bindings: CameraBindings,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(10.0, 10.0, 10.0), -135.0, -34.0)
    }
}

impl Camera {
    /// Angles are taken as given; only the setters clamp.
    pub fn new(position: Vec3, theta: f32, phi: f32) -> Self {
        Self {
            position,
            theta,
            phi,
            last_mouse: Vec2::ZERO,
            invert_mouse: Vec2::new(-1.0, -1.0),
            bindings: CameraBindings::default(),
        }
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn set_theta(&mut self, theta: f32) {
        self.theta = theta.clamp(-MAX_CAMERA_ANGLE, MAX_CAMERA_ANGLE);
    }

    pub fn set_phi(&mut self, phi: f32) {
        self.phi = phi.clamp(-MAX_CAMERA_ANGLE, MAX_CAMERA_ANGLE);
    }

    pub fn forward(&self) -> Vec3 {
        let (theta, phi) = (self.theta.to_radians(), self.phi.to_radians());
        Vec3::new(phi.cos() * theta.cos(), phi.sin(), phi.cos() * theta.sin())
    }

    pub fn right(&self) -> Vec3 {
        let theta = self.theta.to_radians();
        Vec3::new(-theta.sin(), 0.0, theta.cos())
    }

    /// Apply one frame of keyboard movement and mouse look.
    pub fn update<I: InputProvider + ?Sized>(&mut self, delta_time: f32, input: &I) {
        let forward = self.forward();
        let right = self.right();
        let b = self.bindings;

        let mut speed = MOVEMENT_SPEED;
        if input.is_key_down(b.sprint) {
            speed *= SPRINT_MULTIPLIER;
        }
        let step = speed * delta_time;

        if input.is_key_down(b.forward) {
            self.position += forward * step;
        }
        if input.is_key_down(b.backward) {
            self.position -= forward * step;
        }
        if input.is_key_down(b.left) {
            self.position -= right * step;
        }
        if input.is_key_down(b.right) {
            self.position += right * step;
        }
        if input.is_key_down(b.down) {
            self.position -= Vec3::Y * step;
        }
        if input.is_key_down(b.up) {
            self.position += Vec3::Y * step;
        }

        let mouse = input.mouse_position();
        if input.is_mouse_button_down(b.look) {
            let delta = (TURN_SPEED * (mouse - self.last_mouse))
                .clamp(Vec2::splat(-MAX_CAMERA_ANGLE), Vec2::splat(MAX_CAMERA_ANGLE));
            self.theta += self.invert_mouse.x * delta.x;
            self.phi += self.invert_mouse.y * delta.y;
        }
        // Tracked every frame, held or not.
        self.last_mouse = mouse;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self, width: f32, height: f32) -> Mat4 {
        Mat4::perspective_rh_gl(FOV_DEGREES.to_radians(), width / height, NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection(&self, width: f32, height: f32) -> Mat4 {
        self.projection_matrix(width, height) * self.view_matrix()
    }

    /// Reflect the camera through the water plane (y = 0) until the guard
    /// drops. The original position and pitch are restored bit-exactly,
    /// including when the guarded code unwinds.
    pub fn mirror_below_water(&mut self) -> MirroredCamera<'_> {
        let position = self.position;
        let phi = self.phi;
        self.position.y = -position.y;
        self.phi = -phi;
        MirroredCamera {
            camera: self,
            saved_position: position,
            saved_phi: phi,
        }
    }
}

/// A camera temporarily reflected through the water plane.
pub struct MirroredCamera<'a> {
    camera: &'a mut Camera,
    saved_position: Vec3,
    saved_phi: f32,
}

impl Deref for MirroredCamera<'_> {
    type Target = Camera;

    fn deref(&self) -> &Camera {
        self.camera
    }
}

impl Drop for MirroredCamera<'_> {
    fn drop(&mut self) {
        self.camera.position = self.saved_position;
        self.camera.phi = self.saved_phi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoreline_input::{InputState, Key, MouseButton};

    fn level_camera() -> Camera {
        Camera::new(Vec3::ZERO, 0.0, 0.0)
    }

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(cam.theta(), -135.0);
        let vp = cam.view_projection(1280.0, 720.0);
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn set_phi_clamps() {
        let mut cam = level_camera();
        cam.set_phi(100.0);
        assert_eq!(cam.phi(), 70.0);
        cam.set_phi(-100.0);
        assert_eq!(cam.phi(), -70.0);
        cam.set_phi(12.5);
        assert_eq!(cam.phi(), 12.5);
    }

    #[test]
    fn set_theta_clamps() {
        let mut cam = level_camera();
        cam.set_theta(-135.0);
        assert_eq!(cam.theta(), -70.0);
    }

    #[test]
    fn forward_key_moves_along_view() {
        let mut cam = level_camera();
        let mut input = InputState::new();
        input.press(Key::W);
        cam.update(1.0, &input);
        assert!((cam.position - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn sprint_multiplies_speed() {
        let mut cam = level_camera();
        let mut input = InputState::new();
        input.press(Key::X);
        input.press(Key::LeftShift);
        cam.update(0.5, &input);
        assert!((cam.position.y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn strafe_uses_right_axis() {
        let mut cam = level_camera();
        let mut input = InputState::new();
        input.press(Key::D);
        cam.update(1.0, &input);
        assert!((cam.position - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn look_requires_button() {
        let mut cam = level_camera();
        let mut input = InputState::new();
        input.move_mouse(Vec2::new(10.0, 20.0));
        cam.update(0.0, &input);
        assert_eq!(cam.theta(), 0.0);
        assert_eq!(cam.phi(), 0.0);

        input.press_button(MouseButton::Right);
        input.move_mouse(Vec2::new(20.0, 30.0));
        cam.update(0.0, &input);
        assert!((cam.theta() - -1.0).abs() < 1e-5);
        assert!((cam.phi() - -1.0).abs() < 1e-5);
    }

    #[test]
    fn baseline_tracks_mouse_while_not_looking() {
        let mut cam = level_camera();
        let mut input = InputState::new();
        input.move_mouse(Vec2::new(500.0, 0.0));
        cam.update(0.0, &input);
        input.press_button(MouseButton::Right);
        cam.update(0.0, &input);
        assert_eq!(cam.theta(), 0.0);
    }

    #[test]
    fn look_clamps_delta_not_absolute_angle() {
        let mut cam = level_camera();
        cam.set_theta(60.0);
        let mut input = InputState::new();
        input.press_button(MouseButton::Right);
        input.move_mouse(Vec2::new(-1000.0, 0.0));
        cam.update(0.0, &input);
        // Delta clamped to 70, then inverted and added without an absolute clamp.
        assert!((cam.theta() - 130.0).abs() < 1e-4);
    }

    #[test]
    fn projection_has_fixed_fov() {
        let cam = level_camera();
        let p = cam.projection_matrix(1280.0, 720.0);
        let expected = Mat4::perspective_rh_gl(45f32.to_radians(), 1280.0 / 720.0, 0.1, 1000.0);
        assert_eq!(p, expected);
    }

    #[test]
    fn mirror_negates_height_and_pitch() {
        let mut cam = Camera::new(Vec3::new(0.0, 5.0, 0.0), 0.0, 30.0);
        {
            let mirrored = cam.mirror_below_water();
            assert_eq!(mirrored.position, Vec3::new(0.0, -5.0, 0.0));
            assert_eq!(mirrored.phi(), -30.0);
        }
        assert_eq!(cam.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(cam.phi(), 30.0);
    }

    #[test]
    fn mirror_restores_out_of_range_pitch_exactly() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), 0.0, 85.0);
        drop(cam.mirror_below_water());
        assert_eq!(cam.phi(), 85.0);
    }

    #[test]
    fn mirror_restores_on_unwind() {
        let mut cam = Camera::new(Vec3::new(0.0, 5.0, 0.0), 0.0, 30.0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _mirrored = cam.mirror_below_water();
            panic!("draw failed");
        }));
        assert!(result.is_err());
        assert_eq!(cam.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(cam.phi(), 30.0);
    }
}
