//! Per-frame transform state and matrix math.
//!
//! Camera parameters are fixed: 45 degree vertical field of view, near 0.1,
//! far 100, camera pulled back 6 units along the view axis, rotation about
//! the axis (0, 1, 1).

use glam::{Mat4, Vec3};

/// Vertical field of view in radians.
pub const FOV_Y: f32 = 45.0 * std::f32::consts::PI / 180.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Fixed camera offset applied before the rotation.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -6.0);

/// Rotation axis, used deliberately unnormalized (see [`rotate_about_axis`]).
pub const SPIN_AXIS: Vec3 = Vec3::new(0.0, 1.0, 1.0);

/// Accumulated rotation angle.
///
/// The angle is the exact running sum of frame deltas, in radians. It is
/// never wrapped or normalized; trigonometric evaluation tolerates large
/// magnitudes, with precision degrading only asymptotically. Known
/// limitation, kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin {
    angle: f32,
}

impl Spin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the rotation by `dt` seconds worth of radians.
    pub fn advance(&mut self, dt: f32) {
        self.angle += dt;
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

/// The three matrices uploaded to the shader each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub projection: Mat4,
    pub model_view: Mat4,
    pub normal: Mat4,
}

impl FrameMatrices {
    /// Recomputes all three matrices from the current angle and live aspect.
    ///
    /// Aspect must come from the current drawable size since the surface may
    /// resize between frames.
    pub fn compute(angle: f32, aspect: f32) -> Self {
        let model_view = model_view(angle);
        Self {
            projection: Mat4::perspective_rh(FOV_Y, aspect, Z_NEAR, Z_FAR),
            model_view,
            normal: model_view.inverse().transpose(),
        }
    }
}

/// Model-view matrix: identity -> translate by the camera offset -> rotate
/// `angle` radians about [`SPIN_AXIS`].
pub fn model_view(angle: f32) -> Mat4 {
    Mat4::from_translation(CAMERA_OFFSET) * rotate_about_axis(angle, SPIN_AXIS)
}

/// Axis-angle rotation matrix built from the *raw* axis components.
///
/// The axis is intentionally not normalized first: with axis (0, 1, 1) the
/// resulting matrix is not orthonormal and skews the cube as it spins. The
/// visual output depends on this, so a length-preserving rotation must not
/// be substituted.
pub fn rotate_about_axis(angle: f32, axis: Vec3) -> Mat4 {
    let (x, y, z) = (axis.x, axis.y, axis.z);
    let s = angle.sin();
    let c = angle.cos();
    let t = 1.0 - c;

    Mat4::from_cols_array_2d(&[
        [x * x * t + c, y * x * t + z * s, z * x * t - y * s, 0.0],
        [x * y * t - z * s, y * y * t + c, z * y * t + x * s, 0.0],
        [x * z * t + y * s, y * z * t - x * s, z * z * t + c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-5;

    // ── spin accumulation ─────────────────────────────────────────────────

    #[test]
    fn angle_is_running_sum_of_deltas() {
        let mut spin = Spin::new();
        let deltas = [0.016, 0.0, 0.033, 1.5, 0.004];
        for dt in deltas {
            spin.advance(dt);
        }
        let sum: f32 = deltas.iter().sum();
        assert_eq!(spin.angle(), sum);
    }

    #[test]
    fn angle_is_monotone_for_non_negative_deltas() {
        let mut spin = Spin::new();
        let mut prev = spin.angle();
        for dt in [0.0, 0.01, 0.5, 0.0, 2.0] {
            spin.advance(dt);
            assert!(spin.angle() >= prev);
            prev = spin.angle();
        }
    }

    #[test]
    fn zero_deltas_keep_the_scene_static() {
        let mut spin = Spin::new();
        for _ in 0..100 {
            spin.advance(0.0);
        }
        assert_eq!(spin.angle(), 0.0);
        // Model-view collapses to the camera translation alone.
        let mv = model_view(spin.angle());
        assert!(mv.abs_diff_eq(Mat4::from_translation(CAMERA_OFFSET), EPS));
    }

    // ── rotation matrix ───────────────────────────────────────────────────

    #[test]
    fn zero_angle_rotation_is_identity() {
        assert!(rotate_about_axis(0.0, SPIN_AXIS).abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn raw_axis_is_an_eigenvector_with_skewed_eigenvalue() {
        // With the unnormalized axis v, R*v = (2 - cos(angle)) * v, which is
        // exactly the skew the normalize step would have removed.
        for angle in [0.3, 1.0, std::f32::consts::FRAC_PI_2, 4.2] {
            let r = rotate_about_axis(angle, SPIN_AXIS);
            let v = Vec4::new(SPIN_AXIS.x, SPIN_AXIS.y, SPIN_AXIS.z, 0.0);
            let rv = r * v;
            let expected = v * (2.0 - angle.cos());
            assert!(rv.abs_diff_eq(expected, EPS), "angle {angle}: {rv:?}");
        }
    }

    #[test]
    fn unit_axis_rotation_preserves_length() {
        // Control: with a normalized axis the same formula is orthonormal.
        let axis = Vec3::new(0.0, 1.0, 1.0).normalize();
        let r = rotate_about_axis(0.7, axis);
        let p = Vec4::new(1.0, 2.0, 3.0, 0.0);
        assert!(((r * p).length() - p.length()).abs() < EPS);
    }

    // ── model-view ────────────────────────────────────────────────────────

    #[test]
    fn model_view_is_deterministic() {
        let a = model_view(1.234);
        let b = model_view(1.234);
        assert_eq!(a, b);
    }

    #[test]
    fn model_view_translation_is_fixed() {
        for angle in [0.0, 0.5, 2.0, 10.0] {
            let mv = model_view(angle);
            let t = mv.w_axis;
            assert!((t.x - 0.0).abs() < EPS);
            assert!((t.y - 0.0).abs() < EPS);
            assert!((t.z - -6.0).abs() < EPS);
        }
    }

    // ── normal matrix ─────────────────────────────────────────────────────

    #[test]
    fn normal_matrix_is_inverse_transpose() {
        let m = FrameMatrices::compute(0.9, 800.0 / 600.0);
        let expected = m.model_view.inverse().transpose();
        assert!(m.normal.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn normal_matrix_matches_rotation_for_orthonormal_model_view() {
        // For a pure rotation (no scale/skew) the normal matrix's rotational
        // part equals the model-view's rotational part.
        let r = rotate_about_axis(0.6, Vec3::new(0.0, 1.0, 1.0).normalize());
        let mv = Mat4::from_translation(CAMERA_OFFSET) * r;
        let normal = mv.inverse().transpose();
        for col in 0..3 {
            for row in 0..3 {
                let a = normal.col(col)[row];
                let b = mv.col(col)[row];
                assert!((a - b).abs() < EPS, "({row},{col}): {a} vs {b}");
            }
        }
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn resize_changes_only_the_aspect_term() {
        let angle = 0.4;
        let before = FrameMatrices::compute(angle, 800.0 / 600.0);
        let after = FrameMatrices::compute(angle, 400.0 / 300.0);

        // 800/600 == 400/300, so nothing changes at all.
        assert!(before.projection.abs_diff_eq(after.projection, EPS));
        assert_eq!(before.model_view, after.model_view);

        // A genuinely different aspect only scales the x focal term.
        let wide = FrameMatrices::compute(angle, 1600.0 / 600.0);
        assert!((wide.projection.x_axis.x - before.projection.x_axis.x).abs() > EPS);
        assert!(wide.projection.y_axis.abs_diff_eq(before.projection.y_axis, EPS));
        assert!(wide.projection.z_axis.abs_diff_eq(before.projection.z_axis, EPS));
        assert!(wide.projection.w_axis.abs_diff_eq(before.projection.w_axis, EPS));
        assert_eq!(wide.model_view, before.model_view);
    }
}
