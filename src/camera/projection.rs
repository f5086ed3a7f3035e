//! Per-frame camera matrices and point projection.
//!
//! World points go through `translate × rotate` into camera space, then through the clip
//! matrix, the perspective divide and the screen matrix into pixel coordinates (Y down).

use crate::{
    camera::path::path_offset,
    foundation::core::Canvas,
    foundation::error::{WireError, WireResult},
    foundation::math::DEG2RAD,
    linalg::matrix::Matrix,
    linalg::vector::{Vector2F, Vector3F},
    scene::config::CameraConfig,
};

/// A projected point: pixel position plus its camera-space position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub screen: Vector2F,
    pub camera: Vector3F,
}

impl Projected {
    /// Whether the point lies on or in front of the camera plane.
    pub fn in_front(&self) -> bool {
        self.camera.dot(Vector3F::FORWARD) >= 0.0
    }
}

/// Camera state and matrices valid for one time sample.
#[derive(Clone, Debug)]
pub struct CameraFrame {
    pub time: f32,
    pub canvas: Canvas,
    pub position: Vector3F,
    pub rotation: Vector3F,
    pub field_of_view: f32,
    pub vertical_field_of_view: f32,
    translate: Matrix,
    rotate: Matrix,
    clip: Matrix,
    screen: Matrix,
    inv_translate: Matrix,
    inv_rotate: Matrix,
}

impl CameraFrame {
    #[tracing::instrument(skip(cam), fields(segments = cam.path.len()))]
    pub fn build(cam: &CameraConfig, time: f32, width: u32, height: u32) -> WireResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let offset = path_offset(&cam.path, time)
            .ok_or_else(|| WireError::validation("camera path must not be empty"))?;
        let position = cam.position + offset;
        let rotation = cam.rotation;

        let fov = cam.field_of_view;
        let vertical_fov = fov * (height as f32 / width as f32);

        let translate = Matrix::translation4x4(-position);
        let rotate = Matrix::rotation4x4(rotation);
        let clip = clip_matrix(fov, vertical_fov, cam.near_clip, cam.far_clip);
        let screen = screen_matrix(width, height);

        let inv_translate = translate.inverse4x4()?.ok_or_else(|| {
            WireError::degenerate("camera translation matrix has no inverse")
        })?;
        let inv_rotate = rotate
            .inverse4x4()?
            .ok_or_else(|| WireError::degenerate("camera rotation matrix has no inverse"))?;

        tracing::trace!(?position, vertical_fov, "camera matrices built");
        Ok(Self {
            time,
            canvas,
            position,
            rotation,
            field_of_view: fov,
            vertical_field_of_view: vertical_fov,
            translate,
            rotate,
            clip,
            screen,
            inv_translate,
            inv_rotate,
        })
    }

    pub fn project(&self, p: Vector3F) -> WireResult<Projected> {
        let v = self.translate.transform_row4(p.to_homogeneous())?;
        let v = self.rotate.transform_row4(v)?;
        let camera = Vector3F::from_homogeneous_xyz(v);

        let v = self.clip.transform_row4(v)?;
        let w = v[3];
        let v = self.screen.transform_row4(v.map(|c| c / w))?;

        Ok(Projected {
            screen: Vector2F::new(v[0], v[1]),
            camera,
        })
    }

    pub fn translation(&self) -> &Matrix {
        &self.translate
    }

    pub fn rotation_matrix(&self) -> &Matrix {
        &self.rotate
    }

    pub fn clip_matrix(&self) -> &Matrix {
        &self.clip
    }

    pub fn screen_matrix(&self) -> &Matrix {
        &self.screen
    }

    pub fn inverse_translation(&self) -> &Matrix {
        &self.inv_translate
    }

    /// Inverse of the camera rotation; turns the flat pattern plane to face the camera.
    pub fn inverse_rotation(&self) -> &Matrix {
        &self.inv_rotate
    }
}

/// Symmetric perspective frustum. Camera-space `z` becomes the homogeneous `w`.
fn clip_matrix(h_fov: f32, v_fov: f32, near: f32, far: f32) -> Matrix {
    let right = (DEG2RAD * h_fov * 0.5).tan();
    let left = -right;
    let top = (DEG2RAD * v_fov * 0.5).tan();
    let bottom = -top;

    let mut m = Matrix::new(4, 4);
    m[(0, 0)] = 2.0 / (right - left);
    m[(1, 1)] = 2.0 / (top - bottom);
    m[(2, 2)] = (far + near) / (far - near);
    m[(3, 2)] = -2.0 * near * far / (far - near);
    m[(2, 3)] = 1.0;
    m
}

/// Normalized `[-1, 1]` coordinates to pixels, flipping Y.
fn screen_matrix(width: u32, height: u32) -> Matrix {
    let half_w = (width / 2) as f32;
    let half_h = (height / 2) as f32;

    let mut m = Matrix::new(4, 4);
    m[(0, 0)] = half_w;
    m[(1, 1)] = -half_h;
    m[(2, 2)] = 1.0;
    m[(3, 3)] = 1.0;
    m[(3, 0)] = half_w;
    m[(3, 1)] = half_h;
    m
}

#[cfg(test)]
#[path = "../../tests/unit/camera/projection.rs"]
mod tests;
