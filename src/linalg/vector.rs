//! 2D/3D `f32` vector value types.
//!
//! Equality is exact field-wise float comparison.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::foundation::math::lerp;

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector2F {
    pub x: f32,
    pub y: f32,
}

impl Vector2F {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalized(self) -> Self {
        let m = self.magnitude();
        Self::new(self.x / m, self.y / m)
    }

    pub fn distance(self, rhs: Self) -> f32 {
        let dx = rhs.x - self.x;
        let dy = rhs.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        Self::new(lerp(self.x, rhs.x, t), lerp(self.y, rhs.y, t))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector3F {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3F {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalized(self) -> Self {
        let m = self.magnitude();
        Self::new(self.x / m, self.y / m, self.z / m)
    }

    pub fn distance(self, rhs: Self) -> f32 {
        let dx = rhs.x - self.x;
        let dy = rhs.y - self.y;
        let dz = rhs.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        Self::new(
            lerp(self.x, rhs.x, t),
            lerp(self.y, rhs.y, t),
            lerp(self.z, rhs.z, t),
        )
    }

    /// Component-wise product.
    pub fn scale(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }

    pub fn to_homogeneous(self) -> [f32; 4] {
        [self.x, self.y, self.z, 1.0]
    }

    pub fn from_homogeneous_xyz(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

macro_rules! impl_vector_ops {
    ($ty:ident { $($f:ident),+ }) => {
        impl Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($f: self.$f + rhs.$f),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                $(self.$f += rhs.$f;)+
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($f: self.$f - rhs.$f),+ }
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$f -= rhs.$f;)+
            }
        }

        impl Mul<f32> for $ty {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self {
                Self { $($f: self.$f * rhs),+ }
            }
        }

        impl Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($f: -self.$f),+ }
            }
        }
    };
}

impl_vector_ops!(Vector2F { x, y });
impl_vector_ops!(Vector3F { x, y, z });

#[cfg(test)]
#[path = "../../tests/unit/linalg/vector.rs"]
mod tests;
