//! Spherical mapping between a light position and UV coordinates.
//!
//! The sphere has a radius of 1 and is centered at the origin. Converting UV
//! back to a position preserves the light's current distance from the origin.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy; the zero vector is returned unchanged.
    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return *self;
        }
        Self::new(self.x / norm, self.y / norm, self.z / norm)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct UvCoords {
    pub u: f64,
    pub v: f64,
}

impl UvCoords {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

/// Compute UV coordinates from a 3D position over the unit sphere.
pub fn compute_uv(light_position: Vec3) -> UvCoords {
    let n = light_position.normalized();

    let mut phi = n.z.atan2(n.x);
    let theta = n.y.clamp(-1.0, 1.0).asin();

    phi += PI * -0.5;

    let u = phi / (2.0 * PI) + 0.5;
    let v = 0.5 - theta / PI;
    let v = 1.0 - v;

    UvCoords::new(u, v)
}

/// Compute a light position from UV coordinates on the sphere, keeping the
/// current position's distance from the origin.
pub fn compute_light_position(uv: UvCoords, light_position: Vec3) -> Vec3 {
    let distance = light_position.norm();

    let theta = 2.0 * PI * (uv.u - 0.25);
    let phi = PI * (0.5 - (1.0 - uv.v));

    Vec3::new(
        distance * phi.cos() * theta.cos(),
        distance * phi.sin(),
        distance * phi.cos() * theta.sin(),
    )
}
