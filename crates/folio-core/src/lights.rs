use crate::error::SceneResult;
use crate::scene::parse_hex_color;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Spot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    /// Spot lights aim here; ignored for point lights.
    pub target: Vec3,
    pub color: String,
    pub intensity: f32,
    /// Cone half-angle in radians.
    pub angle: f32,
    /// Fraction of the cone that fades out, 0..1.
    pub penumbra: f32,
    /// Cut-off distance; 0 means unbounded.
    pub distance: f32,
}

impl Light {
    pub fn spot(
        position: [f32; 3],
        color: &str,
        intensity: f32,
        angle: f32,
        penumbra: f32,
    ) -> Self {
        Self {
            kind: LightKind::Spot,
            position: Vec3::from(position),
            target: Vec3::ZERO,
            color: color.into(),
            intensity,
            angle,
            penumbra,
            distance: 0.0,
        }
    }

    pub fn point(position: [f32; 3], color: &str, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point,
            position: Vec3::from(position),
            target: Vec3::ZERO,
            color: color.into(),
            intensity,
            angle: std::f32::consts::PI,
            penumbra: 0.0,
            distance: 0.0,
        }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance.max(0.0);
        self
    }

    pub fn rgb(&self) -> SceneResult<[f32; 3]> {
        parse_hex_color(&self.color)
    }

    /// Unit direction the light points in.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient_color: String,
    pub ambient_intensity: f32,
    pub lights: Vec<Light>,
}

impl LightRig {
    /// Hero spot on the subject, a cool key, two coloured rims and a fill.
    /// No shadow casters; contact shading comes from the podium material.
    pub fn hero() -> Self {
        Self {
            ambient_color: "#ffffff".into(),
            ambient_intensity: 1.5,
            lights: vec![
                Light::spot([2.0, 3.0, 5.0], "#ffffff", 20.0, 0.4, 0.5).with_distance(20.0),
                Light::spot([5.0, 5.0, 5.0], "#b3e0ff", 8.0, 0.5, 1.0),
                Light::spot([-5.0, 5.0, -2.0], "#00ffff", 10.0, 0.5, 1.0),
                Light::spot([5.0, 0.0, -5.0], "#ff0080", 5.0, 0.8, 1.0),
                Light::point([0.0, 2.0, 5.0], "#ffffff", 1.0),
            ],
        }
    }
}
