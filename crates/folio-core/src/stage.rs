//! Stage assembly: subject + podium instances, idle float motion and the
//! background star dust.

use crate::assets::LoadState;
use crate::constants::{
    FLOAT_INTENSITY, FLOAT_ROTATION_INTENSITY, FLOAT_SPEED, STAR_DEPTH, STAR_RADIUS, STAR_SIZE,
};
use crate::scene::{hero_stage, standin_subject, Instance, PrimitiveKind, SceneManifest};
use crate::viewport::Classification;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};
use rand::prelude::*;

/// Flatten the hero stage for a classification and load state. A manifest
/// that fails to resolve (bad colour, unknown material) falls back to the
/// stand-in instead of leaving the stage empty.
pub fn build_stage(
    classification: Classification,
    subject: &LoadState<SceneManifest>,
) -> Vec<Instance> {
    let resolved = subject.subject_or_standin();
    let stage = hero_stage(classification, resolved.node);
    match stage.flatten(&resolved.materials, Mat4::IDENTITY) {
        Ok(instances) => instances,
        Err(e) => {
            log::warn!("[stage] subject manifest unusable, using stand-in: {}", e);
            let fallback = hero_stage(classification, standin_subject());
            fallback
                .flatten(&FnvHashMap::default(), Mat4::IDENTITY)
                .unwrap_or_default()
        }
    }
}

/// Gentle idle bob and sway applied to the whole stage.
#[derive(Clone, Copy, Debug)]
pub struct FloatMotion {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    /// Phase offset so several floating groups do not move in lockstep.
    pub phase: f32,
}

impl Default for FloatMotion {
    fn default() -> Self {
        Self {
            speed: FLOAT_SPEED,
            rotation_intensity: FLOAT_ROTATION_INTENSITY,
            float_intensity: FLOAT_INTENSITY,
            phase: 0.0,
        }
    }
}

impl FloatMotion {
    pub fn matrix(&self, elapsed_sec: f32) -> Mat4 {
        let t = self.phase + elapsed_sec * self.speed;
        let rx = (t / 4.0).cos() / 8.0 * self.rotation_intensity;
        let ry = (t / 4.0).sin() / 8.0 * self.rotation_intensity;
        let rz = (t / 4.0).sin() / 20.0 * self.rotation_intensity;
        let y = (t / 4.0).sin() / 10.0 * self.float_intensity;
        Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            Vec3::new(0.0, y, 0.0),
        )
    }
}

/// Deterministic shell of `count` points between `radius` and
/// `radius + depth` from the origin.
pub fn star_field(count: usize, radius: f32, depth: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            // Spread radii evenly through the shell, jitter direction.
            let r = radius + depth * (i as f32 / count.max(1) as f32);
            let z: f32 = rng.gen_range(-1.0..=1.0);
            let theta: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let s = (1.0 - z * z).max(0.0).sqrt();
            Vec3::new(s * theta.cos(), s * theta.sin(), z) * r
        })
        .collect()
}

/// Star points as small emissive sphere instances.
pub fn star_instances(points: &[Vec3]) -> Vec<Instance> {
    points
        .iter()
        .map(|p| {
            // Farther stars are dimmer.
            let fade = (1.0 - (p.length() - STAR_RADIUS) / STAR_DEPTH).clamp(0.2, 1.0);
            Instance {
                kind: PrimitiveKind::Sphere,
                model: Mat4::from_scale_rotation_translation(
                    Vec3::splat(STAR_SIZE * (1.0 + p.length() / STAR_RADIUS)),
                    Quat::IDENTITY,
                    *p,
                ),
                color: Vec4::new(0.0, 0.0, 0.0, 1.0),
                emissive: Vec4::new(fade, fade, fade, 1.0),
            }
        })
        .collect()
}
