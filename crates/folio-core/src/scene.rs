//! Static scene configuration tree.
//!
//! Nodes are fixed data (a transform, an optional primitive mesh and its
//! children), deserialised from a JSON manifest or built in code, then walked
//! once into a flat list of [`Instance`]s for the renderer.

use crate::constants::{
    stage_offset_vec3, subject_offset_vec3, PODIUM_COLOR, PODIUM_HEIGHT, PODIUM_RADIUS,
    PODIUM_SEGMENTS, PODIUM_Y, SUBJECT_SCALE_STANDIN,
};
use crate::error::{SceneError, SceneResult};
use crate::viewport::Classification;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Cuboid {
        size: Vec3,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        #[serde(default = "default_segments")]
        segments: u32,
    },
    Sphere {
        radius: f32,
    },
}

fn default_segments() -> u32 {
    32
}

/// Renderer-side mesh family; each is drawn from one shared unit mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Cuboid,
    Cylinder,
    Sphere,
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Cuboid { .. } => PrimitiveKind::Cuboid,
            Primitive::Cylinder { .. } => PrimitiveKind::Cylinder,
            Primitive::Sphere { .. } => PrimitiveKind::Sphere,
        }
    }

    /// Scale that maps the unit mesh of this family onto the primitive.
    /// Cylinders use the larger radius; the taper is approximated.
    pub fn unit_scale(&self) -> Vec3 {
        match *self {
            Primitive::Cuboid { size } => size,
            Primitive::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                let r = radius_top.max(radius_bottom);
                Vec3::new(r, height, r)
            }
            Primitive::Sphere { radius } => Vec3::splat(radius),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: String,
    pub emissive: String,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: "#ffffff".into(),
            emissive: "#000000".into(),
            emissive_intensity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
        }
    }
}

impl Material {
    pub fn solid(color: &str) -> Self {
        Self {
            color: color.into(),
            ..Self::default()
        }
    }

    pub fn with_surface(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }
}

/// Parse `#rgb` / `#rrggbb` into linear-ish [0, 1] RGB.
pub fn parse_hex_color(s: &str) -> SceneResult<[f32; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.is_ascii() {
        return Err(SceneError::InvalidColor(s.to_string()));
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(SceneError::InvalidColor(s.to_string())),
    };
    let mut out = [0.0; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16)
            .map_err(|_| SceneError::InvalidColor(s.to_string()))?;
        *slot = byte as f32 / 255.0;
    }
    Ok(out)
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    Named(String),
    Inline(Material),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Mesh {
    pub primitive: Primitive,
    pub material: MaterialRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        let rot = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SceneNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub mesh: Option<Mesh>,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

/// A loaded subject: shared named materials plus the node tree.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SceneManifest {
    #[serde(default)]
    pub materials: FnvHashMap<String, Material>,
    pub root: SceneNode,
}

impl SceneManifest {
    pub fn from_json(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// One renderable primitive in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub kind: PrimitiveKind,
    pub model: Mat4,
    /// RGB + opacity.
    pub color: Vec4,
    /// Emissive RGB pre-multiplied by intensity; w = roughness.
    pub emissive: Vec4,
}

impl SceneNode {
    /// Parse a bare node tree (no shared material table).
    pub fn from_json(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn group(name: &str, transform: Transform, children: Vec<SceneNode>) -> Self {
        Self {
            name: name.into(),
            transform,
            mesh: None,
            children,
        }
    }

    pub fn mesh(
        name: &str,
        transform: Transform,
        primitive: Primitive,
        material: Material,
    ) -> Self {
        Self {
            name: name.into(),
            transform,
            mesh: Some(Mesh {
                primitive,
                material: MaterialRef::Inline(material),
            }),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Walk the tree depth-first (parent before children) into instances.
    pub fn flatten(
        &self,
        materials: &FnvHashMap<String, Material>,
        parent: Mat4,
    ) -> SceneResult<Vec<Instance>> {
        let mut out = Vec::with_capacity(self.node_count());
        self.flatten_into(materials, parent, &mut out)?;
        Ok(out)
    }

    fn flatten_into(
        &self,
        materials: &FnvHashMap<String, Material>,
        parent: Mat4,
        out: &mut Vec<Instance>,
    ) -> SceneResult<()> {
        let world = parent * self.transform.matrix();
        if let Some(mesh) = &self.mesh {
            let material = match &mesh.material {
                MaterialRef::Inline(m) => m,
                MaterialRef::Named(name) => {
                    materials
                        .get(name)
                        .ok_or_else(|| SceneError::UnknownMaterial {
                            node: self.name.clone(),
                            material: name.clone(),
                        })?
                }
            };
            let [r, g, b] = parse_hex_color(&material.color)?;
            let [er, eg, eb] = parse_hex_color(&material.emissive)?;
            let ei = material.emissive_intensity.max(0.0);
            out.push(Instance {
                kind: mesh.primitive.kind(),
                model: world * Mat4::from_scale(mesh.primitive.unit_scale()),
                color: Vec4::new(r, g, b, material.opacity.clamp(0.0, 1.0)),
                emissive: Vec4::new(er * ei, eg * ei, eb * ei, material.roughness.clamp(0.0, 1.0)),
            });
        }
        for child in &self.children {
            child.flatten_into(materials, world, out)?;
        }
        Ok(())
    }
}

/// Stage group: the subject on top, plus the reflective podium on desktop.
/// The podium is dropped on narrow screens where it reads as a grey band.
pub fn hero_stage(classification: Classification, subject: SceneNode) -> SceneNode {
    let mut children = vec![SceneNode::group("character", Transform::default(), vec![subject])];
    if !classification.is_mobile() {
        children.push(SceneNode::mesh(
            "podium",
            Transform::at(Vec3::new(0.0, PODIUM_Y, 0.0)),
            Primitive::Cylinder {
                radius_top: PODIUM_RADIUS,
                radius_bottom: PODIUM_RADIUS,
                height: PODIUM_HEIGHT,
                segments: PODIUM_SEGMENTS,
            },
            Material::solid(PODIUM_COLOR).with_surface(0.5, 0.5),
        ));
    }
    SceneNode::group("hero_stage", Transform::at(stage_offset_vec3()), children)
}

/// Simplified procedural figure shown while the real subject is loading or
/// after it failed to load.
pub fn standin_subject() -> SceneNode {
    let body = Material::solid("#a0a0a0").with_surface(0.4, 0.6);
    let accent = Material {
        emissive: "#4f46e5".into(),
        emissive_intensity: 1.5,
        ..Material::solid("#1a1a1a")
    };
    let limb = |name: &str, x: f32| {
        SceneNode::mesh(
            name,
            Transform::at(Vec3::new(x, 0.25, 0.0)),
            Primitive::Cylinder {
                radius_top: 0.08,
                radius_bottom: 0.07,
                height: 0.5,
                segments: 16,
            },
            body.clone(),
        )
    };
    SceneNode::group(
        "standin",
        Transform::at(subject_offset_vec3()).with_uniform_scale(SUBJECT_SCALE_STANDIN),
        vec![
            limb("leg_l", -0.12),
            limb("leg_r", 0.12),
            SceneNode::mesh(
                "torso",
                Transform::at(Vec3::new(0.0, 0.85, 0.0)),
                Primitive::Cuboid {
                    size: Vec3::new(0.48, 0.65, 0.28),
                },
                body.clone(),
            ),
            SceneNode::mesh(
                "core",
                Transform::at(Vec3::new(0.0, 0.9, 0.145)),
                Primitive::Sphere { radius: 0.05 },
                accent,
            ),
            SceneNode::mesh(
                "head",
                Transform::at(Vec3::new(0.0, 1.37, 0.0)),
                Primitive::Sphere { radius: 0.15 },
                body,
            ),
        ],
    )
}
