// Integration tests for the scene tree: manifest parsing, flattening and the
// stage assembled for each load state and viewport class.

use folio_core::scene::{
    hero_stage, parse_hex_color, standin_subject, PrimitiveKind, SceneManifest, SceneNode,
};
use folio_core::stage::{build_stage, star_field, FloatMotion};
use folio_core::*;
use glam::{Mat4, Vec3};

const MANIFEST: &str = r##"{
    "materials": {
        "skin": { "color": "#ffccaa", "roughness": 0.6 }
    },
    "root": {
        "name": "body",
        "children": [
            {
                "name": "torso",
                "transform": { "position": [0.0, 1.0, 0.0] },
                "mesh": {
                    "primitive": { "kind": "cuboid", "size": [0.5, 0.7, 0.3] },
                    "material": "skin"
                }
            },
            {
                "name": "eye",
                "mesh": {
                    "primitive": { "kind": "sphere", "radius": 0.05 },
                    "material": { "color": "#000", "emissive": "#00ffff", "emissive_intensity": 2.0 }
                }
            }
        ]
    }
}"##;

fn loaded() -> LoadState<SceneManifest> {
    LoadState::from_result(SceneManifest::from_json(MANIFEST).map_err(AssetError::from))
}

fn translation(m: &Mat4) -> Vec3 {
    m.w_axis.truncate()
}

#[test]
fn manifest_parses_named_and_inline_materials() {
    let manifest = SceneManifest::from_json(MANIFEST).expect("valid manifest");
    assert_eq!(manifest.root.node_count(), 3);
    let instances = manifest
        .root
        .flatten(&manifest.materials, Mat4::IDENTITY)
        .expect("flatten");
    assert_eq!(instances.len(), 2);

    let torso = &instances[0];
    assert_eq!(torso.kind, PrimitiveKind::Cuboid);
    assert!((translation(&torso.model) - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    assert!((torso.color.x - 1.0).abs() < 1e-6);
    assert!((torso.emissive.w - 0.6).abs() < 1e-6);

    let eye = &instances[1];
    assert_eq!(eye.kind, PrimitiveKind::Sphere);
    assert_eq!(eye.emissive.truncate(), Vec3::new(0.0, 2.0, 2.0));
}

#[test]
fn malformed_manifest_is_an_error() {
    assert!(matches!(
        SceneManifest::from_json("{ \"root\": 4 }"),
        Err(SceneError::Manifest(_))
    ));
    assert!(SceneNode::from_json("{\"name\": \"bare\"}").is_ok());
}

#[test]
fn unknown_material_names_the_node() {
    let node = SceneNode::from_json(
        r#"{ "name": "hat", "mesh": { "primitive": { "kind": "sphere", "radius": 1.0 }, "material": "felt" } }"#,
    )
    .expect("node parses");
    let err = node
        .flatten(&Default::default(), Mat4::IDENTITY)
        .expect_err("missing material");
    match err {
        SceneError::UnknownMaterial { node, material } => {
            assert_eq!(node, "hat");
            assert_eq!(material, "felt");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn flatten_is_parent_first() {
    let stage = hero_stage(Classification::Desktop, standin_subject());
    let instances = stage
        .flatten(&Default::default(), Mat4::IDENTITY)
        .expect("stand-in flattens");
    // Stand-in meshes come before the podium.
    assert_eq!(instances.len(), 6);
    assert_eq!(instances.last().map(|i| i.kind), Some(PrimitiveKind::Cylinder));
}

#[test]
fn podium_only_on_desktop() {
    let loading = LoadState::<SceneManifest>::Loading;
    let desktop = build_stage(Classification::Desktop, &loading);
    let mobile = build_stage(Classification::Mobile, &loading);
    assert_eq!(desktop.len(), mobile.len() + 1);

    let podium = desktop.last().expect("podium");
    assert!((translation(&podium.model).y - (-2.55)).abs() < 1e-5);
    let scale = podium.model.x_axis.truncate().length();
    assert!((scale - 3.0).abs() < 1e-5);
}

#[test]
fn loaded_subject_replaces_standin() {
    let stage = build_stage(Classification::Desktop, &loaded());
    assert_eq!(stage.len(), 3);
    // stage (-1.5) + subject offset (-1.0) + 1.8 * torso (1.0)
    assert!((translation(&stage[0].model).y - (-0.7)).abs() < 1e-5);
}

#[test]
fn failed_load_falls_back_to_standin() {
    let failed = LoadState::<SceneManifest>::Failed(AssetError::Status {
        url: "/models/hero.json".into(),
        status: 404,
    });
    assert_eq!(failed.kind(), LoadKind::Failed);
    assert!(failed.is_settled());
    let a = build_stage(Classification::Desktop, &failed);
    let b = build_stage(Classification::Desktop, &LoadState::Loading);
    assert_eq!(a, b);
}

#[test]
fn unusable_manifest_falls_back_to_standin() {
    let manifest = SceneManifest::from_json(
        r#"{ "root": { "mesh": { "primitive": { "kind": "sphere", "radius": 1.0 }, "material": "ghost" } } }"#,
    )
    .expect("parses");
    let stage = build_stage(Classification::Mobile, &LoadState::Loaded(manifest));
    assert_eq!(stage, build_stage(Classification::Mobile, &LoadState::Loading));
}

#[test]
fn non_ascii_colour_falls_back_to_standin() {
    let manifest = SceneManifest::from_json(
        r##"{ "root": { "mesh": {
            "primitive": { "kind": "sphere", "radius": 1.0 },
            "material": { "color": "#aé123" }
        } } }"##,
    )
    .expect("parses");
    let stage = build_stage(Classification::Desktop, &LoadState::Loaded(manifest));
    assert_eq!(stage, build_stage(Classification::Desktop, &LoadState::Loading));
}

#[test]
fn hex_colour_rejects_multibyte_input() {
    for bad in ["#€", "#aé123", "é", "#ééé"] {
        assert!(
            matches!(parse_hex_color(bad), Err(SceneError::InvalidColor(_))),
            "{}",
            bad
        );
    }
    assert_eq!(parse_hex_color("#fff").expect("short form"), [1.0; 3]);
}

#[test]
fn load_progress_percent() {
    assert_eq!(LoadProgress::new(0).percent(), 100.0);
    let mut p = LoadProgress::new(2);
    assert_eq!(p.percent(), 0.0);
    p.settle();
    assert_eq!(p.percent(), 50.0);
    p.settle();
    p.settle();
    assert_eq!(p.done, 2);
    assert_eq!(p.percent(), 100.0);
}

#[test]
fn star_field_is_seeded_and_inside_shell() {
    let a = star_field(500, 50.0, 50.0, 7);
    let b = star_field(500, 50.0, 50.0, 7);
    assert_eq!(a, b);
    assert_eq!(a.len(), 500);
    for p in &a {
        let r = p.length();
        assert!((49.99..=100.01).contains(&r), "radius {r}");
    }
    assert_ne!(a, star_field(500, 50.0, 50.0, 8));
}

#[test]
fn float_motion_stays_gentle() {
    let motion = FloatMotion::default();
    for i in 0..200 {
        let m = motion.matrix(i as f32 * 0.1);
        let y = translation(&m).y;
        assert!(y.abs() <= 0.02 + 1e-6);
    }
    // Peak bob a quarter period in.
    let peak = motion.matrix(std::f32::consts::TAU / 0.5);
    assert!((translation(&peak).y - 0.02).abs() < 1e-5);
}
