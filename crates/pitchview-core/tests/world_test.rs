//! Integration tests for model import and the world's frame assembly.

use std::fs;
use std::path::PathBuf;

use pitchview_core::*;

/// Creates a fresh scratch directory for one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pitchview-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

const CUBE_OBJ: &str = "\
mtllib cube.mtl
o marker
v 3 0 0
v 4 0 0
v 3 1 0
f 1 2 3
o cube
v -1 -1 -1
v  1 -1 -1
v  1  1 -1
v -1  1 -1
v -1 -1  1
v  1 -1  1
v  1  1  1
v -1  1  1
usemtl red
f 4 7 6 5
f 8 9 10 11
f 4 5 9 8
f 6 7 11 10
f 5 6 10 9
f 4 8 11 7
";

const CUBE_MTL: &str = "\
newmtl red
Ka 0.1 0.0 0.0
Kd 0.9 0.1 0.1
Ks 0.5 0.5 0.5
Ns 32
map_Kd red.png
";

#[test]
fn test_import_obj_with_materials() {
    let dir = scratch_dir("import");
    fs::write(dir.join("cube.obj"), CUBE_OBJ).unwrap();
    fs::write(dir.join("cube.mtl"), CUBE_MTL).unwrap();

    let scene = ImportedScene::load(&dir, "cube.obj").unwrap();
    assert_eq!(scene.path(), dir.join("cube.obj"));
    assert_eq!(scene.meshes().len(), 2);

    assert_eq!(scene.meshes()[0].material, None);
    let cube = &scene.meshes()[1];
    assert_eq!(cube.data.num_triangles(), 12);
    assert_eq!(cube.material, Some(0));
    for n in &cube.data.normals {
        assert!((n.length() - 1.0).abs() < 1e-4);
    }

    let red = &scene.materials()[0];
    assert_eq!(red.name, "red");
    assert_eq!(red.diffuse, Vec3::new(0.9, 0.1, 0.1));
    assert_eq!(red.shininess, 32.0);
    assert_eq!(red.diffuse_texture, Some(dir.join("red.png")));

    let (min, max) = scene.bounding_box().unwrap();
    assert_eq!(min, Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(max, Vec3::new(4.0, 1.0, 1.0));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_material_library_is_tolerated() {
    let dir = scratch_dir("nomtl");
    fs::write(dir.join("cube.obj"), CUBE_OBJ).unwrap();

    let scene = ImportedScene::load(&dir, "cube.obj").unwrap();
    assert!(scene.materials().is_empty());
    assert!(scene.meshes().iter().all(|mesh| mesh.material.is_none()));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_obj_without_faces_is_empty_model() {
    let dir = scratch_dir("empty");
    fs::write(dir.join("points.obj"), "v 0 0 0\nv 1 0 0\n").unwrap();

    let err = ImportedScene::load(&dir, "points.obj").unwrap_err();
    assert!(matches!(err, PitchviewError::EmptyModel(_)));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_world_frame_order_and_placement() {
    let dir = scratch_dir("world");
    fs::write(dir.join("cube.obj"), CUBE_OBJ).unwrap();
    fs::write(dir.join("cube.mtl"), CUBE_MTL).unwrap();

    let mut config = SceneConfig::default();
    config.model.directory = dir.clone();
    config.model.file_name = "cube.obj".into();
    config.model.translation = Vec3::new(0.0, 0.0, -10.0);
    config.model.scale = 2.0;

    let mut world = World::new(config, 800, 600);
    world.initialize().unwrap();

    let frame = world.frame();
    assert_eq!(frame.items.len(), 8 + 2);
    assert_eq!(frame.items[0].mesh, MeshId::Fixed(FixedMesh::Ground));
    assert!(frame.items[1..8]
        .iter()
        .all(|item| matches!(item.mesh, MeshId::Fixed(_))));
    assert_eq!(frame.items[8].mesh, MeshId::Model(0));
    assert_eq!(frame.items[9].mesh, MeshId::Model(1));

    let cube = &frame.items[9];
    assert_eq!(cube.texture, TextureBinding::Material(0));
    assert_eq!(cube.color, Vec4::new(0.9, 0.1, 0.1, 1.0));
    let corner = cube.transform.transform_point3(Vec3::ONE);
    assert!((corner - Vec3::new(2.0, 2.0, -8.0)).length() < 1e-5);

    // Mesh without a material is drawn untextured.
    assert_eq!(frame.items[8].texture, TextureBinding::None);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_reload_model_swaps_scene() {
    let dir = scratch_dir("reload");
    fs::write(dir.join("cube.obj"), CUBE_OBJ).unwrap();
    fs::write(dir.join("tri.obj"), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

    let mut config = SceneConfig::default();
    config.model.directory = dir.clone();
    config.model.file_name = "cube.obj".into();
    let mut world = World::new(config, 800, 600);
    world.initialize().unwrap();
    assert_eq!(world.scene().unwrap().meshes().len(), 2);

    world.reload_model(&dir, "tri.obj").unwrap();
    assert_eq!(world.scene().unwrap().meshes().len(), 1);
    assert_eq!(world.config().model.file_name, "tri.obj");

    // A failed reload leaves the previous model in place.
    assert!(world.reload_model(&dir, "missing.obj").is_err());
    assert_eq!(world.scene().unwrap().file_name(), "tri.obj");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_shipped_scene_config_parses() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/scene.json");
    let config = SceneConfig::load(path).unwrap();
    assert_eq!(config.model.file_name, "football.obj");
}

#[test]
fn test_shipped_football_imports() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/models");
    let scene = ImportedScene::load(&dir, "football.obj").unwrap();

    assert_eq!(scene.meshes().len(), 1);
    assert_eq!(scene.materials().len(), 1);
    assert_eq!(scene.meshes()[0].material, Some(0));

    let texture = scene.materials()[0].diffuse_texture.clone().unwrap();
    assert!(texture.ends_with("football.ppm"));
    assert!(texture.exists());

    let (min, max) = scene.bounding_box().unwrap();
    assert!((min + Vec3::ONE).abs().max_element() < 1e-4);
    assert!((max - Vec3::ONE).abs().max_element() < 1e-4);
}
