//! Headless engine tests.
//!
//! These need a GPU adapter (real or software fallback). When none is
//! available engine creation fails and the test returns early.

use pitchview_core::{
    FixedMesh, Frame, Mat4, MeshId, SceneConfig, TextureBinding, TextureSlot, Vec4, World,
};
use pitchview_render::RenderEngine;

fn headless(width: u32, height: u32, config: &SceneConfig) -> Option<RenderEngine> {
    match pollster::block_on(RenderEngine::new_headless(width, height, config)) {
        Ok(engine) => Some(engine),
        Err(e) => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
            None
        }
    }
}

#[test]
fn headless_engine_renders_scene() {
    let config = SceneConfig::default();
    let Some(mut engine) = headless(160, 120, &config) else {
        return;
    };
    assert_eq!(engine.dimensions(), (160, 120));
    assert_eq!(engine.target_format(), wgpu::TextureFormat::Rgba8Unorm);

    // --- Empty frame clears to the background ---
    let empty = Frame {
        clear_color: Vec4::new(0.0, 0.0, 1.0, 1.0),
        view: Mat4::IDENTITY,
        items: Vec::new(),
    };
    let pixels = engine.render_to_image(&empty).expect("empty render failed");
    assert_eq!(pixels.len(), 160 * 120 * 4);
    assert!(pixels.chunks(4).all(|px| px == [0, 0, 255, 255]));

    // --- Draws without uploaded meshes are skipped ---
    let world = World::new(config, 160, 120);
    let frame = world.frame();
    let pixels = engine.render_to_image(&frame).expect("render failed");
    assert!(pixels.chunks(4).all(|px| px == [0, 0, 0, 255]));

    // --- Fixed scene draws over the background ---
    engine.upload_scene(&world);
    for id in FixedMesh::ALL {
        assert!(engine.has_mesh(MeshId::Fixed(id)));
    }
    assert!(!engine.has_mesh(MeshId::Model(0)));
    assert!(!engine.has_scene_texture(TextureSlot::Grass));

    let pixels = engine.render_to_image(&frame).expect("scene render failed");
    let lit = pixels.chunks(4).filter(|px| px[..3] != [0, 0, 0]).count();
    assert!(lit > 0, "goal and ground should cover some pixels");
    assert!(lit < 160 * 120, "background should remain visible");
}

#[test]
fn headless_engine_resizes() {
    let config = SceneConfig::default();
    let Some(mut engine) = headless(64, 64, &config) else {
        return;
    };

    engine.resize(0, 32);
    assert_eq!(engine.dimensions(), (64, 64));

    engine.resize(96, 48);
    assert_eq!(engine.dimensions(), (96, 48));
    assert!((engine.projection.aspect_ratio - 2.0).abs() < 1e-6);

    let frame = World::new(config, 96, 48).frame();
    let pixels = engine.render_to_image(&frame).expect("render failed");
    assert_eq!(pixels.len(), 96 * 48 * 4);
}

#[test]
fn headless_engine_loads_scene_textures() {
    let dir = std::env::temp_dir().join(format!("pitchview_engine_textures_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let grass = dir.join("grass.png");
    let plastic = dir.join("plastic.png");
    image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 200, 0, 255]))
        .save(&grass)
        .unwrap();
    image::RgbaImage::from_pixel(4, 4, image::Rgba([250, 250, 250, 255]))
        .save(&plastic)
        .unwrap();

    let mut config = SceneConfig::default();
    config.textures.grass.path = grass;
    config.textures.plastic.path = plastic;

    let Some(mut engine) = headless(32, 32, &config) else {
        return;
    };
    engine.load_textures(&config.textures).unwrap();
    assert!(engine.has_scene_texture(TextureSlot::Grass));
    assert!(engine.has_scene_texture(TextureSlot::Plastic));

    config.textures.grass.path = dir.join("missing.png");
    assert!(engine.load_textures(&config.textures).is_err());

    let _ = std::fs::remove_dir_all(&dir);
}

const TRIANGLE_OBJ: &str = "\
mtllib tri.mtl
o painted
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
usemtl painted
f 1/1 2/2 3/3
o photo
v 0 0 1
v 1 0 1
v 0 1 1
vt 0 0
vt 1 0
vt 0 1
usemtl photo
f 4/4 5/5 6/6
";

const TRIANGLE_MTL: &str = "\
newmtl painted
Kd 0.2 0.4 0.6
map_Kd missing.png
newmtl photo
Kd 1 1 1
map_Kd photo.png
";

#[test]
fn headless_engine_untextures_meshes_with_missing_material_texture() {
    let dir = std::env::temp_dir().join(format!("pitchview_engine_materials_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("tri.obj"), TRIANGLE_OBJ).unwrap();
    std::fs::write(dir.join("tri.mtl"), TRIANGLE_MTL).unwrap();
    image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]))
        .save(dir.join("photo.png"))
        .unwrap();

    let mut config = SceneConfig::default();
    config.model.directory.clone_from(&dir);
    config.model.file_name = "tri.obj".to_string();

    let Some(mut engine) = headless(32, 32, &config) else {
        let _ = std::fs::remove_dir_all(&dir);
        return;
    };
    let mut world = World::new(config, 32, 32);
    world.initialize().unwrap();
    engine.upload_scene(&world);

    let frame = world.frame();
    let uniforms = engine.draw_uniforms(&frame);
    assert_eq!(uniforms.len(), frame.items.len());

    let painted = frame.items.iter().position(|i| i.label == "painted").unwrap();
    assert_eq!(frame.items[painted].texture, TextureBinding::Material(0));
    assert!(!engine.is_texture_bound(TextureBinding::Material(0)));
    assert_eq!(uniforms[painted].texture_mode, 0);
    assert!((uniforms[painted].color[2] - 0.6).abs() < 1e-6);

    let photo = frame.items.iter().position(|i| i.label == "photo").unwrap();
    assert!(engine.is_texture_bound(TextureBinding::Material(1)));
    assert_eq!(uniforms[photo].texture_mode, 1);

    // Scene textures were never loaded, so the ground is untextured too.
    assert_eq!(uniforms[0].texture_mode, 0);

    let _ = std::fs::remove_dir_all(&dir);
}
