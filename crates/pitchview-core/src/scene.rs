//! The hard-coded part of the scene: a grass pitch and a goal.
//!
//! Geometry is described the way it would be issued to a fixed-function
//! pipeline, as a sequence of matrix stack operations around primitive draws.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::config::PrimitiveConfig;
use crate::frame::{DrawItem, FixedMesh, MeshId, TextureBinding, TextureSlot};
use crate::matrix_stack::MatrixStack;
use crate::mesh::MeshData;
use crate::primitives;

/// Half the side length of the square ground plane.
pub const GROUND_HALF_EXTENT: f32 = 35.0;
/// Height of the ground plane.
pub const GROUND_LEVEL: f32 = -1.0;
/// Times the grass texture repeats across the ground.
pub const GROUND_TEXTURE_REPEAT: f32 = 20.0;
/// Distance of each post from the goal centre along X.
pub const GOAL_HALF_WIDTH: f32 = 12.0;
/// Z position of the goal line.
pub const GOAL_DEPTH: f32 = -30.0;
pub const POST_HEIGHT: f32 = 20.0;
pub const POST_RADIUS: f32 = 0.4;
pub const CROSSBAR_LENGTH: f32 = 2.0 * GOAL_HALF_WIDTH;

const GROUND_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
const GOAL_COLOR: Vec4 = Vec4::ONE;

/// Meshes shared by all draws of the fixed scene.
#[derive(Debug, Clone)]
pub struct FixedScene {
    ground: MeshData,
    post: MeshData,
    crossbar: MeshData,
    cap: MeshData,
}

impl FixedScene {
    /// Tessellates the fixed meshes.
    #[must_use]
    pub fn new(settings: &PrimitiveConfig) -> Self {
        let e = GROUND_HALF_EXTENT;
        let ground = primitives::quad(
            [
                Vec3::new(e, 0.0, e),
                Vec3::new(e, 0.0, -e),
                Vec3::new(-e, 0.0, -e),
                Vec3::new(-e, 0.0, e),
            ],
            [
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(0.0, 0.0),
            ],
            Vec3::Y,
        );

        let cylinder = |height| {
            primitives::cylinder(
                POST_RADIUS,
                POST_RADIUS,
                height,
                settings.slices,
                settings.stacks,
            )
        };

        Self {
            ground,
            post: cylinder(POST_HEIGHT),
            crossbar: cylinder(CROSSBAR_LENGTH),
            cap: primitives::disk(0.0, POST_RADIUS, settings.slices, settings.loops),
        }
    }

    #[must_use]
    pub fn mesh(&self, id: FixedMesh) -> &MeshData {
        match id {
            FixedMesh::Ground => &self.ground,
            FixedMesh::Post => &self.post,
            FixedMesh::Crossbar => &self.crossbar,
            FixedMesh::Cap => &self.cap,
        }
    }

    /// Appends the ground and goal draws, relative to the stack's current transform.
    pub fn draw_items(&self, stack: &mut MatrixStack, out: &mut Vec<DrawItem>) {
        draw_ground(stack, out);
        draw_goal(stack, out);
    }
}

fn item(
    label: &str,
    mesh: FixedMesh,
    stack: &MatrixStack,
    color: Vec4,
    texture: TextureSlot,
) -> DrawItem {
    DrawItem {
        label: label.to_string(),
        mesh: MeshId::Fixed(mesh),
        transform: stack.top(),
        color,
        specular: Vec4::ZERO,
        texture: TextureBinding::Scene(texture),
        uv_scale: 1.0,
    }
}

fn draw_ground(stack: &mut MatrixStack, out: &mut Vec<DrawItem>) {
    stack.push();
    stack.translate(Vec3::new(0.0, GROUND_LEVEL, 0.0));
    let mut ground = item(
        "ground",
        FixedMesh::Ground,
        stack,
        GROUND_COLOR,
        TextureSlot::Grass,
    );
    ground.uv_scale = GROUND_TEXTURE_REPEAT;
    out.push(ground);
    stack.pop();
}

fn draw_goal(stack: &mut MatrixStack, out: &mut Vec<DrawItem>) {
    let goal = |label: &str, mesh, stack: &MatrixStack| {
        item(label, mesh, stack, GOAL_COLOR, TextureSlot::Plastic)
    };

    // Left post, standing on the ground.
    stack.push();
    stack.translate(Vec3::new(-GOAL_HALF_WIDTH, GROUND_LEVEL, GOAL_DEPTH));
    stack.rotate_xyz(-90.0, 0.0, 0.0);
    out.push(goal("left post", FixedMesh::Post, stack));
    stack.translate(Vec3::new(0.0, 0.0, POST_HEIGHT));
    out.push(goal("left cap", FixedMesh::Cap, stack));
    stack.pop();

    // Right post, carrying the crossbar.
    stack.push();
    stack.translate(Vec3::new(GOAL_HALF_WIDTH, GROUND_LEVEL, GOAL_DEPTH));
    stack.rotate_xyz(-90.0, 0.0, 0.0);
    out.push(goal("right post", FixedMesh::Post, stack));
    stack.translate(Vec3::new(0.0, 0.0, POST_HEIGHT));
    out.push(goal("right cap", FixedMesh::Cap, stack));

    stack.push();
    stack.rotate_xyz(0.0, 90.0, 0.0);
    out.push(goal("top right cap", FixedMesh::Cap, stack));
    stack.pop();

    stack.rotate_xyz(0.0, -90.0, 0.0);
    out.push(goal("crossbar", FixedMesh::Crossbar, stack));

    stack.push();
    stack.translate(Vec3::new(0.0, 0.0, CROSSBAR_LENGTH));
    out.push(goal("top left cap", FixedMesh::Cap, stack));
    stack.pop();

    stack.pop();
}

/// Collects the fixed scene draws placed under `root`.
#[must_use]
pub fn fixed_items(scene: &FixedScene, root: Mat4) -> Vec<DrawItem> {
    let mut stack = MatrixStack::with_top(root);
    let mut out = Vec::new();
    scene.draw_items(&mut stack, &mut out);
    out
}
