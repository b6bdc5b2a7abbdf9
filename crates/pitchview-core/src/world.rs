//! The world: camera state, fixed scene and imported model.

use std::path::Path;

use glam::Vec4;

use crate::config::SceneConfig;
use crate::error::Result;
use crate::frame::{DrawItem, Frame};
use crate::matrix_stack::MatrixStack;
use crate::model::ImportedScene;
use crate::scene::FixedScene;
use crate::view::WorldView;

/// Owns everything that is drawn and the camera it is drawn from.
///
/// The imported model is absent until [`initialize`](Self::initialize)
/// succeeds; frames built before that contain the fixed scene only.
#[derive(Debug, Clone)]
pub struct World {
    config: SceneConfig,
    view: WorldView,
    fixed: FixedScene,
    scene: Option<ImportedScene>,
}

impl World {
    /// Creates the world for a viewport of `width` x `height` pixels.
    #[must_use]
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Self {
        let view = WorldView::from_config(&config.camera, width, height);
        let fixed = FixedScene::new(&config.primitives);
        Self {
            config,
            view,
            fixed,
            scene: None,
        }
    }

    /// Loads the configured model.
    pub fn initialize(&mut self) -> Result<()> {
        self.load_scene()
    }

    /// Imports the model named by the configuration, replacing any previous one.
    pub fn load_scene(&mut self) -> Result<()> {
        let model = &self.config.model;
        let scene = ImportedScene::load(&model.directory, &model.file_name)?;
        self.scene = Some(scene);
        Ok(())
    }

    /// Replaces the imported model with `file_name` from `directory`.
    ///
    /// On failure the current model stays in place.
    pub fn reload_model(
        &mut self,
        directory: impl AsRef<Path>,
        file_name: &str,
    ) -> Result<()> {
        let directory = directory.as_ref();
        let scene = ImportedScene::load(directory, file_name)?;
        self.config.model.directory = directory.to_path_buf();
        self.config.model.file_name = file_name.to_string();
        self.scene = Some(scene);
        Ok(())
    }

    /// Records a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.view.set_size(width, height);
    }

    /// Builds the draw list: ground, goal, then the imported model.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let mut stack = MatrixStack::new();
        let mut items: Vec<DrawItem> = Vec::new();

        stack.push();
        self.fixed.draw_items(&mut stack, &mut items);
        if let Some(scene) = &self.scene {
            scene.draw_items(&mut stack, &self.config.model, &mut items);
        }
        stack.pop();

        Frame {
            clear_color: Vec4::from(self.config.clear_color),
            view: self.view.view_matrix(),
            items,
        }
    }

    #[must_use]
    pub fn view(&self) -> &WorldView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut WorldView {
        &mut self.view
    }

    /// The imported model, once loaded.
    #[must_use]
    pub fn scene(&self) -> Option<&ImportedScene> {
        self.scene.as_ref()
    }

    #[must_use]
    pub fn fixed_scene(&self) -> &FixedScene {
        &self.fixed
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}
