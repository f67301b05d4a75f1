use crate::backend::RenderBackend;
use billard_camera::Camera;
use billard_common::{UniformNames, UniformValue};
use billard_input::{InputController, InputEvent};
use billard_scene::{LightingParams, SceneDescriptor, ViewerConfig};

/// What the caller should do after [`FrameDriver::frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    Exit,
}

/// Owns the camera, the input controller and the scene, and turns one batch
/// of input events into one frame of backend calls.
///
/// The driver is the only mutator of the camera. Backends receive named
/// uniform values and never see the camera itself.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    camera: Camera,
    input: InputController,
    scene: SceneDescriptor,
    /// Shared parameters merged with each target's overrides, by target index.
    resolved: Vec<LightingParams>,
    names: UniformNames,
    exit: bool,
    frame_index: u64,
}

impl FrameDriver {
    pub fn new(
        camera: Camera,
        input: InputController,
        scene: SceneDescriptor,
        names: UniformNames,
    ) -> Self {
        let resolved = scene.targets.iter().map(|t| scene.params_for(t)).collect();
        Self {
            camera,
            input,
            scene,
            resolved,
            names,
            exit: false,
            frame_index: 0,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            Camera::from_settings(&config.camera),
            InputController::new(&config.input),
            config.scene.clone(),
            config.render.uniform_names,
        )
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputController {
        &mut self.input
    }

    pub fn scene(&self) -> &SceneDescriptor {
        &self.scene
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    pub fn request_exit(&mut self) {
        self.exit = true;
    }

    /// Resolve this frame's events and apply the resulting actions to the
    /// camera. Returns true once exit has been requested.
    pub fn handle_input<I>(&mut self, events: I, dt: f32) -> bool
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let frame = self.input.resolve(events, dt);
        for action in &frame.actions {
            action.apply(&mut self.camera);
        }
        if frame.exit_requested && !self.exit {
            tracing::info!(frame = self.frame_index, "exit requested");
            self.exit = true;
        }
        self.exit
    }

    /// Issue one frame of backend calls for the current camera state.
    ///
    /// View and projection are computed once and pushed to every target.
    pub fn render<B: RenderBackend>(&self, backend: &mut B, aspect: f32) -> Result<(), B::Error> {
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix(aspect);
        let eye = UniformValue::Vec3(self.camera.position());

        backend.begin_frame(self.scene.clear_color)?;
        for (target, params) in self.scene.targets.iter().zip(&self.resolved) {
            backend.use_shader(&target.shader)?;
            backend.set_uniform(self.names.view(), UniformValue::Mat4(view))?;
            backend.set_uniform(self.names.projection(), UniformValue::Mat4(projection))?;
            backend.set_uniform(
                self.names.model(),
                UniformValue::Mat4(target.transform.to_matrix()),
            )?;
            backend.set_uniform(self.names.view_pos(), eye)?;
            for (name, value) in params.iter() {
                backend.set_uniform(name, value)?;
            }
            backend.draw_mesh(&target.mesh)?;
        }
        backend.end_frame()
    }

    /// One loop iteration: input, then rendering unless exit was requested.
    pub fn frame<B, I>(
        &mut self,
        events: I,
        dt: f32,
        aspect: f32,
        backend: &mut B,
    ) -> Result<FrameOutcome, B::Error>
    where
        B: RenderBackend,
        I: IntoIterator<Item = InputEvent>,
    {
        if self.exit || self.handle_input(events, dt) {
            return Ok(FrameOutcome::Exit);
        }
        self.render(backend, aspect)?;
        self.frame_index += 1;
        tracing::trace!(frame = self.frame_index, "frame rendered");
        Ok(FrameOutcome::Rendered)
    }
}
