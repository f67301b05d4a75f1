use crate::action::CameraAction;
use crate::bindings::{InputSettings, KeyBindings};
use crate::event::{InputEvent, KeyboardState, KeySource};
use billard_camera::{Direction, MotionMode, MouseLook};

/// Everything input produced for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub actions: Vec<CameraAction>,
    pub exit_requested: bool,
}

/// Resolves queued input events and held keys into camera actions.
#[derive(Debug, Clone)]
pub struct InputController {
    bindings: KeyBindings,
    motion: MotionMode,
    keys: KeyboardState,
    mouse: MouseLook,
    mouse_look: bool,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(&InputSettings::default())
    }
}

impl InputController {
    pub fn new(settings: &InputSettings) -> Self {
        Self {
            bindings: settings.bindings.clone(),
            motion: settings.motion,
            keys: KeyboardState::new(),
            mouse: MouseLook::new(),
            mouse_look: settings.mouse_look,
        }
    }

    pub fn motion(&self) -> MotionMode {
        self.motion
    }

    pub fn set_motion(&mut self, motion: MotionMode) {
        self.motion = motion;
    }

    pub fn keys(&self) -> &KeyboardState {
        &self.keys
    }

    pub fn mouse_look(&self) -> bool {
        self.mouse_look
    }

    /// Fold this frame's events into key state, then poll held keys.
    ///
    /// Event-driven actions (look, zoom) come first in arrival order, followed
    /// by the held-key actions in binding order.
    pub fn resolve<I>(&mut self, events: I, dt: f32) -> FrameInput
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut frame = FrameInput::default();

        for event in events {
            match event {
                InputEvent::KeyPressed(key) => {
                    self.keys.press(key);
                    if key == self.bindings.exit {
                        frame.exit_requested = true;
                    }
                }
                InputEvent::KeyReleased(key) => self.keys.release(key),
                InputEvent::CursorMoved { x, y } => {
                    if !self.mouse_look {
                        continue;
                    }
                    let (dx, dy) = self.mouse.offset(x, y);
                    if dx != 0.0 || dy != 0.0 {
                        frame.actions.push(CameraAction::Look { x: dx, y: dy });
                    }
                }
                InputEvent::Scroll { y } => frame.actions.push(CameraAction::Zoom(y)),
                InputEvent::MouseLook(enabled) => {
                    tracing::debug!(enabled, "mouse look toggled");
                    self.mouse_look = enabled;
                    self.mouse.reset();
                }
                InputEvent::FocusLost => {
                    self.keys.clear();
                    self.mouse.reset();
                }
                InputEvent::CloseRequested => frame.exit_requested = true,
            }
        }

        if self.keys.is_pressed(self.bindings.exit) {
            frame.exit_requested = true;
        }
        frame.actions.extend(self.poll(&self.keys, dt));
        frame
    }

    /// Actions for every bound key that `keys` reports as held.
    pub fn poll<K: KeySource>(&self, keys: &K, dt: f32) -> Vec<CameraAction> {
        let b = &self.bindings;
        let distance = self.motion.distance(dt);
        let sensitivity = self.motion.rotation(dt);
        let mut actions = Vec::new();

        let moves = [
            (b.left, Direction::Left),
            (b.right, Direction::Right),
            (b.forward, Direction::Forward),
            (b.backward, Direction::Backward),
        ];
        for (key, direction) in moves {
            if keys.is_pressed(key) {
                actions.push(CameraAction::Move(direction, distance));
            }
        }

        let turns = [
            (b.yaw_right, 1.0, 0.0),
            (b.yaw_left, -1.0, 0.0),
            (b.pitch_up, 0.0, 1.0),
            (b.pitch_down, 0.0, -1.0),
        ];
        for (key, yaw, pitch) in turns {
            if keys.is_pressed(key) {
                actions.push(CameraAction::Rotate {
                    yaw,
                    pitch,
                    sensitivity,
                });
            }
        }

        actions
    }
}
