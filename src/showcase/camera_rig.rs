use glam::Vec3;

use crate::animation::{Tween, Tweener};
use crate::scene::{NodeHandle, Scene};
use crate::showcase::config::CameraRigSettings;

/// One-shot camera fly-in that keeps the camera aimed at a fixed point.
///
/// Orbit-style user controls are intentionally absent: the camera only ever
/// follows this tween.
pub struct CameraFlyIn {
    node: NodeHandle,
    target: Vec3,
    tweener: Tweener<()>,
    finished: bool,
}

impl CameraFlyIn {
    /// Places the camera node at the start pose and starts flying it to the
    /// end pose.
    pub fn start(scene: &mut Scene, node: NodeHandle, settings: &CameraRigSettings) -> Self {
        if let Some(camera) = scene.get_node_mut(node) {
            camera.transform.position = settings.start;
            camera.transform.look_at(settings.target, Vec3::Y);
        }

        let mut tweener = Tweener::new();
        tweener.add(
            Tween::position(node, settings.end)
                .duration(settings.duration)
                .ease(settings.easing)
                .snap()
                .on_complete(()),
        );

        Self {
            node,
            target: settings.target,
            tweener,
            finished: false,
        }
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        if self.finished {
            return;
        }
        let landed = !self.tweener.update(dt, scene).is_empty();

        let Some(camera) = scene.get_node_mut(self.node) else {
            self.finished = true;
            return;
        };
        camera.transform.look_at(self.target, Vec3::Y);

        if landed || self.tweener.is_idle() {
            self.finished = true;
            log::debug!("Camera fly-in finished at {}", camera.transform.position);
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn node(&self) -> NodeHandle {
        self.node
    }

    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }
}
