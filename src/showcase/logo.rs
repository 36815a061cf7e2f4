use glam::Vec3;

use crate::animation::{Tween, Tweener};
use crate::scene::{NodeHandle, Scene};
use crate::showcase::config::LogoSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealStep {
    Risen,
    FadedIn,
}

/// Rise-and-fade entrance of the logo plane.
///
/// Position and rotation tunables are held back until both the rise and the
/// fade have finished; values set earlier are applied at that point.
pub struct LogoReveal {
    node: NodeHandle,
    position: Vec3,
    rotation: Vec3,
    tweener: Tweener<RevealStep>,
    risen: bool,
    faded_in: bool,
}

impl LogoReveal {
    pub fn start(scene: &mut Scene, node: NodeHandle, settings: &LogoSettings) -> Self {
        let position = settings.position.value;
        let rotation = settings.rotation.value;

        if let Some(logo) = scene.get_node_mut(node) {
            logo.transform.position = position - Vec3::Y * settings.drop;
            logo.transform.rotation = rotation;
        }
        if let Some(mesh) = scene.get_mesh_mut(node) {
            mesh.material.opacity = 0.0;
            mesh.material.transparent = true;
        }

        let mut tweener = Tweener::new();
        tweener.add(
            Tween::position(node, position)
                .delay(settings.delay)
                .duration(settings.rise_duration)
                .ease(settings.rise_easing)
                .snap()
                .on_complete(RevealStep::Risen),
        );
        tweener.add(
            Tween::opacity(node, 1.0)
                .delay(settings.delay)
                .duration(settings.fade_duration)
                .ease(settings.fade_easing)
                .snap()
                .on_complete(RevealStep::FadedIn),
        );

        Self {
            node,
            position,
            rotation,
            tweener,
            risen: false,
            faded_in: false,
        }
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        if self.is_revealed() {
            return;
        }
        for step in self.tweener.update(dt, scene) {
            match step {
                RevealStep::Risen => self.risen = true,
                RevealStep::FadedIn => self.faded_in = true,
            }
        }
        if self.is_revealed() {
            log::debug!("Logo revealed");
            self.apply_pose(scene);
        }
    }

    /// Whether the entrance is over and tunables write through.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.risen && self.faded_in
    }

    pub fn set_position(&mut self, position: Vec3, scene: &mut Scene) -> bool {
        self.position = position;
        self.is_revealed() && self.apply_pose(scene)
    }

    pub fn set_rotation(&mut self, rotation: Vec3, scene: &mut Scene) -> bool {
        self.rotation = rotation;
        self.is_revealed() && self.apply_pose(scene)
    }

    fn apply_pose(&self, scene: &mut Scene) -> bool {
        match scene.get_node_mut(self.node) {
            Some(logo) => {
                logo.transform.position = self.position;
                logo.transform.rotation = self.rotation;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn node(&self) -> NodeHandle {
        self.node
    }
}
