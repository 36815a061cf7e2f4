use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::controls::ControlPanel;
use crate::errors::Result;
use crate::interaction::{OwnerId, PointerHub};
use crate::part::{PartConfig, PartController, Phase};
use crate::scene::{Camera, Geometry, Light, LightKind, Material, Mesh, Node, NodeHandle, Prefab, Scene};
use crate::showcase::camera_rig::CameraFlyIn;
use crate::showcase::config::{LightSettings, ShowcaseConfig};
use crate::showcase::logo::LogoReveal;

struct PartSlotState {
    group: String,
    scale_group: Option<String>,
    controller: PartController<StdRng>,
}

/// The assembled showcase: scene, tunables, pointer routing and every
/// animation driver.
///
/// The host owns the clock and the picking. Each frame it calls
/// [`pointer`](Showcase::pointer) with the nearest node under the cursor
/// (if any) and then [`update`](Showcase::update) with the frame delta.
pub struct Showcase {
    scene: Scene,
    controls: ControlPanel,
    hub: PointerHub,
    config: ShowcaseConfig,

    camera: NodeHandle,
    camera_rig: CameraFlyIn,
    assembly: NodeHandle,
    terrain: Option<NodeHandle>,
    logo: LogoReveal,
    parts: Vec<PartSlotState>,

    disposed: bool,
}

impl Showcase {
    /// Builds the scene around `model` (the parts) and an optional
    /// `terrain` backdrop, registers the control groups and starts every
    /// entrance animation.
    ///
    /// Parts named in the config but missing from `model` are skipped with a
    /// warning. Fails only on an invalid prefab or an unusable knob range.
    pub fn new(config: ShowcaseConfig, model: &Prefab, terrain: Option<&Prefab>) -> Result<Self> {
        let mut scene = Scene::new();
        let mut controls = ControlPanel::new();

        for light in &config.lights {
            add_light(&mut scene, light);
        }

        // ==== Camera ====
        let cam = &config.camera;
        let camera = scene.add_camera(Camera::new_perspective(cam.fov_degrees, 16.0 / 9.0, cam.near, cam.far));
        scene.active_camera = Some(camera);
        let camera_rig = CameraFlyIn::start(&mut scene, camera, cam);

        // ==== Terrain ====
        let terrain = match terrain {
            Some(prefab) => {
                let settings = &config.terrain;
                for light in &settings.lights {
                    add_light(&mut scene, light);
                }
                let mut node = Node::at(settings.position.value);
                node.transform.scale = Vec3::splat(settings.scale);
                let root = scene.add_node(node);
                scene.set_name(root, "Terrain");
                scene.instantiate(prefab, Some(root))?;
                controls.add_group(settings.position.to_group()?)?;
                Some(root)
            }
            None => None,
        };

        // ==== Assembly ====
        let settings = &config.assembly;
        let mut node = Node::at(settings.position.value);
        node.transform.rotation = settings.rotation.value;
        node.transform.scale = Vec3::splat(settings.scale);
        let assembly = scene.add_node(node);
        scene.set_name(assembly, "Assembly");
        controls.add_group(settings.position.to_group()?)?;
        controls.add_group(settings.rotation.to_group()?)?;

        let model_roots = scene.instantiate(model, None)?;
        let mut parts = Vec::with_capacity(config.parts.len());
        let mut part_nodes = Vec::with_capacity(config.parts.len());
        for (i, slot) in config.parts.iter().enumerate() {
            let found = model_roots
                .iter()
                .find_map(|&root| scene.find_in_subtree(root, &slot.node));
            let Some(handle) = found else {
                log::warn!("Part '{}' not found in model, skipping", slot.node);
                continue;
            };
            scene.attach(handle, assembly);
            part_nodes.push(handle);
            controls.add_group(slot.position.to_group()?)?;

            let model_scale = scene.get_node(handle).map_or(Vec3::ONE, |n| n.transform.scale);
            let scale = slot.scale.unwrap_or(model_scale);
            if let Some(tunable) = slot.scale_tunable(scale) {
                controls.add_group(tunable.to_group()?)?;
            }
            let part_config = PartConfig {
                name: slot.node.clone(),
                rest_position: slot.position.value,
                scale,
                entry: config.entry,
                hover: config.hover,
            };
            let rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            let mut controller = PartController::new(OwnerId(i as u32), handle, part_config, rng);
            controller.mount(&mut scene);

            parts.push(PartSlotState {
                group: slot.position.group.clone(),
                scale_group: slot.scale_group.clone(),
                controller,
            });
        }
        // Whatever the model holds besides the parts is not shown.
        for root in model_roots {
            if !part_nodes.contains(&root) {
                scene.remove_node(root);
            }
        }

        // ==== Logo ====
        let settings = &config.logo;
        let material = Material {
            texture: Some(settings.texture.clone()),
            transparent: true,
            ..Material::default()
        };
        let logo_node = scene.add_mesh(Mesh::new(
            Geometry::Plane {
                width: settings.width,
                height: settings.height,
            },
            material,
        ));
        scene.set_name(logo_node, "Logo");
        if let Some(node) = scene.get_node_mut(logo_node) {
            node.transform.scale = settings.scale;
        }
        let logo = LogoReveal::start(&mut scene, logo_node, settings);
        controls.add_group(settings.position.to_group()?)?;
        controls.add_group(settings.rotation.to_group()?)?;

        scene.update_matrix_world();
        log::info!(
            "Showcase ready: {} part(s), {} control group(s)",
            parts.len(),
            controls.groups().count()
        );

        Ok(Self {
            scene,
            controls,
            hub: PointerHub::new(),
            config,
            camera,
            camera_rig,
            assembly,
            terrain,
            logo,
            parts,
            disposed: false,
        })
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Advances everything by `dt` seconds: control changes first, then the
    /// camera, the logo and every part, then world matrices.
    pub fn update(&mut self, dt: f32) {
        if self.disposed {
            return;
        }
        self.apply_control_changes();

        self.camera_rig.update(dt, &mut self.scene);
        self.logo.update(dt, &mut self.scene);
        for part in &mut self.parts {
            part.controller.update(dt, &mut self.scene, &mut self.hub);
        }

        self.scene.update_matrix_world();
    }

    /// Feeds the node currently under the pointer (nearest hit only) and
    /// routes the resulting enter/leave events to the owning part.
    pub fn pointer(&mut self, hit: Option<NodeHandle>) {
        if self.disposed {
            return;
        }
        for event in self.hub.update_hover(hit) {
            if let Some(part) = self
                .parts
                .iter_mut()
                .find(|p| p.controller.owner() == event.owner)
            {
                part.controller.handle_pointer(event);
            }
        }
    }

    fn apply_control_changes(&mut self) {
        for group in self.controls.take_changes() {
            let Some(value) = self.controls.vec3(&group) else {
                continue;
            };

            if group == self.config.assembly.position.group {
                set_position(&mut self.scene, self.assembly, value);
            } else if group == self.config.assembly.rotation.group {
                if let Some(node) = self.scene.get_node_mut(self.assembly) {
                    node.transform.rotation = value;
                }
            } else if group == self.config.terrain.position.group {
                if let Some(terrain) = self.terrain {
                    set_position(&mut self.scene, terrain, value);
                }
            } else if group == self.config.logo.position.group {
                self.logo.set_position(value, &mut self.scene);
            } else if group == self.config.logo.rotation.group {
                self.logo.set_rotation(value, &mut self.scene);
            } else if let Some(part) = self.parts.iter_mut().find(|p| p.group == group) {
                part.controller.set_rest_position(value, &mut self.scene);
            } else if let Some(part) = self
                .parts
                .iter_mut()
                .find(|p| p.scale_group.as_deref() == Some(group.as_str()))
            {
                part.controller.set_scale(value, &mut self.scene);
            } else {
                log::debug!("No target for control group '{group}'");
            }
        }
    }

    /// Cancels every part animation and releases all pointer subscriptions.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for part in &mut self.parts {
            part.controller.dispose(&mut self.hub);
        }
        self.disposed = true;
        log::info!("Showcase disposed");
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    /// Knob edits made here are applied on the next [`update`](Self::update).
    pub fn controls_mut(&mut self) -> &mut ControlPanel {
        &mut self.controls
    }

    #[must_use]
    pub fn hub(&self) -> &PointerHub {
        &self.hub
    }

    #[must_use]
    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    #[must_use]
    pub fn camera(&self) -> NodeHandle {
        self.camera
    }

    #[must_use]
    pub fn camera_rig(&self) -> &CameraFlyIn {
        &self.camera_rig
    }

    #[must_use]
    pub fn assembly(&self) -> NodeHandle {
        self.assembly
    }

    #[must_use]
    pub fn terrain(&self) -> Option<NodeHandle> {
        self.terrain
    }

    #[must_use]
    pub fn logo(&self) -> &LogoReveal {
        &self.logo
    }

    pub fn parts(&self) -> impl Iterator<Item = &PartController<StdRng>> {
        self.parts.iter().map(|p| &p.controller)
    }

    #[must_use]
    pub fn part(&self, name: &str) -> Option<&PartController<StdRng>> {
        self.parts().find(|c| c.name() == name)
    }

    /// Whether every part accepts hover.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.parts().all(|c| c.phase() == Phase::Interactive)
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

fn add_light(scene: &mut Scene, settings: &LightSettings) -> NodeHandle {
    let light = match settings.kind {
        LightKind::Ambient => Light::new_ambient(Vec3::ONE, settings.intensity),
        LightKind::Directional => Light::new_directional(Vec3::ONE, settings.intensity),
    };
    scene.add_light(light, settings.position)
}

fn set_position(scene: &mut Scene, node: NodeHandle, position: Vec3) {
    if let Some(n) = scene.get_node_mut(node) {
        n.transform.position = position;
    }
}
