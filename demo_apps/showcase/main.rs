//! Showcase Runner
//! Drives the pyramid showcase headlessly at a fixed 60 Hz step.
//!
//! Sequence:
//! 1. Camera fly-in, part fly-ins and logo reveal
//! 2. Baseline capture once every part settles
//! 3. Simulated pointer sweep across a few leaves (float + ripple)
//! 4. A live knob edit on one part
//!
//! Usage: `showcase [config.json] [model.json]`

use apex::scene::{Mesh, PrefabNode};
use apex::{NodeHandle, Prefab, Showcase, ShowcaseConfig};
use glam::Vec3;

const FRAME: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ShowcaseConfig::load(path)?,
        None => ShowcaseConfig::default(),
    };
    let model = match args.next() {
        Some(path) => Prefab::load(path)?,
        None => pyramid_model()?,
    };
    let terrain = terrain_model();

    let mut showcase = Showcase::new(config, &model, Some(&terrain))?;

    // 1. Entrance
    let mut frames = 0;
    while !showcase.is_interactive() && frames < 600 {
        showcase.update(FRAME);
        frames += 1;
    }
    log::info!("Interactive after {:.2}s", frames as f32 * FRAME);

    // 2. Pointer sweep
    let leaves: Vec<NodeHandle> = showcase
        .parts()
        .flat_map(|part| part.baseline().leaves().iter().map(|leaf| leaf.node))
        .collect();

    for &leaf in leaves.iter().take(3) {
        showcase.pointer(Some(leaf));
        run(&mut showcase, 0.4);
    }
    showcase.pointer(None);
    run(&mut showcase, 1.0);

    if let Some(&leaf) = leaves.first() {
        let rest = showcase.parts().find_map(|p| p.baseline().get(leaf).map(|b| b.position));
        let now = showcase.scene().get_node(leaf).map(|n| n.transform.position);
        log::info!("First leaf back at rest: {}", rest.is_some() && rest == now);
    }

    // 3. Live tuning
    showcase.controls_mut().set_vec3("Part 1 Position", Vec3::new(1.5, 1.0, -0.07))?;
    run(&mut showcase, FRAME);
    if let Some(part) = showcase.part("Part2") {
        log::info!("Part2 rest position now {}", part.rest_position());
    }
    println!("{}", showcase.controls().preset_to_json()?);

    showcase.dispose();
    Ok(())
}

fn run(showcase: &mut Showcase, seconds: f32) {
    let steps = (seconds / FRAME).round().max(1.0) as u32;
    for _ in 0..steps {
        showcase.update(FRAME);
    }
}

/// Three parts, each a small cluster of leaf meshes.
fn pyramid_model() -> apex::Result<Prefab> {
    let mut prefab = Prefab::new();
    let root = prefab.push_root(PrefabNode::named("Scene"));

    let layouts: [(&str, &[Vec3]); 3] = [
        ("Part1", &[Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.3, 0.1, 0.0), Vec3::new(-0.3, 0.1, 0.0)]),
        (
            "Part2",
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.2, -0.2, 0.1),
                Vec3::new(-0.2, -0.2, 0.1),
                Vec3::new(0.0, -0.4, 0.2),
            ],
        ),
        ("Part3", &[Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.25, 0.0, 0.25)]),
    ];

    let mut primitive = 0;
    for (name, offsets) in layouts {
        let part = prefab.push_child(root, PrefabNode::named(name))?;
        for (i, &offset) in offsets.iter().enumerate() {
            let leaf = PrefabNode::named(format!("{name}_{i}"))
                .with_position(offset)
                .with_mesh(Mesh::from_asset("Pyramid.glb", primitive));
            prefab.push_child(part, leaf)?;
            primitive += 1;
        }
    }
    Ok(prefab)
}

fn terrain_model() -> Prefab {
    let mut prefab = Prefab::new();
    prefab.push_root(PrefabNode::named("Terrain").with_mesh(Mesh::from_asset("Terrain.glb", 0)));
    prefab
}
