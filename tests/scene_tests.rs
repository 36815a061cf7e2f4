//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: create/remove nodes, attach/detach hierarchy
//! - Component management: mesh (leaf predicate), camera, light
//! - Node query: names, subtree collection order
//! - World matrices and on-demand world positions
//! - Prefab validation, JSON loading and instantiation

use std::f32::consts::FRAC_PI_2;

use glam::{Affine3A, Vec3};

use apex::errors::ApexError;
use apex::scene::{Camera, Light, LightKind, Mesh, Node, Prefab, PrefabNode, Scene};

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

// ============================================================================
// Node Creation & Removal
// ============================================================================

#[test]
fn scene_create_node_with_name() {
    let mut scene = Scene::new();
    let handle = scene.create_node_with_name("TestNode");
    assert_eq!(scene.get_name(handle), Some("TestNode"));
    assert!(scene.root_nodes.contains(&handle));
}

#[test]
fn scene_add_to_missing_parent_falls_back_to_root() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    scene.remove_node(parent);

    let child = scene.add_to_parent(Node::new(), parent);
    assert!(scene.root_nodes.contains(&child));
    assert_eq!(scene.get_node(child).unwrap().parent(), None);
}

#[test]
fn scene_remove_node_removes_subtree_and_components() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.add_mesh_to_parent(Mesh::from_asset("a.glb", 0), parent);
    let grandchild = scene.add_mesh_to_parent(Mesh::from_asset("a.glb", 1), child);

    scene.remove_node(parent);

    assert!(scene.get_node(parent).is_none());
    assert!(scene.get_node(child).is_none());
    assert!(scene.get_node(grandchild).is_none());
    assert!(scene.meshes.is_empty());
    assert!(!scene.root_nodes.contains(&parent));
}

#[test]
fn scene_remove_camera_clears_active() {
    let mut scene = Scene::new();
    let camera = scene.add_camera(Camera::default());
    scene.active_camera = Some(camera);

    scene.remove_node(camera);
    assert_eq!(scene.active_camera, None);
    assert!(scene.cameras.is_empty());
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn attach_moves_between_parents() {
    let mut scene = Scene::new();
    let a = scene.create_node();
    let b = scene.create_node();
    let child = scene.create_node();

    scene.attach(child, a);
    assert_eq!(scene.get_node(a).unwrap().children(), &[child]);
    assert!(!scene.root_nodes.contains(&child));

    scene.attach(child, b);
    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[child]);
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(b));
}

#[test]
fn attach_rejects_cycles() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.create_node();
    scene.attach(child, parent);

    scene.attach(parent, child);
    assert_eq!(scene.get_node(parent).unwrap().parent(), None);

    scene.attach(parent, parent);
    assert_eq!(scene.get_node(parent).unwrap().parent(), None);
}

#[test]
fn detach_makes_root() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.create_node();
    scene.attach(child, parent);

    scene.detach(child);
    assert!(scene.root_nodes.contains(&child));
    assert!(scene.get_node(parent).unwrap().children().is_empty());
}

#[test]
fn collect_subtree_is_depth_first_in_insertion_order() {
    let mut scene = Scene::new();
    let root = scene.create_node();
    let a = scene.add_to_parent(Node::new(), root);
    let a1 = scene.add_to_parent(Node::new(), a);
    let b = scene.add_to_parent(Node::new(), root);
    let a2 = scene.add_to_parent(Node::new(), a);

    assert_eq!(scene.collect_subtree(root), vec![root, a, a1, a2, b]);
}

#[test]
fn find_by_name_searches_all_roots() {
    let mut scene = Scene::new();
    let first = scene.create_node_with_name("First");
    let second = scene.create_node_with_name("Second");
    let nested = scene.add_to_parent(Node::new(), second);
    scene.set_name(nested, "Nested");

    assert_eq!(scene.find_node_by_name("First"), Some(first));
    assert_eq!(scene.find_node_by_name("Nested"), Some(nested));
    assert_eq!(scene.find_in_subtree(first, "Nested"), None);
    assert_eq!(scene.find_node_by_name("Missing"), None);
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn mesh_marks_leaf() {
    let mut scene = Scene::new();
    let group = scene.create_node();
    let leaf = scene.add_mesh_to_parent(Mesh::from_asset("model.glb", 3), group);

    assert!(!scene.is_mesh(group));
    assert!(scene.is_mesh(leaf));
}

#[test]
fn set_mesh_replaces_previous() {
    let mut scene = Scene::new();
    let node = scene.add_mesh(Mesh::from_asset("a.glb", 0));
    scene.set_mesh(node, Mesh::from_asset("b.glb", 0));

    assert_eq!(scene.meshes.len(), 1);
    assert_eq!(scene.get_mesh(node), Some(&Mesh::from_asset("b.glb", 0)));
}

#[test]
fn lights_are_listed() {
    let mut scene = Scene::new();
    scene.add_light(Light::new_ambient(Vec3::ONE, 0.5), Vec3::ZERO);
    let sun = scene.add_light(Light::new_directional(Vec3::ONE, 1.5), Vec3::new(10.0, 10.0, 5.0));

    let lights: Vec<_> = scene.iter_lights().collect();
    assert_eq!(lights.len(), 2);
    assert!(lights.iter().any(|(n, l)| *n == sun && l.kind == LightKind::Directional));
    assert_eq!(scene.get_node(sun).unwrap().transform.position, Vec3::new(10.0, 10.0, 5.0));
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn world_matrix_composes_parent_scale() {
    let mut scene = Scene::new();
    let mut group = Node::at(Vec3::new(10.0, 0.0, 0.0));
    group.transform.scale = Vec3::splat(25.0);
    let group = scene.add_node(group);
    let child = scene.add_to_parent(Node::at(Vec3::new(1.0, 2.0, 0.0)), group);

    scene.update_matrix_world();
    let world = scene.get_node(child).unwrap().world_matrix().translation;
    assert!(vec3_approx(world.into(), Vec3::new(35.0, 50.0, 0.0)));
}

#[test]
fn world_position_does_not_lag() {
    let mut scene = Scene::new();
    let mut group = Node::new();
    group.transform.rotation = Vec3::new(0.0, FRAC_PI_2, 0.0);
    let group = scene.add_node(group);
    let child = scene.add_to_parent(Node::at(Vec3::X), group);

    // No update_matrix_world call.
    let world = scene.world_position(child).unwrap();
    assert!(vec3_approx(world, Vec3::new(0.0, 0.0, -1.0)));
    assert_eq!(*scene.get_node(child).unwrap().world_matrix(), Affine3A::IDENTITY);
}

#[test]
fn camera_view_follows_node() {
    let mut scene = Scene::new();
    let camera = scene.add_camera(Camera::new_perspective(70.0, 1.0, 0.1, 100.0));
    scene.get_node_mut(camera).unwrap().transform.position = Vec3::new(0.0, 0.0, 10.0);

    scene.update_matrix_world();
    let view = scene.get_camera(camera).unwrap().view_matrix();
    let origin_in_view = view.transform_point3(Vec3::ZERO);
    assert!(vec3_approx(origin_in_view, Vec3::new(0.0, 0.0, -10.0)));
}

#[test]
fn look_at_points_negative_z_at_target() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::at(Vec3::new(66.3704, 27.2324, -42.5657)));
    let transform = &mut scene.get_node_mut(node).unwrap().transform;
    transform.look_at(Vec3::ZERO, Vec3::Y);

    let forward = transform.quaternion() * Vec3::NEG_Z;
    let expected = (Vec3::ZERO - transform.position).normalize();
    assert!(vec3_approx(forward, expected));
}

// ============================================================================
// Prefabs
// ============================================================================

fn two_part_prefab() -> Prefab {
    let mut prefab = Prefab::new();
    let root = prefab.push_root(PrefabNode::named("Scene"));
    let part = prefab.push_child(root, PrefabNode::named("Part1")).unwrap();
    prefab
        .push_child(part, PrefabNode::named("Leaf").with_mesh(Mesh::from_asset("m.glb", 0)))
        .unwrap();
    prefab.push_child(root, PrefabNode::named("Part2").with_position(Vec3::Y)).unwrap();
    prefab
}

#[test]
fn prefab_instantiate_builds_named_tree() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let roots = scene.instantiate(&two_part_prefab(), Some(parent)).unwrap();

    assert_eq!(roots.len(), 1);
    assert_eq!(scene.get_node(roots[0]).unwrap().parent(), Some(parent));

    let part1 = scene.find_in_subtree(parent, "Part1").unwrap();
    let part2 = scene.find_in_subtree(parent, "Part2").unwrap();
    let leaf = scene.find_in_subtree(part1, "Leaf").unwrap();
    assert!(scene.is_mesh(leaf));
    assert_eq!(scene.get_node(part2).unwrap().transform.position, Vec3::Y);
    assert_eq!(scene.get_node(roots[0]).unwrap().children(), &[part1, part2]);
}

#[test]
fn prefab_push_child_rejects_bad_parent() {
    let mut prefab = Prefab::new();
    let err = prefab.push_child(3, PrefabNode::new()).unwrap_err();
    assert!(matches!(err, ApexError::PrefabIndexOutOfBounds { index: 3, .. }));
}

#[test]
fn prefab_validate_rejects_shared_child() {
    let mut prefab = Prefab::new();
    let a = prefab.push_root(PrefabNode::new());
    let b = prefab.push_child(a, PrefabNode::new()).unwrap();
    prefab.nodes[b].children.push(a);

    assert!(matches!(prefab.validate(), Err(ApexError::PrefabCycle(_))));

    let mut scene = Scene::new();
    assert!(scene.instantiate(&prefab, None).is_err());
    assert!(scene.nodes.is_empty());
}

#[test]
fn prefab_from_json() {
    let json = r#"{
        "nodes": [
            { "name": "Part3", "position": [1.0, 2.0, 3.0], "children": [1] },
            { "name": "Leaf", "mesh": { "geometry": { "type": "asset", "uri": "p.glb", "primitive": 2 } } }
        ],
        "roots": [0]
    }"#;
    let prefab = Prefab::from_json_str(json).unwrap();
    assert_eq!(prefab.nodes[0].position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(prefab.nodes[1].scale, Vec3::ONE);
    assert_eq!(prefab.nodes[1].mesh.as_ref().unwrap().material.opacity, 1.0);

    let bad = r#"{ "nodes": [ { "children": [5] } ], "roots": [0] }"#;
    assert!(matches!(
        Prefab::from_json_str(bad),
        Err(ApexError::PrefabIndexOutOfBounds { index: 5, .. })
    ));
}
