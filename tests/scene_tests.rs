//! Scene graph integration tests
//!
//! Tests for:
//! - World-transform resolution over chains and shared subtrees
//! - Animated nodes resampling their local transform per update
//! - Draw traversal: model uniforms, draw order, frame uniform passthrough
//! - Cycle detection via the traversal depth guard

use std::cell::RefCell;
use std::rc::Rc;

use armature::draw::{Drawable, Frame, UniformSet, UniformValue};
use armature::errors::ArmatureError;
use armature::scene::{Node, Scene};
use armature::transform::{rotate, scale_uniform, translate};
use armature::TransformTrack;
use glam::{Mat4, Quat, Vec3};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn mat4_approx(a: Mat4, b: Mat4) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| (x - y).abs() < 1e-4)
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Recording Drawable
// ============================================================================

type DrawLog = Rc<RefCell<Vec<(&'static str, UniformSet)>>>;

/// Test double for the external GPU-submitting leaf: records every draw call.
#[derive(Clone)]
struct Recorder {
    label: &'static str,
    log: DrawLog,
}

impl Recorder {
    fn new(label: &'static str, log: &DrawLog) -> Box<Self> {
        Box::new(Self {
            label,
            log: Rc::clone(log),
        })
    }
}

impl Drawable for Recorder {
    fn draw(&mut self, uniforms: &UniformSet) {
        self.log.borrow_mut().push((self.label, uniforms.clone()));
    }
}

// ============================================================================
// World-Transform Resolution
// ============================================================================

#[test]
fn chain_composes_left_to_right() {
    let mut scene = Scene::new();
    let m_root = translate(Vec3::new(1.0, 0.0, 0.0));
    let m_a = rotate(Vec3::Y, 90.0);
    let m_b = scale_uniform(2.0);

    let root = scene.insert_node(Node::with_local(m_root));
    let a = scene.insert_node(Node::with_local(m_a));
    let b = scene.insert_node(Node::with_local(m_b));
    scene.add_root_node(root);
    scene.attach(root, a);
    scene.attach(a, b);

    scene.update(0.0).unwrap();

    let expected = m_root * m_a * m_b;
    let world = scene.world_transform(b).unwrap();
    assert!(
        mat4_approx(Mat4::from(world), Mat4::from(expected)),
        "world(b) must be M_root * M_a * M_b"
    );
}

#[test]
fn translation_chain_accumulates() {
    let mut scene = Scene::new();
    let parent = scene.insert_node(Node::with_local(translate(Vec3::new(1.0, 0.0, 0.0))));
    let leaf = scene.insert_node(Node::with_local(translate(Vec3::new(0.0, 2.0, 0.0))));
    scene.add_root_node(parent);
    scene.attach(parent, leaf);

    scene.update(0.0).unwrap();

    let world = scene.world_transform(leaf).unwrap();
    assert!(vec3_approx(
        world.translation.into(),
        Vec3::new(1.0, 2.0, 0.0)
    ));
}

#[test]
fn multiple_roots_resolve_independently() {
    let mut scene = Scene::new();
    let a = scene.insert_node(Node::with_local(translate(Vec3::X)));
    let b = scene.insert_node(Node::with_local(translate(Vec3::Y)));
    scene.add_root_node(a);
    scene.add_root_node(b);

    scene.update(0.0).unwrap();

    assert!(vec3_approx(
        scene.world_transform(a).unwrap().translation.into(),
        Vec3::X
    ));
    assert!(vec3_approx(
        scene.world_transform(b).unwrap().translation.into(),
        Vec3::Y
    ));
}

#[test]
fn sibling_transforms_do_not_interact() {
    let mut scene = Scene::new();
    let root = scene.insert_node(Node::new());
    let a = scene.insert_node(Node::with_local(translate(Vec3::new(5.0, 0.0, 0.0))));
    let b = scene.insert_node(Node::with_local(translate(Vec3::new(0.0, 7.0, 0.0))));
    scene.add_root_node(root);
    scene.attach(root, a);
    scene.attach(root, b);

    scene.update(0.0).unwrap();

    assert!(vec3_approx(
        scene.world_transform(b).unwrap().translation.into(),
        Vec3::new(0.0, 7.0, 0.0)
    ));
}

#[test]
fn shared_subtree_resolves_under_last_parent() {
    // Diamond: two parents share one child node. Legal; the read-back keeps
    // the most recent resolution (the later sibling wins).
    let mut scene = Scene::new();
    let root = scene.insert_node(Node::new());
    let left = scene.insert_node(Node::with_local(translate(Vec3::X)));
    let right = scene.insert_node(Node::with_local(translate(Vec3::Y)));
    let shared = scene.insert_node(Node::with_local(translate(Vec3::Z)));
    scene.add_root_node(root);
    scene.attach(root, left);
    scene.attach(root, right);
    scene.attach(left, shared);
    scene.attach(right, shared);

    scene.update(0.0).unwrap();

    let world = scene.world_transform(shared).unwrap();
    assert!(vec3_approx(
        world.translation.into(),
        Vec3::new(0.0, 1.0, 1.0)
    ));
}

// ============================================================================
// Animated Nodes
// ============================================================================

fn sliding_track() -> TransformTrack {
    TransformTrack::new(
        [(0.0, Vec3::ZERO), (2.0, Vec3::new(4.0, 0.0, 0.0))],
        [(0.0, Quat::IDENTITY)],
        [(0.0, Vec3::ONE)],
    )
    .unwrap()
}

#[test]
fn animated_node_resamples_local_each_update() {
    let mut scene = Scene::new();
    let node = scene.insert_node(Node::animated(sliding_track()));
    scene.add_root_node(node);

    scene.update(1.0).unwrap();
    let local = scene.node(node).unwrap().local;
    assert!(vec3_approx(
        local.translation.into(),
        Vec3::new(2.0, 0.0, 0.0)
    ));

    // Time moves on, the derived local follows (and loops past 2s)
    scene.update(3.0).unwrap();
    let local = scene.node(node).unwrap().local;
    assert!(vec3_approx(
        local.translation.into(),
        Vec3::new(2.0, 0.0, 0.0)
    ));

    scene.update(0.5).unwrap();
    let local = scene.node(node).unwrap().local;
    assert!(vec3_approx(
        local.translation.into(),
        Vec3::new(1.0, 0.0, 0.0)
    ));
}

#[test]
fn animated_node_composes_with_parent() {
    let mut scene = Scene::new();
    let parent = scene.insert_node(Node::with_local(translate(Vec3::new(0.0, 1.0, 0.0))));
    let animated = scene.insert_node(Node::animated(sliding_track()));
    scene.add_root_node(parent);
    scene.attach(parent, animated);

    scene.update(1.0).unwrap();

    let world = scene.world_transform(animated).unwrap();
    assert!(vec3_approx(
        world.translation.into(),
        Vec3::new(2.0, 1.0, 0.0)
    ));
}

// ============================================================================
// Draw Traversal
// ============================================================================

#[test]
fn leaf_receives_parent_world_as_model() {
    let log: DrawLog = Rc::new(RefCell::new(Vec::new()));
    let mut scene = Scene::new();

    let parent = scene.insert_node(Node::with_local(translate(Vec3::new(1.0, 2.0, 0.0))));
    let mesh = scene.insert_drawable(Recorder::new("mesh", &log));
    scene.add_root_node(parent);
    scene.attach_drawable(parent, mesh);

    scene.update(0.0).unwrap();
    scene
        .draw(&Frame::new(Mat4::IDENTITY, Mat4::IDENTITY))
        .unwrap();

    let calls = log.borrow();
    assert_eq!(calls.len(), 1);
    let model = calls[0].1.model;
    assert!(mat4_approx(
        model,
        Mat4::from(translate(Vec3::new(1.0, 2.0, 0.0)))
    ));
}

#[test]
fn root_leaf_draws_with_identity_model() {
    let log: DrawLog = Rc::new(RefCell::new(Vec::new()));
    let mut scene = Scene::new();
    let mesh = scene.insert_drawable(Recorder::new("mesh", &log));
    scene.add_root_drawable(mesh);

    scene.update(0.0).unwrap();
    scene
        .draw(&Frame::new(Mat4::IDENTITY, Mat4::IDENTITY))
        .unwrap();

    let calls = log.borrow();
    assert_eq!(calls.len(), 1);
    assert!(mat4_approx(calls[0].1.model, Mat4::IDENTITY));
}

#[test]
fn draw_order_is_insertion_order() {
    let log: DrawLog = Rc::new(RefCell::new(Vec::new()));
    let mut scene = Scene::new();

    let root = scene.insert_node(Node::new());
    let inner = scene.insert_node(Node::new());
    let first = scene.insert_drawable(Recorder::new("first", &log));
    let nested = scene.insert_drawable(Recorder::new("nested", &log));
    let last = scene.insert_drawable(Recorder::new("last", &log));

    scene.add_root_node(root);
    scene.attach_drawable(root, first);
    scene.attach(root, inner);
    scene.attach_drawable(inner, nested);
    scene.attach_drawable(root, last);

    scene.update(0.0).unwrap();
    scene
        .draw(&Frame::new(Mat4::IDENTITY, Mat4::IDENTITY))
        .unwrap();

    let order: Vec<&str> = log.borrow().iter().map(|(label, _)| *label).collect();
    assert_eq!(order, vec!["first", "nested", "last"]);
}

#[test]
fn frame_uniforms_reach_every_leaf() {
    let log: DrawLog = Rc::new(RefCell::new(Vec::new()));
    let mut scene = Scene::new();
    let mesh = scene.insert_drawable(Recorder::new("mesh", &log));
    scene.add_root_drawable(mesh);

    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
    let projection = Mat4::perspective_rh(1.0, 16.0 / 9.0, 0.1, 100.0);
    let frame = Frame::new(view, projection)
        .with_uniform("light_dir", Vec3::new(0.0, -1.0, 0.0))
        .with_uniform("global_color", Vec3::ONE);

    scene.update(0.0).unwrap();
    scene.draw(&frame).unwrap();

    let calls = log.borrow();
    let uniforms = &calls[0].1;
    assert!(mat4_approx(uniforms.view, view));
    assert!(mat4_approx(uniforms.projection, projection));
    assert_eq!(
        uniforms.get("light_dir"),
        Some(&UniformValue::Vec3(Vec3::new(0.0, -1.0, 0.0)))
    );
    assert_eq!(
        uniforms.get("global_color"),
        Some(&UniformValue::Vec3(Vec3::ONE))
    );
}

#[test]
fn shared_drawable_draws_once_per_reference() {
    let log: DrawLog = Rc::new(RefCell::new(Vec::new()));
    let mut scene = Scene::new();

    let left = scene.insert_node(Node::with_local(translate(Vec3::X)));
    let right = scene.insert_node(Node::with_local(translate(Vec3::Y)));
    let mesh = scene.insert_drawable(Recorder::new("mesh", &log));
    scene.add_root_node(left);
    scene.add_root_node(right);
    scene.attach_drawable(left, mesh);
    scene.attach_drawable(right, mesh);

    scene.update(0.0).unwrap();
    scene
        .draw(&Frame::new(Mat4::IDENTITY, Mat4::IDENTITY))
        .unwrap();

    let calls = log.borrow();
    assert_eq!(calls.len(), 2, "one draw per reference");
    assert!(mat4_approx(calls[0].1.model, Mat4::from(translate(Vec3::X))));
    assert!(mat4_approx(calls[1].1.model, Mat4::from(translate(Vec3::Y))));
}

// ============================================================================
// Cycle Detection
// ============================================================================

#[test]
fn cyclic_graph_fails_update_instead_of_hanging() {
    init_logs();
    let mut scene = Scene::new();
    let a = scene.insert_node(Node::new());
    let b = scene.insert_node(Node::new());
    scene.add_root_node(a);
    scene.attach(a, b);
    scene.attach(b, a);

    let result = scene.update(0.0);
    assert!(
        matches!(result, Err(ArmatureError::GraphCycle { .. })),
        "got {result:?}"
    );
}

#[test]
fn self_attach_is_refused() {
    init_logs();
    let mut scene = Scene::new();
    let a = scene.insert_node(Node::new());
    scene.add_root_node(a);
    scene.attach(a, a);

    assert!(scene.node(a).unwrap().children().is_empty());
    assert!(scene.update(0.0).is_ok());
}

#[test]
fn deep_but_acyclic_chain_is_fine() {
    let mut scene = Scene::new();
    let mut prev = scene.insert_node(Node::with_local(translate(Vec3::X)));
    scene.add_root_node(prev);
    for _ in 1..200 {
        let next = scene.insert_node(Node::with_local(translate(Vec3::X)));
        scene.attach(prev, next);
        prev = next;
    }

    scene.update(0.0).unwrap();
    let world = scene.world_transform(prev).unwrap();
    assert!(approx(world.translation.x, 200.0));
}
