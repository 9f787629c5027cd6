//! Ghost Trail Tests
//!
//! Tests for:
//! - Opacity fade and render order per ghost slot
//! - PoseHistory ordering, eviction and capacity bound
//! - PoseSampler spacing, pause freeze and missing target handling
//! - GhostTrail binding, restart and config validation

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

use afterimage::errors::AfterimageError;
use afterimage::scene::Transform;
use afterimage::trail::config::MIN_SPACING_SECS;
use afterimage::trail::{
    GhostDelay, GhostTrail, JointPose, PoseHistory, PoseSampler, PoseSnapshot, TrailConfig, TrailMode,
    VisualBackend, ghost_opacities, ghost_opacity,
};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Records everything the trail does to its visuals.
#[derive(Default)]
struct RecordingBackend {
    poses: FxHashMap<u32, PoseSnapshot>,
    visible: FxHashMap<u32, bool>,
    order: FxHashMap<u32, i32>,
    opacity: FxHashMap<u32, f32>,
}

impl RecordingBackend {
    fn place(&mut self, handle: u32, x: f32) {
        self.poses.insert(handle, pose_at(x));
    }

    fn x_of(&self, handle: u32) -> Option<f32> {
        self.poses.get(&handle).map(PoseSnapshot::position).map(|p| p.x)
    }
}

impl VisualBackend for RecordingBackend {
    type Handle = u32;

    fn read_pose(&self, handle: u32) -> Option<PoseSnapshot> {
        self.poses.get(&handle).cloned()
    }

    fn apply_pose(&mut self, handle: u32, pose: &PoseSnapshot) {
        self.poses.insert(handle, pose.clone());
    }

    fn set_visible(&mut self, handle: u32, visible: bool) {
        self.visible.insert(handle, visible);
    }

    fn set_render_order(&mut self, handle: u32, order: i32) {
        self.order.insert(handle, order);
    }

    fn set_opacity(&mut self, handle: u32, opacity: f32) {
        self.opacity.insert(handle, opacity);
    }
}

fn pose_at(x: f32) -> PoseSnapshot {
    let root = Transform::from_trs(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE);
    let joint = JointPose {
        position: Vec3::new(0.0, x, 0.0),
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };
    PoseSnapshot::new(root, [joint])
}

const PRIMARY: u32 = 0;

fn ghost_handles(count: usize) -> Vec<u32> {
    (1..=count as u32).collect()
}

// ============================================================================
// Opacity & Render Order
// ============================================================================

#[test]
fn opacity_fades_linearly_from_max_to_min() {
    let expected = [0.25, 0.195, 0.14, 0.085, 0.03];
    let actual = ghost_opacities(5, 0.03, 0.25);

    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(approx(*a, e), "slot {i}: expected {e}, got {a}");
    }
}

#[test]
fn opacity_is_monotonic_non_increasing() {
    let opacities = ghost_opacities(8, 0.1, 0.9);
    for pair in opacities.windows(2) {
        assert!(pair[0] >= pair[1], "opacity increased: {pair:?}");
    }
}

#[test]
fn opacity_single_ghost_uses_max() {
    assert!(approx(ghost_opacity(0, 1, 0.03, 0.25), 0.25));
}

#[test]
fn render_order_puts_older_ghosts_first() {
    assert_eq!(GhostDelay::Samples(0).render_order(), -1);
    assert_eq!(GhostDelay::Samples(3).render_order(), -4);
    assert_eq!(GhostDelay::Seconds(0.12).render_order(), -12);
    assert_eq!(GhostDelay::Seconds(0.48).render_order(), -48);
}

// ============================================================================
// PoseHistory
// ============================================================================

#[test]
fn history_is_newest_first() {
    let mut history = PoseHistory::new(3);
    history.push(pose_at(1.0));
    history.push(pose_at(2.0));

    assert!(approx(history.newest().unwrap().position().x, 2.0));
    assert!(approx(history.oldest().unwrap().position().x, 1.0));
    assert!(approx(history.get(0).unwrap().position().x, 2.0));
}

#[test]
fn history_evicts_oldest_at_capacity() {
    let mut history = PoseHistory::new(3);
    for x in 1..=5 {
        history.push(pose_at(x as f32));
    }

    assert_eq!(history.len(), 3);
    let xs: Vec<f32> = history.iter().map(|p| p.position().x).collect();
    assert_eq!(xs, vec![5.0, 4.0, 3.0]);
}

#[test]
fn history_never_exceeds_capacity() {
    let mut history = PoseHistory::new(4);
    for x in 0..1000 {
        history.push(pose_at(x as f32));
        assert!(history.len() <= history.capacity());
    }
}

#[test]
fn history_clear_empties() {
    let mut history = PoseHistory::new(2);
    history.push(pose_at(1.0));
    history.clear();
    assert!(history.is_empty());
    assert!(history.newest().is_none());
}

// ============================================================================
// PoseSampler
// ============================================================================

#[test]
fn sampler_records_every_nth_frame() {
    let mut backend = RecordingBackend::default();
    backend.place(PRIMARY, 1.0);
    let mut sampler = PoseSampler::new(3);
    let mut history = PoseHistory::new(5);

    let fired: Vec<bool> = (0..6)
        .map(|_| sampler.tick(&backend, Some(PRIMARY), false, &mut history))
        .collect();

    assert_eq!(fired, vec![false, false, true, false, false, true]);
    assert_eq!(history.len(), 2);
}

#[test]
fn sampler_spacing_of_one_samples_every_frame() {
    let mut backend = RecordingBackend::default();
    backend.place(PRIMARY, 1.0);
    let mut sampler = PoseSampler::new(1);
    let mut history = PoseHistory::new(5);

    for _ in 0..4 {
        assert!(sampler.tick(&backend, Some(PRIMARY), false, &mut history));
    }
    assert_eq!(history.len(), 4);
}

#[test]
fn sampler_frozen_while_paused() {
    let mut backend = RecordingBackend::default();
    backend.place(PRIMARY, 1.0);
    let mut sampler = PoseSampler::new(2);
    let mut history = PoseHistory::new(5);

    sampler.tick(&backend, Some(PRIMARY), false, &mut history);
    assert_eq!(sampler.frame_count(), 1);

    for _ in 0..10 {
        assert!(!sampler.tick(&backend, Some(PRIMARY), true, &mut history));
    }
    assert_eq!(sampler.frame_count(), 1, "paused frames must not count");
    assert!(history.is_empty());

    // The first unpaused frame completes the interval that was interrupted
    assert!(sampler.tick(&backend, Some(PRIMARY), false, &mut history));
    assert_eq!(history.len(), 1);
}

#[test]
fn sampler_missing_target_is_a_no_op() {
    let backend = RecordingBackend::default();
    let mut sampler = PoseSampler::new(1);
    let mut history = PoseHistory::new(5);

    assert!(!sampler.tick(&backend, None, false, &mut history));
    assert_eq!(sampler.frame_count(), 0);
    assert!(history.is_empty());

    // A dangling handle counts the frame but records nothing
    assert!(!sampler.tick(&backend, Some(PRIMARY), false, &mut history));
    assert!(history.is_empty());
}

#[test]
fn sampler_zero_spacing_is_clamped() {
    assert_eq!(PoseSampler::new(0).spacing(), 1);
}

// ============================================================================
// GhostTrail
// ============================================================================

#[test]
fn trail_configures_slots_on_creation() {
    let mut backend = RecordingBackend::default();
    let config = TrailConfig::sampled(5, 3, 0.03, 0.25);
    let trail = GhostTrail::new(config, ghost_handles(5), &mut backend).unwrap();

    assert_eq!(trail.slots().len(), 5);
    assert_eq!(trail.history().capacity(), 5);
    for slot in trail.slots() {
        assert_eq!(backend.order[&slot.visual], -(slot.index as i32) - 1);
        assert!(approx(backend.opacity[&slot.visual], slot.opacity));
        assert!(!backend.visible[&slot.visual]);
        assert!(!slot.is_visible());
    }
}

#[test]
fn trail_rejects_wrong_visual_count() {
    let mut backend = RecordingBackend::default();
    let config = TrailConfig::sampled(4, 3, 0.03, 0.25);
    let result = GhostTrail::new(config, ghost_handles(3), &mut backend);
    assert!(matches!(result, Err(AfterimageError::InvalidConfig(_))));
}

#[test]
fn trail_binds_history_to_slots_and_hides_the_rest() {
    let mut backend = RecordingBackend::default();
    let config = TrailConfig::sampled(3, 1, 0.1, 0.5);
    let mut trail = GhostTrail::new(config, ghost_handles(3), &mut backend).unwrap();

    backend.place(PRIMARY, 1.0);
    assert!(trail.tick(&mut backend, Some(PRIMARY), false));
    backend.place(PRIMARY, 2.0);
    assert!(trail.tick(&mut backend, Some(PRIMARY), false));

    // Slot 0 shows the newest snapshot, slot 1 the one before
    assert_eq!(backend.x_of(1), Some(2.0));
    assert_eq!(backend.x_of(2), Some(1.0));
    assert!(backend.visible[&1]);
    assert!(backend.visible[&2]);
    assert!(!backend.visible[&3]);
    assert!(!trail.slots()[2].is_visible());
}

#[test]
fn trail_paused_keeps_ghosts_in_place() {
    let mut backend = RecordingBackend::default();
    let config = TrailConfig::sampled(2, 1, 0.1, 0.5);
    let mut trail = GhostTrail::new(config, ghost_handles(2), &mut backend).unwrap();

    backend.place(PRIMARY, 1.0);
    trail.tick(&mut backend, Some(PRIMARY), false);
    backend.place(PRIMARY, 9.0);
    for _ in 0..5 {
        assert!(!trail.tick(&mut backend, Some(PRIMARY), true));
    }

    assert_eq!(trail.history().len(), 1);
    assert_eq!(backend.x_of(1), Some(1.0));
}

#[test]
fn trail_restart_clears_history() {
    let mut backend = RecordingBackend::default();
    let config = TrailConfig::sampled(2, 2, 0.1, 0.5);
    let mut trail = GhostTrail::new(config, ghost_handles(2), &mut backend).unwrap();

    backend.place(PRIMARY, 1.0);
    for _ in 0..4 {
        trail.tick(&mut backend, Some(PRIMARY), false);
    }
    assert_eq!(trail.history().len(), 2);

    trail.restart();
    assert!(trail.history().is_empty());
    assert_eq!(trail.sampler().frame_count(), 0);

    // Next frame rebinds and hides every slot until the sampler fires again
    assert!(!trail.tick(&mut backend, Some(PRIMARY), false));
    assert!(trail.slots().iter().all(|s| !s.is_visible()));
}

#[test]
fn trail_delayed_mode_only_styles_slots() {
    let mut backend = RecordingBackend::default();
    let config = TrailConfig::delayed(4, 0.12, 0.03, 0.25);
    let mut trail = GhostTrail::new(config, ghost_handles(4), &mut backend).unwrap();

    let delays: Vec<f32> = trail.delays().collect();
    for (delay, expected) in delays.iter().zip([0.12, 0.24, 0.36, 0.48]) {
        assert!(approx(*delay, expected), "expected {expected}, got {delay}");
    }
    assert_eq!(backend.order[&4], -48);
    assert!(trail.slots().iter().all(|s| s.is_visible()));

    backend.place(PRIMARY, 1.0);
    assert!(!trail.tick(&mut backend, Some(PRIMARY), false));
    assert!(trail.history().is_empty());
    assert_eq!(backend.x_of(1), None);
}

#[test]
fn trail_delayed_orders_strictly_decrease_at_minimum_spacing() {
    let mut backend = RecordingBackend::default();
    let config = TrailConfig::delayed(8, MIN_SPACING_SECS, 0.03, 0.25);
    let trail = GhostTrail::new(config, ghost_handles(8), &mut backend).unwrap();

    let orders: Vec<i32> = trail.slots().iter().map(|s| s.render_order).collect();
    for pair in orders.windows(2) {
        assert!(pair[1] < pair[0], "older ghost does not draw first: {orders:?}");
    }
    for slot in trail.slots() {
        assert_eq!(backend.order[&slot.visual], slot.render_order);
    }
}

#[test]
fn trail_rejects_spacing_finer_than_render_order_buckets() {
    let mut backend = RecordingBackend::default();
    let config = TrailConfig::delayed(5, 0.004, 0.03, 0.25);

    let result = GhostTrail::new(config, ghost_handles(5), &mut backend);
    assert!(matches!(result, Err(AfterimageError::InvalidConfig(_))));
    assert!(backend.order.is_empty());
}

// ============================================================================
// TrailConfig
// ============================================================================

#[test]
fn config_defaults() {
    let config = TrailConfig::default();
    assert_eq!(config.trail_length, 4);
    assert!(approx(config.min_opacity, 0.03));
    assert!(approx(config.max_opacity, 0.25));
    assert_eq!(config.mode, TrailMode::Sampled { spacing_frames: 3 });
    assert!(config.validate().is_ok());
}

#[test]
fn config_validation_rejects_bad_values() {
    assert!(TrailConfig::sampled(0, 3, 0.03, 0.25).validate().is_err());
    assert!(TrailConfig::sampled(4, 0, 0.03, 0.25).validate().is_err());
    assert!(TrailConfig::sampled(4, 3, 0.5, 0.25).validate().is_err());
    assert!(TrailConfig::sampled(4, 3, 0.03, 1.5).validate().is_err());
    assert!(TrailConfig::delayed(4, 0.0, 0.03, 0.25).validate().is_err());
    assert!(TrailConfig::delayed(4, f32::NAN, 0.03, 0.25).validate().is_err());
    assert!(TrailConfig::delayed(4, 0.009, 0.03, 0.25).validate().is_err());
    assert!(TrailConfig::delayed(4, MIN_SPACING_SECS, 0.03, 0.25).validate().is_ok());
}
