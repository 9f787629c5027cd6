use std::sync::Arc;

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binder::Binder;
use crate::animation::binding::TargetPath;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

/// Read/write access to an animation timeline.
///
/// This is all the transport layer needs from an animation backend.
pub trait AnimationClock {
    /// Current timeline position in seconds.
    fn time(&self) -> f32;

    /// Jumps the timeline to `time`. Negative values start a pre-roll.
    fn set_time(&mut self, time: f32);

    fn is_paused(&self) -> bool;

    fn set_paused(&mut self, paused: bool);
}

/// Drives the actions of a single character instance.
///
/// The mixer keeps its own clock, which only advances while not paused, so a
/// pause/resume pair never introduces a time jump.
#[derive(Debug, Clone)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
    time: f32,
    pub time_scale: f32,
    paused: bool,
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            time: 0.0,
            time_scale: 1.0,
            paused: false,
        }
    }

    pub fn add_action(&mut self, action: AnimationAction) {
        self.actions.push(action);
    }

    /// Binds `clip` to the hierarchy under `root` and registers it as a stopped action.
    pub fn clip_action(&mut self, scene: &Scene, root: NodeHandle, clip: Arc<AnimationClip>) {
        let bindings = Binder::bind(scene, root, &clip);
        let mut action = AnimationAction::new(clip).with_bindings(bindings);
        action.enabled = false;
        action.set_time(self.time);
        self.actions.push(action);
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    pub fn action_mut(&mut self, name: &str) -> Option<&mut AnimationAction> {
        self.actions.iter_mut().find(|a| a.name() == name)
    }

    /// Starts the named action. Unknown names are ignored.
    pub fn play(&mut self, name: &str) -> bool {
        if let Some(action) = self.action_mut(name) {
            action.play();
            true
        } else {
            log::warn!("Animation '{name}' not found, nothing to play");
            false
        }
    }

    /// Starts the first registered action, if any.
    pub fn play_first(&mut self) -> bool {
        match self.actions.first_mut() {
            Some(action) => {
                action.play();
                true
            }
            None => {
                log::warn!("Mixer has no actions, nothing to play");
                false
            }
        }
    }

    /// Advances all actions and writes the sampled values into `scene`.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        if !self.paused {
            let step = dt * self.time_scale;
            self.time += step;
            for action in &mut self.actions {
                action.update(step);
            }
        }

        self.apply(scene);
    }

    fn apply(&mut self, scene: &mut Scene) {
        for action in &mut self.actions {
            if !action.enabled {
                continue;
            }

            for i in 0..action.bindings.len() {
                let binding = action.bindings[i];
                let Some(value) = action.sample_track(binding.track_index) else {
                    continue;
                };
                let Some(node) = scene.get_node_mut(binding.node) else {
                    continue;
                };

                match (value, binding.target) {
                    (TrackValue::Vector3(v), TargetPath::Translation) => node.transform.position = v,
                    (TrackValue::Vector3(v), TargetPath::Scale) => node.transform.scale = v,
                    (TrackValue::Quaternion(q), TargetPath::Rotation) => node.transform.rotation = q,
                    _ => {}
                }
            }
        }
    }
}

impl AnimationClock for AnimationMixer {
    fn time(&self) -> f32 {
        self.time
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
        for action in &mut self.actions {
            action.set_time(time);
            // A finished one-shot comes back to life on a seek
            action.paused = false;
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
