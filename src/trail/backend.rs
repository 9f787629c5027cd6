use crate::trail::pose::PoseSnapshot;

/// The rendering collaborator as seen by the ghost trail.
///
/// The trail never touches a scene graph directly; it reads the target's pose
/// and writes poses and display state onto ghost handles through this trait.
pub trait VisualBackend {
    /// Identifies one visual instance (the primary character or a ghost clone).
    type Handle: Copy;

    /// Captures the current pose of `handle`, or `None` if it no longer exists.
    fn read_pose(&self, handle: Self::Handle) -> Option<PoseSnapshot>;

    /// Copies `pose` onto `handle`. Joints beyond the target's rig are ignored.
    fn apply_pose(&mut self, handle: Self::Handle, pose: &PoseSnapshot);

    fn set_visible(&mut self, handle: Self::Handle, visible: bool);

    /// Lower values draw first.
    fn set_render_order(&mut self, handle: Self::Handle, order: i32);

    fn set_opacity(&mut self, handle: Self::Handle, opacity: f32);
}
