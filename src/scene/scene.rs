use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::scene::material::Material;
use crate::scene::node::Node;
use crate::scene::skeleton::Skeleton;
use crate::scene::transform::Transform;
use crate::scene::{CharacterKey, NodeHandle, SkeletonKey};
use crate::trail::{JointPose, PoseSnapshot, VisualBackend};

/// A renderable character instance.
#[derive(Debug, Clone)]
pub struct Character {
    pub name: String,
    pub root: NodeHandle,
    pub skeleton: Option<SkeletonKey>,
    pub material: Material,
    pub render_order: i32,
}

impl Character {
    #[must_use]
    pub fn new(name: impl Into<String>, root: NodeHandle) -> Self {
        Self {
            name: name.into(),
            root,
            skeleton: None,
            material: Material::standard(),
            render_order: 0,
        }
    }

    #[must_use]
    pub fn with_skeleton(mut self, skeleton: SkeletonKey) -> Self {
        self.skeleton = Some(skeleton);
        self
    }
}

/// Owns nodes, skeletons and characters.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
    pub skeletons: SlotMap<SkeletonKey, Skeleton>,
    pub characters: SlotMap<CharacterKey, Character>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Creates a root-level node.
    pub fn create_node(&mut self, name: &str) -> NodeHandle {
        let handle = self.nodes.insert(Node::new(name));
        self.root_nodes.push(handle);
        handle
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Makes `child` a child of `parent`, detaching it from its previous parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent || !self.nodes.contains_key(parent) {
            return;
        }
        let Some(old_parent) = self.nodes.get(child).map(|n| n.parent) else {
            return;
        };

        match old_parent {
            Some(old) => {
                if let Some(node) = self.nodes.get_mut(old) {
                    node.children.retain(|&c| c != child);
                }
            }
            None => self.root_nodes.retain(|&r| r != child),
        }

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Depth-first search for a node called `name` in the subtree under `root`.
    #[must_use]
    pub fn find_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let node = self.nodes.get(current)?;
            if node.name == name {
                return Some(current);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Collects `root` and all of its descendants in pre-order.
    #[must_use]
    pub fn collect_subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                out.push(current);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    // ========================================================================
    // Skeletons & Characters
    // ========================================================================

    pub fn add_skeleton(&mut self, skeleton: Skeleton) -> SkeletonKey {
        self.skeletons.insert(skeleton)
    }

    pub fn add_character(&mut self, character: Character) -> CharacterKey {
        self.characters.insert(character)
    }

    #[inline]
    #[must_use]
    pub fn character(&self, key: CharacterKey) -> Option<&Character> {
        self.characters.get(key)
    }

    #[inline]
    pub fn character_mut(&mut self, key: CharacterKey) -> Option<&mut Character> {
        self.characters.get_mut(key)
    }

    /// Deep-clones a character: its node subtree, and its skeleton remapped
    /// onto the cloned bones.
    pub fn clone_character(&mut self, key: CharacterKey, name: &str) -> Option<CharacterKey> {
        let source = self.characters.get(key)?.clone();
        let subtree = self.collect_subtree(source.root);

        let mut remap: FxHashMap<NodeHandle, NodeHandle> = FxHashMap::default();
        for &old in &subtree {
            let node = &self.nodes[old];
            let copy = Node {
                name: node.name.clone(),
                parent: None,
                children: Vec::new(),
                transform: node.transform,
                visible: node.visible,
            };
            remap.insert(old, self.nodes.insert(copy));
        }

        for &old in &subtree {
            let new = remap[&old];
            let children: Vec<NodeHandle> = self.nodes[old]
                .children
                .iter()
                .filter_map(|c| remap.get(c).copied())
                .collect();
            for &child in &children {
                self.nodes[child].parent = Some(new);
            }
            self.nodes[new].children = children;
        }

        let new_root = remap[&source.root];
        self.root_nodes.push(new_root);

        let skeleton = source.skeleton.and_then(|sk| self.skeletons.get(sk)).map(|sk| {
            let bones = sk
                .bones
                .iter()
                .filter_map(|b| remap.get(b).copied())
                .collect();
            Skeleton::new(&format!("{}_{name}", sk.name), bones)
        });
        let skeleton = skeleton.map(|sk| self.skeletons.insert(sk));

        Some(self.characters.insert(Character {
            name: name.to_string(),
            root: new_root,
            skeleton,
            material: source.material,
            render_order: source.render_order,
        }))
    }

    /// Removes a character together with its node subtree and skeleton.
    pub fn remove_character(&mut self, key: CharacterKey) -> Option<Character> {
        let character = self.characters.remove(key)?;

        if let Some(sk) = character.skeleton {
            self.skeletons.remove(sk);
        }

        if let Some(parent) = self.nodes.get(character.root).and_then(Node::parent) {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|&c| c != character.root);
            }
        } else {
            self.root_nodes.retain(|&r| r != character.root);
        }

        for handle in self.collect_subtree(character.root) {
            self.nodes.remove(handle);
        }

        Some(character)
    }

    // ========================================================================
    // Poses
    // ========================================================================

    /// Captures the root transform and every bone of `key`'s skeleton.
    #[must_use]
    pub fn capture_pose(&self, key: CharacterKey) -> Option<PoseSnapshot> {
        let character = self.characters.get(key)?;
        let root = self.nodes.get(character.root)?.transform;

        let joints = character
            .skeleton
            .and_then(|sk| self.skeletons.get(sk))
            .map(|sk| {
                sk.bones
                    .iter()
                    .filter_map(|&b| self.nodes.get(b))
                    .map(|n| JointPose::from(n.transform))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Some(PoseSnapshot::new(root, joints))
    }

    /// Writes `pose` onto `key`'s root and bones.
    pub fn write_pose(&mut self, key: CharacterKey, pose: &PoseSnapshot) {
        let Some(character) = self.characters.get(key) else {
            return;
        };

        if let Some(root) = self.nodes.get_mut(character.root) {
            root.transform = *pose.root();
        }

        let Some(skeleton) = character.skeleton.and_then(|sk| self.skeletons.get(sk)) else {
            return;
        };
        for (&bone, joint) in skeleton.bones.iter().zip(pose.joints()) {
            if let Some(node) = self.nodes.get_mut(bone) {
                node.transform = Transform::from(*joint);
            }
        }
    }

    #[must_use]
    pub fn is_character_visible(&self, key: CharacterKey) -> bool {
        self.characters
            .get(key)
            .and_then(|c| self.nodes.get(c.root))
            .is_some_and(|n| n.visible)
    }
}

impl VisualBackend for Scene {
    type Handle = CharacterKey;

    fn read_pose(&self, handle: CharacterKey) -> Option<PoseSnapshot> {
        self.capture_pose(handle)
    }

    fn apply_pose(&mut self, handle: CharacterKey, pose: &PoseSnapshot) {
        self.write_pose(handle, pose);
    }

    fn set_visible(&mut self, handle: CharacterKey, visible: bool) {
        let root = self.characters.get(handle).map(|c| c.root);
        if let Some(node) = root.and_then(|r| self.nodes.get_mut(r)) {
            node.visible = visible;
        }
    }

    fn set_render_order(&mut self, handle: CharacterKey, order: i32) {
        if let Some(character) = self.characters.get_mut(handle) {
            character.render_order = order;
        }
    }

    fn set_opacity(&mut self, handle: CharacterKey, opacity: f32) {
        if let Some(character) = self.characters.get_mut(handle) {
            character.material = Material::ghost(opacity);
        }
    }
}
