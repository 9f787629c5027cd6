use crate::scene::NodeHandle;

/// Ordered list of bone nodes. Joint `i` of a pose maps to `bones[i]`.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub name: String,
    pub bones: Vec<NodeHandle>,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str, bones: Vec<NodeHandle>) -> Self {
        Self {
            name: name.to_string(),
            bones,
        }
    }

    #[inline]
    #[must_use]
    pub fn root_bone(&self) -> Option<NodeHandle> {
        self.bones.first().copied()
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.bones.len()
    }
}
