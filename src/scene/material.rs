use glam::Vec3;

/// Surface parameters handed to the renderer for one character instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub opacity: f32,
    pub transparent: bool,
    pub depth_write: bool,
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    /// Opaque white standard surface used for the primary character.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            color: Vec3::ONE,
            opacity: 1.0,
            transparent: false,
            depth_write: true,
            metalness: 0.1,
            roughness: 0.8,
        }
    }

    /// Translucent variant for ghosts. Depth writes are off so overlapping
    /// ghosts blend instead of occluding each other.
    #[must_use]
    pub fn ghost(opacity: f32) -> Self {
        Self {
            opacity,
            transparent: true,
            depth_write: false,
            ..Self::standard()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard()
    }
}
