use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    /// Name of the scene node (usually a bone) the track drives.
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            TrackData::Vector3(track) => track.end_time(),
            TrackData::Quaternion(track) => track.end_time(),
        }
    }
}

/// Track definition: metadata plus keyframe data.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

impl Track {
    #[must_use]
    pub fn translation(node_name: &str, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            meta: TrackMeta { node_name: node_name.to_string(), target: TargetPath::Translation },
            data: TrackData::Vector3(track),
        }
    }

    #[must_use]
    pub fn rotation(node_name: &str, track: KeyframeTrack<Quat>) -> Self {
        Self {
            meta: TrackMeta { node_name: node_name.to_string(), target: TargetPath::Rotation },
            data: TrackData::Quaternion(track),
        }
    }

    #[must_use]
    pub fn scale(node_name: &str, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            meta: TrackMeta { node_name: node_name.to_string(), target: TargetPath::Scale },
            data: TrackData::Vector3(track),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Creates a clip whose duration is the latest keyframe across all tracks.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks.iter().map(|t| t.data.end_time()).fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }
}
