//! Headless stage run.
//!
//! Builds a small procedural rig with a looping dance clip, mounts it with a
//! ghost trail and silent music, and plays a scripted sequence of inputs.
//! Session state is kept in a JSON file, so a second run picks up where the
//! first one left off.
//!
//! ```text
//! cargo run --example headless_dance [stage.json]
//! RUST_LOG=debug cargo run --example headless_dance
//! ```

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Quat, Vec3};

use afterimage::animation::{AnimationClip, InterpolationMode, KeyframeTrack, Track};
use afterimage::app::{Input, Key, MouseButton, Stage, init_logging};
use afterimage::audio::{AudioElement, HeadlessAudio};
use afterimage::config::StageConfig;
use afterimage::scene::{Character, CharacterKey, Scene, Skeleton};
use afterimage::session::JsonFileStore;
use afterimage::utils::Timer;

const FPS: f32 = 60.0;
const RUN_SECONDS: f32 = 6.0;

const BONES: [&str; 5] = ["hips", "spine", "chest", "left_arm", "right_arm"];

fn build_dancer(scene: &mut Scene) -> CharacterKey {
    let root = scene.create_node("Armature");
    let hips = scene.create_node(BONES[0]);
    let spine = scene.create_node(BONES[1]);
    let chest = scene.create_node(BONES[2]);
    let left_arm = scene.create_node(BONES[3]);
    let right_arm = scene.create_node(BONES[4]);

    scene.attach(hips, root);
    scene.attach(spine, hips);
    scene.attach(chest, spine);
    scene.attach(left_arm, chest);
    scene.attach(right_arm, chest);

    let skeleton = scene.add_skeleton(Skeleton::new(
        "dancer_rig",
        vec![hips, spine, chest, left_arm, right_arm],
    ));
    scene.add_character(Character::new("dancer", root).with_skeleton(skeleton))
}

/// Two-second loop: the hips sway side to side while the arms swing.
fn build_clip() -> AnimationClip {
    let steps = 8;
    let duration = 2.0;
    let times: Vec<f32> = (0..=steps).map(|i| duration * i as f32 / steps as f32).collect();
    let phase = |t: f32| (t / duration * TAU).sin();

    let sway = times.iter().map(|&t| Vec3::new(0.5 * phase(t), 1.0, 0.0)).collect();
    let twist = times.iter().map(|&t| Quat::from_rotation_y(0.4 * phase(t))).collect();
    let left = times.iter().map(|&t| Quat::from_rotation_z(1.2 * phase(t))).collect();
    let right = times.iter().map(|&t| Quat::from_rotation_z(-1.2 * phase(t))).collect();

    AnimationClip::new(
        "dance",
        vec![
            Track::translation("hips", KeyframeTrack::new(times.clone(), sway, InterpolationMode::Linear)),
            Track::rotation("spine", KeyframeTrack::new(times.clone(), twist, InterpolationMode::Linear)),
            Track::rotation("left_arm", KeyframeTrack::new(times.clone(), left, InterpolationMode::Linear)),
            Track::rotation("right_arm", KeyframeTrack::new(times, right, InterpolationMode::Linear)),
        ],
    )
}

/// Scripted user input for frame `frame`.
fn script(frame: u32, input: &mut Input) {
    let second = |s: f32| (s * FPS) as u32;
    match frame {
        0 => input.click(MouseButton::Left),
        f if f == second(2.0) => input.tap_key(Key::P),
        f if f == second(2.5) => input.tap_key(Key::P),
        f if f == second(3.5) => input.tap_key(Key::R),
        f if f == second(5.0) => input.tap_key(Key::Space),
        _ => {}
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => StageConfig::from_file(path)?,
        None => StageConfig::default(),
    };

    let mut scene = Scene::new();
    let primary = build_dancer(&mut scene);
    let clip = Arc::new(build_clip());

    let session_path = std::env::temp_dir().join("afterimage-headless-session.json");
    let store = JsonFileStore::open(&session_path)?;
    log::info!("Session file: {}", session_path.display());

    let audio = HeadlessAudio::new().with_default_duration(2.5);
    let mut stage = Stage::mount(config, scene, primary, clip, audio, Box::new(store))?;

    let dt = 1.0 / FPS;
    let mut input = Input::new();
    // Simulation runs on a fixed step; the timer only measures wall time.
    let mut wall = Timer::new();
    for frame in 0..(RUN_SECONDS * FPS) as u32 {
        input.start_frame();
        script(frame, &mut input);
        stage.tick(dt, &input);
        stage.music_mut().element_mut().advance(f64::from(dt));
        wall.tick();

        if frame % FPS as u32 == 0 {
            let visible = stage.trail().slots().iter().filter(|s| s.is_visible()).count();
            log::info!(
                "t={:>4.1}s anim={:>5.2}s state={:?} ghosts={visible} track={} ({})",
                frame as f32 / FPS,
                stage.animation_time(),
                stage.playback_state(),
                stage.music().current_track_index(),
                stage.music().element().src(),
            );
        }
    }

    log::info!(
        "Simulated {} frames in {:.1} ms of wall time",
        wall.frame_count,
        wall.elapsed.as_secs_f64() * 1000.0
    );

    let scene = stage.unmount();
    log::info!("Done, {} character(s) left in the scene", scene.characters.len());
    Ok(())
}
