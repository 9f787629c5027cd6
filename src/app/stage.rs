use std::sync::Arc;

use crate::animation::{AnimationClip, AnimationClock, AnimationMixer};
use crate::app::bindings::InputAction;
use crate::app::gate::StartGate;
use crate::app::input::Input;
use crate::audio::{AudioElement, MusicPlayer, Playlist};
use crate::config::StageConfig;
use crate::errors::{AfterimageError, Result};
use crate::scene::{CharacterKey, Material, Scene};
use crate::session::{KeyValueStore, SessionState};
use crate::trail::{GhostTrail, TrailMode};
use crate::transport::{PlaybackState, TransportCommand, TransportController, TransportState};

/// A mounted scene: one animated character, its ghost trail, the transport
/// and the background music.
///
/// Call [`tick`](Self::tick) once per rendered frame. Everything happens
/// synchronously inside it, in this order: user gestures and key actions,
/// one transport transition, animation clocks, ghost trail, music events.
pub struct Stage<A: AudioElement> {
    config: StageConfig,
    scene: Scene,
    primary: CharacterKey,
    primary_mixer: AnimationMixer,
    /// Per-ghost clocks and their delays; empty in sampled mode.
    ghost_clocks: Vec<(AnimationMixer, f32)>,
    trail: GhostTrail<CharacterKey>,
    transport: TransportState,
    controller: TransportController,
    music: MusicPlayer<A>,
    session: SessionState,
    gate: StartGate,
    restart_on_open: bool,
    hud_hidden: bool,
}

impl<A: AudioElement> Stage<A> {
    /// Builds the stage around `primary`, which must already be in `scene`
    /// with its assets loaded. Ghost clones are created here.
    pub fn mount(
        config: StageConfig,
        mut scene: Scene,
        primary: CharacterKey,
        clip: Arc<AnimationClip>,
        audio: A,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self> {
        config.validate()?;

        let root = scene
            .character(primary)
            .map(|c| c.root)
            .ok_or_else(|| AfterimageError::AssetNotFound(format!("primary character {primary:?}")))?;
        if let Some(character) = scene.character_mut(primary) {
            character.material = Material::standard();
        }

        let mut primary_mixer = AnimationMixer::new();
        primary_mixer.clip_action(&scene, root, clip.clone());
        primary_mixer.play(&clip.name);

        let ghosts: Vec<CharacterKey> = (1..=config.trail.trail_length)
            .filter_map(|i| scene.clone_character(primary, &format!("ghost-{i}")))
            .collect();
        let trail = GhostTrail::new(config.trail, ghosts.clone(), &mut scene)?;

        let ghost_clocks = match config.trail.mode {
            TrailMode::Delayed { .. } => ghosts
                .iter()
                .zip(trail.delays())
                .filter_map(|(&ghost, delay)| {
                    let ghost_root = scene.character(ghost)?.root;
                    let mut mixer = AnimationMixer::new();
                    mixer.clip_action(&scene, ghost_root, clip.clone());
                    mixer.play(&clip.name);
                    mixer.set_time(-delay);
                    Some((mixer, delay))
                })
                .collect(),
            TrailMode::Sampled { .. } => Vec::new(),
        };

        let mut session = SessionState::new(store);
        let restart_on_open = session.take_was_paused();

        let playlist = Playlist::new(config.music.tracks.clone());
        let mut music = MusicPlayer::new(audio, playlist, config.music.persist_interval_secs);
        music.restore(&session);

        let transport = TransportState::new();
        let controller = TransportController::synced_with(&transport);

        log::info!(
            "Stage mounted: clip '{}' ({:.2}s), {} ghosts",
            clip.name,
            clip.duration,
            ghosts.len()
        );

        Ok(Self {
            config,
            scene,
            primary,
            primary_mixer,
            ghost_clocks,
            trail,
            transport,
            controller,
            music,
            session,
            gate: StartGate::default(),
            restart_on_open,
            hud_hidden: false,
        })
    }

    /// Tears the stage down, removing the ghost clones, and hands the scene back.
    pub fn unmount(mut self) -> Scene {
        self.music.pause();
        for slot in self.trail.slots() {
            self.scene.remove_character(slot.visual);
        }
        log::info!("Stage unmounted");
        self.scene
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    pub fn tick(&mut self, dt: f32, input: &Input) {
        if input.any_click() {
            self.handle_gesture();
        }
        for action in self.config.bindings.actions(input) {
            self.handle_action(action);
        }

        if let Some(command) = self.controller.poll(&mut self.transport) {
            self.apply(command);
        }

        if self.gate.is_open() {
            self.primary_mixer.update(dt, &mut self.scene);
            for (mixer, _) in &mut self.ghost_clocks {
                mixer.update(dt, &mut self.scene);
            }
            self.trail
                .tick(&mut self.scene, Some(self.primary), self.transport.is_paused());
        }

        self.music.tick(dt, &mut self.session);
    }

    fn handle_gesture(&mut self) {
        if !self.gate.open() {
            self.music.on_user_gesture();
            return;
        }

        log::info!("Stage started by user gesture");
        if std::mem::take(&mut self.restart_on_open) {
            // The restart command starts the music from the top
            self.music.unlock();
            self.transport.request_restart();
        } else {
            self.music.start();
        }
    }

    fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::ToggleHud => {
                self.hud_hidden = !self.hud_hidden;
                log::debug!("HUD hidden: {}", self.hud_hidden);
            }
            InputAction::PauseAndReset if self.gate.is_open() => {
                self.transport.set_paused(true);
                self.session.set_was_paused(true);
                self.gate.close();
                self.restart_on_open = true;
                log::info!("Paused, waiting for a click to start again");
            }
            InputAction::TogglePause if self.gate.is_open() => self.transport.toggle_pause(),
            InputAction::Restart if self.gate.is_open() => {
                self.transport.request_restart();
            }
            _ => {}
        }
    }

    fn apply(&mut self, command: TransportCommand) {
        command.apply_to_clock(&mut self.primary_mixer, 0.0);
        for (mixer, delay) in &mut self.ghost_clocks {
            command.apply_to_clock(mixer, *delay);
        }

        match command {
            TransportCommand::Pause => self.music.pause(),
            TransportCommand::Resume => self.music.resume(),
            TransportCommand::Restart => {
                self.trail.restart();
                self.music.restart();
                self.session.set_was_paused(false);
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn primary(&self) -> CharacterKey {
        self.primary
    }

    #[must_use]
    pub fn primary_clock(&self) -> &AnimationMixer {
        &self.primary_mixer
    }

    /// Ghost clocks with their delays, in slot order. Empty in sampled mode.
    pub fn ghost_clocks(&self) -> impl Iterator<Item = (&AnimationMixer, f32)> {
        self.ghost_clocks.iter().map(|(mixer, delay)| (mixer, *delay))
    }

    /// Current animation time of the primary character.
    #[must_use]
    pub fn animation_time(&self) -> f32 {
        self.primary_mixer.time()
    }

    #[must_use]
    pub fn trail(&self) -> &GhostTrail<CharacterKey> {
        &self.trail
    }

    #[must_use]
    pub fn transport(&self) -> &TransportState {
        &self.transport
    }

    /// Direct access for UI controls that bypass key bindings.
    pub fn transport_mut(&mut self) -> &mut TransportState {
        &mut self.transport
    }

    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.controller.state()
    }

    #[must_use]
    pub fn music(&self) -> &MusicPlayer<A> {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicPlayer<A> {
        &mut self.music
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    #[must_use]
    pub fn gate(&self) -> StartGate {
        self.gate
    }

    #[must_use]
    pub fn is_hud_hidden(&self) -> bool {
        self.hud_hidden
    }
}
