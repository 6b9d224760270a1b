use crate::audio::{AmbientStage, AudioBackend, AudioError, SynthEngine};
use crate::scene::{Scene, SceneConfig};

/// The whole demo: scene state plus the synthesizer, fed by UI intents.
pub struct Demo<B: AudioBackend> {
    pub scene: Scene,
    pub synth: SynthEngine<B>,
}

impl<B: AudioBackend> Demo<B> {
    pub fn new(config: &SceneConfig, synth: SynthEngine<B>) -> Self {
        Self {
            scene: Scene::new(config),
            synth,
        }
    }

    pub fn tick(&mut self, elapsed_sec: f32) {
        self.scene.tick(elapsed_sec);
    }

    pub fn pointer_enter(&mut self) {
        self.scene.orb.pointer_enter();
    }

    pub fn pointer_leave(&mut self) {
        self.scene.orb.pointer_leave();
    }

    /// Toggle the orb's active state and play the click.
    ///
    /// The visual toggle happens even if the audio device fails.
    pub fn click(&mut self) -> Result<bool, AudioError> {
        let active = self.scene.orb.toggle_active();
        log::info!("[click] orb active={}", active);
        self.synth.trigger_click_effect()?;
        Ok(active)
    }

    pub fn toggle_ambient(&mut self) -> Result<AmbientStage, AudioError> {
        self.synth.toggle_ambient()
    }

    pub fn set_color(&mut self, value: impl Into<String>) {
        self.scene.set_base_color(value);
    }

    pub fn ambient_stage(&self) -> AmbientStage {
        self.synth.stage()
    }
}
