use super::{AudioBackend, AudioError, Param, Waveform};
use crate::constants::*;

/// Lifecycle of the ambient drone. There is no way back to `Uninitialized`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbientStage {
    Uninitialized,
    Running,
    Suspended,
}

/// Fixed values of the ambient graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientPatch {
    pub carrier_hz: f32,
    pub modulator_hz: f32,
    pub modulation_depth_hz: f32,
    pub master_gain: f32,
    pub echo_delay_sec: f32,
    pub echo_max_delay_sec: f64,
    pub echo_feedback: f32,
    pub drone_hz: f32,
    pub drone_gain: f32,
    pub breath_hz: f32,
    pub breath_depth: f32,
}

impl Default for AmbientPatch {
    fn default() -> Self {
        Self {
            carrier_hz: CARRIER_HZ,
            modulator_hz: MODULATOR_HZ,
            modulation_depth_hz: MODULATION_DEPTH_HZ,
            master_gain: MASTER_GAIN,
            echo_delay_sec: ECHO_DELAY_SEC,
            echo_max_delay_sec: ECHO_MAX_DELAY_SEC,
            echo_feedback: ECHO_FEEDBACK,
            drone_hz: DRONE_HZ,
            drone_gain: DRONE_GAIN,
            breath_hz: BREATH_HZ,
            breath_depth: BREATH_DEPTH,
        }
    }
}

/// Envelope of the percussive click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickPatch {
    pub start_hz: f32,
    pub end_hz: f32,
    pub start_gain: f32,
    pub end_gain: f32,
    pub duration_sec: f64,
}

impl Default for ClickPatch {
    fn default() -> Self {
        Self {
            start_hz: CLICK_START_HZ,
            end_hz: CLICK_END_HZ,
            start_gain: CLICK_START_GAIN,
            end_gain: CLICK_END_GAIN,
            duration_sec: CLICK_DURATION_SEC,
        }
    }
}

/// Handles to every node of the ambient graph.
///
/// ```text
/// modulator -> modulation_depth -> carrier.frequency
/// carrier -> master -> destination
/// carrier -> delay -> feedback -> delay
///            delay -> master
/// pulse -> pulse_depth -> drone_gain.gain
/// drone -> drone_gain -> master
/// ```
#[derive(Clone, Debug)]
pub struct AmbientGraph<N> {
    pub carrier: N,
    pub modulator: N,
    pub modulation_depth: N,
    pub master: N,
    pub delay: N,
    pub feedback: N,
    pub drone: N,
    pub drone_gain: N,
    pub pulse: N,
    pub pulse_depth: N,
}

impl<N: Clone> AmbientGraph<N> {
    pub fn build<B>(device: &mut B, patch: &AmbientPatch) -> Result<Self, AudioError>
    where
        B: AudioBackend<Node = N>,
    {
        let destination = device.destination();

        // Slow FM drift on the carrier
        let carrier = device.oscillator(Waveform::Sine, patch.carrier_hz)?;
        let modulator = device.oscillator(Waveform::Sine, patch.modulator_hz)?;
        let modulation_depth = device.gain(patch.modulation_depth_hz)?;
        device.connect(&modulator, &modulation_depth)?;
        device.connect_param(&modulation_depth, &carrier, Param::Frequency)?;

        let master = device.gain(patch.master_gain)?;
        device.connect(&carrier, &master)?;
        device.connect(&master, &destination)?;

        // Decaying echo
        let delay = device.delay(patch.echo_max_delay_sec, patch.echo_delay_sec)?;
        let feedback = device.gain(patch.echo_feedback)?;
        device.connect(&carrier, &delay)?;
        device.connect(&delay, &feedback)?;
        device.connect(&feedback, &delay)?;
        device.connect(&delay, &master)?;

        // Breathing drone
        let drone = device.oscillator(Waveform::Sine, patch.drone_hz)?;
        let drone_gain = device.gain(patch.drone_gain)?;
        let pulse = device.oscillator(Waveform::Sine, patch.breath_hz)?;
        let pulse_depth = device.gain(patch.breath_depth)?;
        device.connect(&pulse, &pulse_depth)?;
        device.connect_param(&pulse_depth, &drone_gain, Param::Gain)?;
        device.connect(&drone, &drone_gain)?;
        device.connect(&drone_gain, &master)?;

        Ok(Self {
            carrier,
            modulator,
            modulation_depth,
            master,
            delay,
            feedback,
            drone,
            drone_gain,
            pulse,
            pulse_depth,
        })
    }

    /// The four continuously running oscillators.
    pub fn sources(&self) -> [&N; 4] {
        [&self.carrier, &self.modulator, &self.drone, &self.pulse]
    }
}

/// One scheduled click: an oscillator and its envelope gain.
#[derive(Clone, Debug)]
pub struct ClickVoice<N> {
    pub oscillator: N,
    pub gain: N,
    pub started_at: f64,
    pub stops_at: f64,
}

type DeviceOpener<B> = Box<dyn FnMut() -> Result<B, AudioError>>;

/// Owns the output device, the ambient graph and its lifecycle.
///
/// The device is opened lazily through the injected opener the first time
/// either the ambient toggle or the click effect needs it, and is shared by
/// both from then on.
pub struct SynthEngine<B: AudioBackend> {
    opener: DeviceOpener<B>,
    device: Option<B>,
    stage: AmbientStage,
    ambient: Option<AmbientGraph<B::Node>>,
    // How many of the ambient sources have been started so far.
    sources_started: usize,
    ambient_patch: AmbientPatch,
    click_patch: ClickPatch,
    clicks_triggered: usize,
}

impl<B: AudioBackend> SynthEngine<B> {
    pub fn new(opener: impl FnMut() -> Result<B, AudioError> + 'static) -> Self {
        Self::with_patches(opener, AmbientPatch::default(), ClickPatch::default())
    }

    pub fn with_patches(
        opener: impl FnMut() -> Result<B, AudioError> + 'static,
        ambient_patch: AmbientPatch,
        click_patch: ClickPatch,
    ) -> Self {
        Self {
            opener: Box::new(opener),
            device: None,
            stage: AmbientStage::Uninitialized,
            ambient: None,
            sources_started: 0,
            ambient_patch,
            click_patch,
            clicks_triggered: 0,
        }
    }

    pub fn stage(&self) -> AmbientStage {
        self.stage
    }

    pub fn ambient_graph(&self) -> Option<&AmbientGraph<B::Node>> {
        self.ambient.as_ref()
    }

    pub fn device(&self) -> Option<&B> {
        self.device.as_ref()
    }

    pub fn device_mut(&mut self) -> Option<&mut B> {
        self.device.as_mut()
    }

    pub fn clicks_triggered(&self) -> usize {
        self.clicks_triggered
    }

    fn ensure_device(&mut self) -> Result<&mut B, AudioError> {
        if self.device.is_none() {
            let device = (self.opener)()?;
            log::info!("[audio] output device opened");
            self.device = Some(device);
        }
        self.device.as_mut().ok_or(AudioError::DeviceClosed)
    }

    /// Advance the ambient state machine one step and return the new stage.
    ///
    /// The first call builds the graph and starts its sources; later calls
    /// only suspend or resume the shared device. If activation fails partway,
    /// the next call picks up where it stopped instead of building again.
    pub fn toggle_ambient(&mut self) -> Result<AmbientStage, AudioError> {
        match self.stage {
            AmbientStage::Uninitialized => {
                self.activate_ambient()?;
                self.stage = AmbientStage::Running;
                log::info!("[audio] ambient graph built and started");
            }
            AmbientStage::Running => {
                self.device
                    .as_mut()
                    .ok_or(AudioError::DeviceClosed)?
                    .suspend()?;
                self.stage = AmbientStage::Suspended;
                log::info!("[audio] ambient suspended");
            }
            AmbientStage::Suspended => {
                self.device
                    .as_mut()
                    .ok_or(AudioError::DeviceClosed)?
                    .resume()?;
                self.stage = AmbientStage::Running;
                log::info!("[audio] ambient resumed");
            }
        }
        Ok(self.stage)
    }

    fn activate_ambient(&mut self) -> Result<(), AudioError> {
        let patch = self.ambient_patch;
        self.ensure_device()?;
        let device = self.device.as_mut().ok_or(AudioError::DeviceClosed)?;
        if self.ambient.is_none() {
            self.ambient = Some(AmbientGraph::build(device, &patch)?);
        }
        let graph = self.ambient.as_ref().ok_or(AudioError::DeviceClosed)?;
        let now = device.current_time();
        for src in graph.sources().into_iter().skip(self.sources_started) {
            device.start(src, now)?;
            self.sources_started += 1;
        }
        device.resume()
    }

    /// Schedule one independent click voice starting now.
    pub fn trigger_click_effect(&mut self) -> Result<ClickVoice<B::Node>, AudioError> {
        let patch = self.click_patch;
        let device = self.ensure_device()?;
        let now = device.current_time();
        let end = now + patch.duration_sec;

        let oscillator = device.oscillator(Waveform::Sine, patch.start_hz)?;
        device.set_value_at_time(&oscillator, Param::Frequency, patch.start_hz, now)?;
        device.exponential_ramp_to_value_at_time(&oscillator, Param::Frequency, patch.end_hz, end)?;

        let gain = device.gain(patch.start_gain)?;
        device.set_value_at_time(&gain, Param::Gain, patch.start_gain, now)?;
        device.exponential_ramp_to_value_at_time(&gain, Param::Gain, patch.end_gain, end)?;

        let destination = device.destination();
        device.connect(&oscillator, &gain)?;
        device.connect(&gain, &destination)?;
        device.start(&oscillator, now)?;
        device.stop(&oscillator, end)?;

        self.clicks_triggered += 1;
        log::debug!("[click] voice scheduled at {:.3}s", now);
        Ok(ClickVoice {
            oscillator,
            gain,
            started_at: now,
            stops_at: end,
        })
    }

    /// Close the device. Call once at process teardown.
    pub fn shutdown(mut self) -> Result<(), AudioError> {
        self.ambient = None;
        if let Some(mut device) = self.device.take() {
            device.close()?;
            log::info!("[audio] output device closed");
        }
        Ok(())
    }
}
