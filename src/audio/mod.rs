//! Ambient synthesizer and click effect.
//!
//! The engine talks to the output device through [`AudioBackend`], so the same
//! graph wiring drives WebAudio in the browser and the in-memory
//! [`GraphRecorder`] on the host.

mod automation;
mod engine;
mod recorder;
#[cfg(target_arch = "wasm32")]
mod web;

pub use automation::{Automation, AutomationEvent};
pub use engine::{AmbientGraph, AmbientPatch, AmbientStage, ClickPatch, ClickVoice, SynthEngine};
pub use recorder::{DeviceState, GraphRecorder, NodeId, NodeKind, RecordedNode, Target};
#[cfg(target_arch = "wasm32")]
pub use web::{WebAudioBackend, WebNode};

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
}

/// Automatable parameters the graph touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    Frequency,
    Gain,
    DelayTime,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AudioError {
    #[error("exponential ramp target must be non-zero (got {0})")]
    ZeroRampTarget(f32),
    #[error("unknown audio node {0}")]
    UnknownNode(usize),
    #[error("node has no {0:?} parameter")]
    MissingParam(Param),
    #[error("audio device is closed")]
    DeviceClosed,
    #[error("web audio: {0}")]
    Web(String),
}

/// Output device seam: node construction, routing and parameter scheduling.
///
/// Times are in seconds on the device clock ([`AudioBackend::current_time`]).
pub trait AudioBackend {
    type Node: Clone;

    fn current_time(&self) -> f64;
    fn destination(&self) -> Self::Node;

    fn oscillator(&mut self, waveform: Waveform, frequency_hz: f32)
        -> Result<Self::Node, AudioError>;
    fn gain(&mut self, value: f32) -> Result<Self::Node, AudioError>;
    fn delay(&mut self, max_delay_sec: f64, delay_sec: f32) -> Result<Self::Node, AudioError>;

    fn connect(&mut self, from: &Self::Node, to: &Self::Node) -> Result<(), AudioError>;
    /// Route `from` into an automatable parameter of `to` (summed with its value).
    fn connect_param(
        &mut self,
        from: &Self::Node,
        to: &Self::Node,
        param: Param,
    ) -> Result<(), AudioError>;

    fn set_value_at_time(
        &mut self,
        node: &Self::Node,
        param: Param,
        value: f32,
        at: f64,
    ) -> Result<(), AudioError>;
    fn exponential_ramp_to_value_at_time(
        &mut self,
        node: &Self::Node,
        param: Param,
        value: f32,
        end: f64,
    ) -> Result<(), AudioError>;

    fn start(&mut self, node: &Self::Node, at: f64) -> Result<(), AudioError>;
    fn stop(&mut self, node: &Self::Node, at: f64) -> Result<(), AudioError>;

    fn suspend(&mut self) -> Result<(), AudioError>;
    fn resume(&mut self) -> Result<(), AudioError>;
    fn close(&mut self) -> Result<(), AudioError>;
}
