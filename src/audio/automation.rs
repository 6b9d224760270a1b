use super::AudioError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AutomationEvent {
    SetValue { value: f32, time: f64 },
    ExponentialRamp { value: f32, end: f64 },
}

impl AutomationEvent {
    fn time(&self) -> f64 {
        match *self {
            AutomationEvent::SetValue { time, .. } => time,
            AutomationEvent::ExponentialRamp { end, .. } => end,
        }
    }

    fn value(&self) -> f32 {
        match *self {
            AutomationEvent::SetValue { value, .. }
            | AutomationEvent::ExponentialRamp { value, .. } => value,
        }
    }
}

/// Parameter timeline with WebAudio `AudioParam` semantics.
///
/// Events are kept ordered by time. A ramp runs from the previous event's
/// value and time to its own `value` at `end`; before the first event the
/// parameter holds `default`.
#[derive(Clone, Debug, PartialEq)]
pub struct Automation {
    default: f32,
    events: Vec<AutomationEvent>,
}

impl Automation {
    pub fn new(default: f32) -> Self {
        Self {
            default,
            events: Vec::new(),
        }
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }

    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(AutomationEvent::SetValue { value, time });
    }

    pub fn exponential_ramp_to_value_at_time(
        &mut self,
        value: f32,
        end: f64,
    ) -> Result<(), AudioError> {
        if value == 0.0 {
            return Err(AudioError::ZeroRampTarget(value));
        }
        self.insert(AutomationEvent::ExponentialRamp { value, end });
        Ok(())
    }

    fn insert(&mut self, ev: AutomationEvent) {
        // Stable: events at equal times keep insertion order.
        let idx = self.events.partition_point(|e| e.time() <= ev.time());
        self.events.insert(idx, ev);
    }

    /// Intrinsic value at `time` (ignores any audio-rate inputs).
    pub fn value_at(&self, time: f64) -> f32 {
        let mut prev_value = self.default;
        let mut prev_time = 0.0_f64;
        for ev in &self.events {
            let ev_time = ev.time();
            if time < ev_time {
                return match *ev {
                    AutomationEvent::SetValue { .. } => prev_value,
                    AutomationEvent::ExponentialRamp { value, end } => {
                        let span = end - prev_time;
                        if span <= 0.0 || time < prev_time {
                            return prev_value;
                        }
                        exponential_step(prev_value, value, ((time - prev_time) / span) as f32)
                    }
                };
            }
            prev_value = ev.value();
            prev_time = ev_time;
        }
        prev_value
    }
}

/// `v0 * (v1 / v0)^k`; holds `v0` when the endpoints are zero or straddle zero.
#[inline]
pub(crate) fn exponential_step(v0: f32, v1: f32, k: f32) -> f32 {
    if v0 == 0.0 || v0.signum() != v1.signum() {
        return v0;
    }
    v0 * (v1 / v0).powf(k)
}
