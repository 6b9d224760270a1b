use super::{AudioBackend, AudioError, Param, Waveform};
use wasm_bindgen::JsValue;
use web_sys as web;

fn js_err(label: &str, e: JsValue) -> AudioError {
    log::error!("{} error: {:?}", label, e);
    AudioError::Web(format!("{label}: {e:?}"))
}

#[derive(Clone, Debug)]
pub enum WebNode {
    Destination(web::AudioDestinationNode),
    Oscillator(web::OscillatorNode),
    Gain(web::GainNode),
    Delay(web::DelayNode),
}

impl WebNode {
    fn audio_node(&self) -> &web::AudioNode {
        match self {
            WebNode::Destination(n) => n,
            WebNode::Oscillator(n) => n,
            WebNode::Gain(n) => n,
            WebNode::Delay(n) => n,
        }
    }

    fn param(&self, param: Param) -> Result<web::AudioParam, AudioError> {
        match (self, param) {
            (WebNode::Oscillator(o), Param::Frequency) => Ok(o.frequency()),
            (WebNode::Gain(g), Param::Gain) => Ok(g.gain()),
            (WebNode::Delay(d), Param::DelayTime) => Ok(d.delay_time()),
            _ => Err(AudioError::MissingParam(param)),
        }
    }

    fn scheduled_source(&self) -> Result<&web::AudioScheduledSourceNode, AudioError> {
        match self {
            WebNode::Oscillator(o) => Ok(o),
            _ => Err(AudioError::Web("only oscillators can be started".into())),
        }
    }
}

/// [`AudioBackend`] over a browser `AudioContext`.
pub struct WebAudioBackend {
    ctx: web::AudioContext,
}

impl WebAudioBackend {
    pub fn open() -> Result<Self, AudioError> {
        let ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
        Ok(Self { ctx })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }
}

impl AudioBackend for WebAudioBackend {
    type Node = WebNode;

    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn destination(&self) -> WebNode {
        WebNode::Destination(self.ctx.destination())
    }

    fn oscillator(&mut self, waveform: Waveform, frequency_hz: f32) -> Result<WebNode, AudioError> {
        let osc = web::OscillatorNode::new(&self.ctx).map_err(|e| js_err("OscillatorNode", e))?;
        match waveform {
            Waveform::Sine => osc.set_type(web::OscillatorType::Sine),
        }
        osc.frequency().set_value(frequency_hz);
        Ok(WebNode::Oscillator(osc))
    }

    fn gain(&mut self, value: f32) -> Result<WebNode, AudioError> {
        let g = web::GainNode::new(&self.ctx).map_err(|e| js_err("GainNode", e))?;
        g.gain().set_value(value);
        Ok(WebNode::Gain(g))
    }

    fn delay(&mut self, max_delay_sec: f64, delay_sec: f32) -> Result<WebNode, AudioError> {
        let d = self
            .ctx
            .create_delay_with_max_delay_time(max_delay_sec)
            .map_err(|e| js_err("DelayNode", e))?;
        d.delay_time().set_value(delay_sec);
        Ok(WebNode::Delay(d))
    }

    fn connect(&mut self, from: &WebNode, to: &WebNode) -> Result<(), AudioError> {
        from.audio_node()
            .connect_with_audio_node(to.audio_node())
            .map(|_| ())
            .map_err(|e| js_err("connect", e))
    }

    fn connect_param(&mut self, from: &WebNode, to: &WebNode, param: Param) -> Result<(), AudioError> {
        let target = to.param(param)?;
        from.audio_node()
            .connect_with_audio_param(&target)
            .map_err(|e| js_err("connect param", e))
    }

    fn set_value_at_time(
        &mut self,
        node: &WebNode,
        param: Param,
        value: f32,
        at: f64,
    ) -> Result<(), AudioError> {
        node.param(param)?
            .set_value_at_time(value, at)
            .map(|_| ())
            .map_err(|e| js_err("setValueAtTime", e))
    }

    fn exponential_ramp_to_value_at_time(
        &mut self,
        node: &WebNode,
        param: Param,
        value: f32,
        end: f64,
    ) -> Result<(), AudioError> {
        if value == 0.0 {
            return Err(AudioError::ZeroRampTarget(value));
        }
        node.param(param)?
            .exponential_ramp_to_value_at_time(value, end)
            .map(|_| ())
            .map_err(|e| js_err("exponentialRampToValueAtTime", e))
    }

    fn start(&mut self, node: &WebNode, at: f64) -> Result<(), AudioError> {
        node.scheduled_source()?
            .start_with_when(at)
            .map_err(|e| js_err("start", e))
    }

    fn stop(&mut self, node: &WebNode, at: f64) -> Result<(), AudioError> {
        node.scheduled_source()?
            .stop_with_when(at)
            .map_err(|e| js_err("stop", e))
    }

    fn suspend(&mut self) -> Result<(), AudioError> {
        // The returned promise is fire-and-forget.
        _ = self.ctx.suspend().map_err(|e| js_err("suspend", e))?;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        _ = self.ctx.resume().map_err(|e| js_err("resume", e))?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        _ = self.ctx.close().map_err(|e| js_err("close", e))?;
        Ok(())
    }
}
