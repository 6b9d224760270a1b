use super::{AudioBackend, AudioError, Automation, Param, Waveform};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    Destination,
    Oscillator(Waveform),
    Gain,
    Delay { max_delay_sec: f64 },
}

/// Where a connection lands: a node's input or one of its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Node(NodeId),
    Param(NodeId, Param),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceState {
    Running,
    Suspended,
    Closed,
}

#[derive(Clone, Debug)]
pub struct RecordedNode {
    pub kind: NodeKind,
    pub frequency: Option<Automation>,
    pub gain: Option<Automation>,
    pub delay_time: Option<Automation>,
    pub started_at: Option<f64>,
    pub stopped_at: Option<f64>,
}

impl RecordedNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            frequency: None,
            gain: None,
            delay_time: None,
            started_at: None,
            stopped_at: None,
        }
    }

    pub fn param(&self, param: Param) -> Option<&Automation> {
        match param {
            Param::Frequency => self.frequency.as_ref(),
            Param::Gain => self.gain.as_ref(),
            Param::DelayTime => self.delay_time.as_ref(),
        }
    }

    fn param_mut(&mut self, param: Param) -> Option<&mut Automation> {
        match param {
            Param::Frequency => self.frequency.as_mut(),
            Param::Gain => self.gain.as_mut(),
            Param::DelayTime => self.delay_time.as_mut(),
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Oscillator(_))
    }
}

/// In-memory output device.
///
/// Records every node, connection and scheduled parameter change instead of
/// producing sound. The clock only moves when [`GraphRecorder::advance_clock`]
/// is called, which makes schedules easy to inspect.
#[derive(Clone, Debug)]
pub struct GraphRecorder {
    nodes: Vec<RecordedNode>,
    edges: Vec<(NodeId, Target)>,
    state: DeviceState,
    clock: f64,
    suspend_calls: usize,
    resume_calls: usize,
}

impl Default for GraphRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRecorder {
    pub fn new() -> Self {
        Self {
            nodes: vec![RecordedNode::new(NodeKind::Destination)],
            edges: Vec::new(),
            state: DeviceState::Running,
            clock: 0.0,
            suspend_calls: 0,
            resume_calls: 0,
        }
    }

    /// Advance the device clock; a suspended device does not advance.
    pub fn advance_clock(&mut self, dt_sec: f64) {
        if self.state == DeviceState::Running {
            self.clock += dt_sec.max(0.0);
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn node(&self, id: NodeId) -> Option<&RecordedNode> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[RecordedNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[(NodeId, Target)] {
        &self.edges
    }

    pub fn is_connected(&self, from: NodeId, to: Target) -> bool {
        self.edges.iter().any(|&(f, t)| f == from && t == to)
    }

    /// Intrinsic parameter value at `time`, or `None` if the node lacks it.
    pub fn param_value_at(&self, id: NodeId, param: Param, time: f64) -> Option<f32> {
        self.node(id)?.param(param).map(|a| a.value_at(time))
    }

    /// Oscillators that have a start scheduled and no stop.
    pub fn running_sources(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_source() && n.started_at.is_some() && n.stopped_at.is_none())
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    pub fn suspend_calls(&self) -> usize {
        self.suspend_calls
    }

    pub fn resume_calls(&self) -> usize {
        self.resume_calls
    }

    fn push(&mut self, node: RecordedNode) -> Result<NodeId, AudioError> {
        self.ensure_open()?;
        self.nodes.push(node);
        Ok(NodeId(self.nodes.len() - 1))
    }

    fn ensure_open(&self) -> Result<(), AudioError> {
        if self.state == DeviceState::Closed {
            return Err(AudioError::DeviceClosed);
        }
        Ok(())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut RecordedNode, AudioError> {
        self.nodes.get_mut(id.0).ok_or(AudioError::UnknownNode(id.0))
    }

    fn automation_mut(&mut self, id: NodeId, param: Param) -> Result<&mut Automation, AudioError> {
        self.node_mut(id)?
            .param_mut(param)
            .ok_or(AudioError::MissingParam(param))
    }
}

impl AudioBackend for GraphRecorder {
    type Node = NodeId;

    fn current_time(&self) -> f64 {
        self.clock
    }

    fn destination(&self) -> NodeId {
        NodeId(0)
    }

    fn oscillator(&mut self, waveform: Waveform, frequency_hz: f32) -> Result<NodeId, AudioError> {
        let mut node = RecordedNode::new(NodeKind::Oscillator(waveform));
        node.frequency = Some(Automation::new(frequency_hz));
        self.push(node)
    }

    fn gain(&mut self, value: f32) -> Result<NodeId, AudioError> {
        let mut node = RecordedNode::new(NodeKind::Gain);
        node.gain = Some(Automation::new(value));
        self.push(node)
    }

    fn delay(&mut self, max_delay_sec: f64, delay_sec: f32) -> Result<NodeId, AudioError> {
        let mut node = RecordedNode::new(NodeKind::Delay { max_delay_sec });
        node.delay_time = Some(Automation::new(delay_sec));
        self.push(node)
    }

    fn connect(&mut self, from: &NodeId, to: &NodeId) -> Result<(), AudioError> {
        self.ensure_open()?;
        self.node_mut(*from)?;
        self.node_mut(*to)?;
        self.edges.push((*from, Target::Node(*to)));
        Ok(())
    }

    fn connect_param(&mut self, from: &NodeId, to: &NodeId, param: Param) -> Result<(), AudioError> {
        self.ensure_open()?;
        self.node_mut(*from)?;
        self.automation_mut(*to, param)?;
        self.edges.push((*from, Target::Param(*to, param)));
        Ok(())
    }

    fn set_value_at_time(
        &mut self,
        node: &NodeId,
        param: Param,
        value: f32,
        at: f64,
    ) -> Result<(), AudioError> {
        self.ensure_open()?;
        self.automation_mut(*node, param)?.set_value_at_time(value, at);
        Ok(())
    }

    fn exponential_ramp_to_value_at_time(
        &mut self,
        node: &NodeId,
        param: Param,
        value: f32,
        end: f64,
    ) -> Result<(), AudioError> {
        self.ensure_open()?;
        self.automation_mut(*node, param)?
            .exponential_ramp_to_value_at_time(value, end)
    }

    fn start(&mut self, node: &NodeId, at: f64) -> Result<(), AudioError> {
        self.ensure_open()?;
        self.node_mut(*node)?.started_at = Some(at);
        Ok(())
    }

    fn stop(&mut self, node: &NodeId, at: f64) -> Result<(), AudioError> {
        self.ensure_open()?;
        self.node_mut(*node)?.stopped_at = Some(at);
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), AudioError> {
        self.ensure_open()?;
        self.suspend_calls += 1;
        self.state = DeviceState::Suspended;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        self.ensure_open()?;
        self.resume_calls += 1;
        self.state = DeviceState::Running;
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        self.state = DeviceState::Closed;
        Ok(())
    }
}
