//! Izhikevich spiking neuron, used to produce traces for [`crate::plot::plot_spikes`].

use serde::{Deserialize, Serialize};

/// One sample of a spike train: time, input current, membrane potential,
/// recovery variable and whether the neuron fired on this step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeSample {
    pub t: f64,
    pub current: f64,
    pub potential: f64,
    pub recovery: f64,
    pub fired: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IzParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IzPreset {
    RegularSpiking,
    IntrinsicallyBursting,
    Chattering,
    FastSpiking,
    ThalamoCortical,
    Resonator,
    LowThresholdSpiking,
}

impl IzPreset {
    pub fn params(self) -> IzParams {
        let (a, b, c, d) = match self {
            Self::RegularSpiking => (0.02, 0.20, -65.0, 8.00),
            Self::IntrinsicallyBursting => (0.02, 0.20, -55.0, 4.00),
            Self::Chattering => (0.02, 0.20, -50.0, 2.00),
            Self::FastSpiking => (0.10, 0.20, -65.0, 2.00),
            Self::ThalamoCortical => (0.02, 0.25, -65.0, 0.05),
            Self::Resonator => (0.10, 0.25, -65.0, 2.00),
            Self::LowThresholdSpiking => (0.02, 0.25, -65.0, 2.00),
        };
        IzParams { a, b, c, d }
    }
}

const SPIKE_THRESHOLD_MV: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct IzNeuron {
    params: IzParams,
    pub v: f64,
    pub u: f64,
    pub fired: f64,
    pub current: f64,
}

impl IzNeuron {
    pub fn new(params: IzParams) -> Self {
        let v = params.c;
        Self {
            params,
            v,
            u: params.b * v,
            fired: 0.0,
            current: 0.0,
        }
    }

    /// Advance by `dt_ms`. The potential uses two half steps for stability.
    pub fn advance(&mut self, dt_ms: f64) {
        let IzParams { a, b, c, d } = self.params;
        for _ in 0..2 {
            let dv = 0.04 * self.v * self.v + 5.0 * self.v + 140.0 - self.u + self.current;
            self.v += 0.5 * dt_ms * dv;
        }
        self.u += dt_ms * a * (b * self.v - self.u);

        self.fired = 0.0;
        if self.v > SPIKE_THRESHOLD_MV || !self.v.is_finite() {
            self.fired = 1.0;
            self.v = c;
            self.u += d;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.params);
    }
}

/// Drive a fresh neuron for `steps` steps of `dt_ms`, setting the input
/// current from `current_at(step)` before each step.
pub fn simulate(
    params: IzParams,
    steps: usize,
    dt_ms: f64,
    mut current_at: impl FnMut(usize) -> f64,
) -> Vec<SpikeSample> {
    let mut neuron = IzNeuron::new(params);
    let mut trace = Vec::with_capacity(steps);
    for i in 0..steps {
        neuron.current = current_at(i);
        trace.push(SpikeSample {
            t: i as f64 * dt_ms,
            current: neuron.current,
            potential: neuron.v,
            recovery: neuron.u,
            fired: neuron.fired,
        });
        neuron.advance(dt_ms);
    }
    trace
}

/// Current that is `amplitude` between `on` and `off` (inclusive) and 0 elsewhere.
pub fn step_current(amplitude: f64, on: usize, off: usize) -> impl Fn(usize) -> f64 {
    move |i| if i < on || i > off { 0.0 } else { amplitude }
}
