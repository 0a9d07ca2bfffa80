//! Cycle-accurate sine/cosine generator.
//!
//! One call to [`Generator::tick`] is one rising clock edge. All registers
//! sample their pre-edge inputs and update together; the implementation
//! gets that by evaluating stages from the output back towards the phase
//! accumulator.
//!
//! # Pipeline
//!
//! ```text
//! edge   0        1           2            2+k            3+k
//!      phase ─► address ─► table read ─► MAC stages ─► output regs
//!        │      quadrant ───────── delay chain ─────────►   ▲
//!        └──────────────────────────────────────────────────┘
//! ```
//!
//! `k` is 0, 2 or 5 (see [`PipelineLatency`]). Sample `N` reaches the
//! outputs exactly `total()` edges after its phase was latched.
//!
//! # Example
//!
//! ```
//! use sincos_nco::device::{GeneratorParams, Variant};
//! use sincos_nco::emu::Generator;
//!
//! let params = GeneratorParams::new(16, 14, 9, Variant::Generic).unwrap();
//! let mut gen = Generator::new(params);
//! gen.tick(true, false); // reset: phase 0 latched
//! for _ in 0..gen.latency().total() {
//!     gen.tick(false, true);
//! }
//! let out = gen.output().unwrap();
//! assert_eq!((out.sin, out.cos), (0, 32767));
//! ```

use std::sync::Arc;

use super::interpolator::{Interpolator, TaylorInterpolator};
use super::phase::PhaseAccumulator;
use crate::device::{
    mapper_for, AddressMapper, GeneratorParams, MappedPhase, ParamError, Quadrant, SinCos,
    SinCosTable, TableEntry,
};
use crate::timing::{DelayLine, PipelineLatency};

/// Interpolation unit plus the register stages it occupies.
#[derive(Debug)]
struct InterpolationStage {
    unit: Box<dyn Interpolator>,
    stages: DelayLine<SinCos>,
}

/// Pipelined fixed-point sine/cosine generator.
#[derive(Debug)]
pub struct Generator {
    params: GeneratorParams,
    latency: PipelineLatency,
    table: Arc<SinCosTable>,
    mapper: Box<dyn AddressMapper>,

    /// Phase accumulator.
    phase: PhaseAccumulator,
    /// Address register (address and remainder of the mapped phase).
    address_reg: MappedPhase,
    /// Registered table output.
    sample_reg: TableEntry,
    /// Remainder travelling alongside `sample_reg`.
    remainder_reg: u64,
    /// Present only when the configuration interpolates.
    interpolation: Option<InterpolationStage>,
    /// Quadrant of each in-flight sample.
    quadrant_chain: DelayLine<Quadrant>,
    /// Output registers.
    output_reg: SinCos,

    /// Edges since the last reset (saturating).
    since_reset: u64,
    /// Edges since construction.
    total_cycles: u64,
}

impl Generator {
    /// Build a generator with the stock interpolator.
    pub fn new(params: GeneratorParams) -> Self {
        let latency = PipelineLatency::for_params(&params);
        let interpolator: Option<Box<dyn Interpolator>> = if params.strategy().interpolates() {
            Some(Box::new(TaylorInterpolator::new(
                &params,
                latency.interpolation_stages(),
            )))
        } else {
            None
        };
        Self::assemble(params, latency, interpolator)
    }

    /// Build a generator around a custom interpolation unit.
    ///
    /// Fails if the configuration does not interpolate, or if the unit's
    /// latency differs from the stage count the quadrant chain is sized for.
    pub fn with_interpolator(
        params: GeneratorParams,
        interpolator: Box<dyn Interpolator>,
    ) -> Result<Self, ParamError> {
        if !params.strategy().interpolates() {
            return Err(ParamError::InterpolationUnused);
        }
        let latency = PipelineLatency::for_params(&params);
        if interpolator.latency() != latency.interpolation_stages() {
            return Err(ParamError::LatencyMismatch {
                expected: latency.interpolation_stages(),
                actual: interpolator.latency(),
            });
        }
        Ok(Self::assemble(params, latency, Some(interpolator)))
    }

    fn assemble(
        params: GeneratorParams,
        latency: PipelineLatency,
        interpolator: Option<Box<dyn Interpolator>>,
    ) -> Self {
        let table = Arc::new(SinCosTable::generate(
            params.data_width(),
            params.table_address_width(),
        ));
        let mapper = mapper_for(&params);

        let interpolation = interpolator.map(|unit| InterpolationStage {
            stages: DelayLine::new(latency.interpolation_stages() as usize, SinCos::default()),
            unit,
        });

        log::debug!(
            "Generator {}: mapper={} interpolator={} latency={} memory={:?}",
            params,
            mapper.name(),
            interpolation
                .as_ref()
                .map(|i| i.unit.name())
                .unwrap_or("bypass"),
            latency.total(),
            params.memory_style()
        );

        Self {
            phase: PhaseAccumulator::new(params.phase_width()),
            address_reg: MappedPhase::default(),
            sample_reg: TableEntry::default(),
            remainder_reg: 0,
            interpolation,
            quadrant_chain: DelayLine::new(latency.quadrant_delay() as usize, Quadrant::First),
            output_reg: SinCos::default(),
            since_reset: 0,
            total_cycles: 0,
            params,
            latency,
            table,
            mapper,
        }
    }

    /// Configuration.
    #[inline]
    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Pipeline latency for this configuration.
    #[inline]
    pub fn latency(&self) -> PipelineLatency {
        self.latency
    }

    /// Shared handle to the lookup table.
    pub fn table(&self) -> Arc<SinCosTable> {
        Arc::clone(&self.table)
    }

    /// Current accumulator value.
    #[inline]
    pub fn phase(&self) -> u64 {
        self.phase.value()
    }

    /// Edges clocked since construction.
    #[inline]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Whether the sample at the outputs descends from a phase latched at
    /// or after the last reset.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.since_reset >= self.latency.total() as u64
    }

    /// Output registers, or `None` while the pipeline is still filling.
    #[inline]
    pub fn output(&self) -> Option<SinCos> {
        self.is_valid().then_some(self.output_reg)
    }

    /// Output registers as they are, valid or not.
    #[inline]
    pub fn raw_output(&self) -> SinCos {
        self.output_reg
    }

    /// One rising clock edge.
    ///
    /// `reset` is synchronous and only clears the phase accumulator; the
    /// other stages keep their contents and keep draining. `phase_enable`
    /// gates the accumulator only.
    ///
    /// Returns the output registers after the edge.
    pub fn tick(&mut self, reset: bool, phase_enable: bool) -> SinCos {
        let width = self.params.data_width();

        // Output registers: reconstruct the refined pair with its own quadrant.
        let refined = match &self.interpolation {
            Some(stage) => stage.stages.output(),
            None => SinCos::from(self.sample_reg),
        };
        self.output_reg = self.quadrant_chain.output().reconstruct(refined, width);

        // Interpolation stages.
        if let Some(stage) = self.interpolation.as_mut() {
            let result = stage.unit.refine(self.sample_reg, self.remainder_reg);
            stage.stages.clock(result);
        }

        // Table read.
        self.sample_reg = self.table.get(self.address_reg.address);
        self.remainder_reg = self.address_reg.remainder;

        // Address register and quadrant capture.
        let mapped = self.mapper.map(self.phase.value());
        self.address_reg = mapped;
        self.quadrant_chain.clock(mapped.quadrant);

        // Phase accumulator.
        self.phase.tick(reset, phase_enable);

        if reset {
            self.since_reset = 0;
        } else {
            self.since_reset = self.since_reset.saturating_add(1);
        }
        self.total_cycles += 1;

        log::trace!(
            "cycle {}: phase={} sin={} cos={}",
            self.total_cycles,
            self.phase.value(),
            self.output_reg.sin,
            self.output_reg.cos
        );

        self.output_reg
    }

    /// Synchronous reset edge with the accumulator held.
    pub fn reset(&mut self) -> SinCos {
        self.tick(true, false)
    }

    /// Clock `cycles` enabled edges and collect the outputs.
    pub fn run(&mut self, cycles: usize) -> Vec<SinCos> {
        (0..cycles).map(|_| self.tick(false, true)).collect()
    }

    /// Stream of valid samples.
    ///
    /// Resets, fills the pipeline, then yields `(phase, output)` once per
    /// enabled edge, where `phase` is the accumulator value the output was
    /// computed from. Never ends; use `take`.
    pub fn samples(&mut self) -> Samples<'_> {
        self.reset();
        for _ in 1..self.latency.total() {
            self.tick(false, true);
        }
        Samples {
            generator: self,
            next_phase: 0,
        }
    }
}

/// Iterator returned by [`Generator::samples`].
#[derive(Debug)]
pub struct Samples<'a> {
    generator: &'a mut Generator,
    next_phase: u64,
}

impl Iterator for Samples<'_> {
    type Item = (u64, SinCos);

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.generator.tick(false, true);
        let phase = self.next_phase;
        self.next_phase = (self.next_phase + 1) % self.generator.phase.period();
        Some((phase, out))
    }
}
