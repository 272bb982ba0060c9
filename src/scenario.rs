//! Scenario runner for batch projections and rate sweeps
//!
//! Holds a base set of rate assumptions, then runs many households or many
//! rate scenarios through the engine. Each projection is independent, so
//! batches are evaluated in parallel.

use rayon::prelude::*;

use crate::assumptions::{NamedRates, RateAssumptions};
use crate::inputs::{Input, NamedInput};
use crate::projection::{compute_projection, ProjectionResult};

/// Runner with pre-set base rate assumptions
///
/// # Example
/// ```
/// use retirement_projection::{Input, ScenarioRunner};
///
/// let runner = ScenarioRunner::new();
/// let result = runner.run(&Input::default());
/// assert!(result.what_you_will_have > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Rates substituted by `run_with_base_assumptions`
    base_assumptions: RateAssumptions,
}

impl ScenarioRunner {
    /// Create runner with planning-default assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: RateAssumptions::default_planning(),
        }
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: RateAssumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Project one household exactly as given
    pub fn run(&self, input: &Input) -> ProjectionResult {
        compute_projection(input)
    }

    /// Project one household under the runner's base assumptions
    pub fn run_with_base_assumptions(&self, input: &Input) -> ProjectionResult {
        self.run_with_assumptions(input, &self.base_assumptions)
    }

    /// Project one household under the given assumptions
    pub fn run_with_assumptions(&self, input: &Input, assumptions: &RateAssumptions) -> ProjectionResult {
        compute_projection(&input.with_assumptions(*assumptions))
    }

    /// Project many households; results keep input order
    pub fn run_batch(&self, inputs: &[Input]) -> Vec<ProjectionResult> {
        inputs.par_iter().map(compute_projection).collect()
    }

    /// Project many labelled households; results keep input order
    pub fn run_named_batch(&self, inputs: &[NamedInput]) -> Vec<(String, ProjectionResult)> {
        let results: Vec<_> = inputs
            .par_iter()
            .map(|named| (named.name.clone(), compute_projection(&named.input)))
            .collect();
        log::info!("Projected {} households", results.len());
        results
    }

    /// Project one household under each rate scenario; results keep scenario order
    pub fn run_scenarios(&self, input: &Input, scenarios: &[NamedRates]) -> Vec<(String, ProjectionResult)> {
        scenarios
            .par_iter()
            .map(|scenario| {
                (
                    scenario.name.clone(),
                    self.run_with_assumptions(input, &scenario.rates),
                )
            })
            .collect()
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &RateAssumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut RateAssumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
