//! Projection engine: savings growth versus the lump sum needed at retirement

mod state;
mod engine;
mod results;
pub mod math;
pub mod trajectory;

pub use state::DrawdownState;
pub use engine::compute_projection;
pub use math::{
    future_value, future_value_annuity, present_value_growing_annuity,
    project_income_at_retirement,
};
pub use results::{ProjectionResult, ProjectionSummary, RetirementStatus};
pub use trajectory::{DataPoint, Trajectory, TrajectoryBuilder};
