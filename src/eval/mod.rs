pub mod runner;
pub mod tuning;

pub use runner::{EvalMetrics, EvalRunner, OutcomeSample};
pub use tuning::WeightTuner;
