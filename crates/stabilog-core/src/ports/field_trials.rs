//! Field trial port

use crate::domain::field_trial::FieldTrial;

/// Supplies the experiment assignments active in this process.
pub trait FieldTrialProvider: Send + Sync {
    fn field_trials(&self) -> Vec<FieldTrial>;
}
