//! Fraud-assessment collaborator.
//!
//! The assessment rules live outside this crate. The view layer only asks
//! two questions of an ambassador and treats the answers as opaque.

use crate::model::Entity;
use crate::Result;

/// Side-effect-free fraud lookups for an ambassador.
///
/// Failures propagate to the caller unchanged; the view layer never retries.
pub trait FraudAssessor: Send + Sync {
    /// Whether the ambassador's account is locked.
    fn is_locked(&self, ambassador: &Entity) -> Result<bool>;

    /// Risk signals shown to admins, as a JSON document.
    fn trust_factors(&self, ambassador: &Entity) -> Result<serde_json::Value>;
}

impl<T: FraudAssessor + ?Sized> FraudAssessor for &T {
    fn is_locked(&self, ambassador: &Entity) -> Result<bool> {
        (**self).is_locked(ambassador)
    }

    fn trust_factors(&self, ambassador: &Entity) -> Result<serde_json::Value> {
        (**self).trust_factors(ambassador)
    }
}
