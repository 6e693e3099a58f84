//! # Response Views
//!
//! Typed, JSON-ready projections of hydrated entities. Each view struct's
//! field set is the list of properties the API exposes for that entity;
//! nothing else on the node leaks through.
//!
//! Views are pure: same entity in, same view out. The only collaborator is
//! the [`FraudAssessor`] consulted for ambassadors.

pub mod account;
pub mod ambassador;
pub mod payout;
pub mod tripler;

use crate::config::ViewConfig;
use crate::format::{self, PhoneRegion};
use crate::fraud::FraudAssessor;
use crate::model::{Record, Value};

pub use account::{account, AccountView};
pub use ambassador::{AmbassadorAdminView, AmbassadorView};
pub use payout::PayoutView;
pub use tripler::{
    serialize_triplee, serialize_triplee_for_csv, NearbyTriplerView, TriplerCsvView, TriplerView,
};

/// Builds views. Holds the display configuration and the fraud collaborator.
#[derive(Debug, Clone)]
pub struct Serializer<F> {
    config: ViewConfig,
    fraud: F,
}

impl<F: FraudAssessor> Serializer<F> {
    pub fn new(config: ViewConfig, fraud: F) -> Self {
        Self { config, fraud }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn fraud(&self) -> &F {
        &self.fraud
    }
}

/// `first last` display name from a record's name fields.
pub(crate) fn display_name<R: Record + ?Sized>(record: &R) -> String {
    format::serialize_name(
        record.get_str("first_name").unwrap_or_default(),
        record.get_str("last_name"),
    )
}

/// National-format phone, or `None` when missing or unparsable.
///
/// A bad number degrades to `None` with a warning instead of failing the view.
pub(crate) fn display_phone<R: Record + ?Sized>(record: &R, region: PhoneRegion) -> Option<String> {
    let raw = record.present("phone").and_then(Value::to_id_string)?;
    match format::format_phone_national(&raw, region) {
        Ok(phone) => Some(phone),
        Err(error) => {
            tracing::warn!(
                id = record.get_str("id").unwrap_or_default(),
                %error,
                "phone number could not be formatted"
            );
            None
        }
    }
}

/// Text form of an id-like property (string or integer).
pub(crate) fn id_string<R: Record + ?Sized>(record: &R, key: &str) -> Option<String> {
    record.get(key).and_then(Value::to_id_string)
}
