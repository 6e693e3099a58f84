//! # ambassador-rs: Response Views for the Ambassador Referral Graph
//!
//! Ambassadors recruit triplers, own payout accounts and get paid. All of it
//! lives in a property graph. This crate turns those graph nodes into the
//! plain JSON objects the API returns.
//!
//! ## Design Principles
//!
//! 1. **Views are pure**: `Entity` in, serializable struct out. No I/O.
//! 2. **Typed field sets**: each view struct *is* its field allow-list.
//! 3. **Decode once**: JSON-in-a-string properties become typed values in
//!    `decode`, and malformed ones are errors, not silent nulls.
//! 4. **Store at arm's length**: `StorageBackend` + `hydrate` fetch nodes
//!    and edges; views only walk what was fetched, in store order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ambassador_rs::{hydrate, FraudAssessor, NodeId, Serializer, ViewConfig, Entity};
//! use ambassador_rs::storage::MemoryBackend;
//!
//! struct Unlocked;
//! impl FraudAssessor for Unlocked {
//!     fn is_locked(&self, _: &Entity) -> ambassador_rs::Result<bool> { Ok(false) }
//!     fn trust_factors(&self, _: &Entity) -> ambassador_rs::Result<serde_json::Value> {
//!         Ok(serde_json::Value::Null)
//!     }
//! }
//!
//! # async fn example() -> ambassador_rs::Result<()> {
//! let backend = MemoryBackend::new();
//! let ambassador = hydrate::load(&backend, NodeId(1)).await?;
//!
//! let views = Serializer::new(ViewConfig::from_env()?, Unlocked);
//! let body = serde_json::to_string(&views.ambassador(&ambassador)?)?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod decode;
pub mod format;
pub mod resolve;
pub mod schema;
pub mod fraud;
pub mod views;
pub mod config;
pub mod storage;
pub mod tx;
pub mod hydrate;
pub mod shared;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Node, Relationship, Value, PropertyMap, Entity, Edge, Record,
    NodeId, RelId, Direction,
};

// ============================================================================
// Re-exports: Views
// ============================================================================

pub use views::{
    Serializer, AmbassadorView, AmbassadorAdminView, TriplerView, TriplerCsvView,
    NearbyTriplerView, PayoutView, AccountView,
    account, serialize_triplee, serialize_triplee_for_csv,
};
pub use decode::{Address, Triplee};
pub use format::{serialize_address, serialize_name, PhoneRegion};
pub use fraud::FraudAssessor;
pub use config::ViewConfig;

// ============================================================================
// Re-exports: Storage / services
// ============================================================================

pub use storage::StorageBackend;
pub use tx::{Transaction, TxMode, TxId};
pub use shared::{check_address, Geocoder, Coordinates, Caller, CheckAddressRequest, CheckAddressResponse};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("Malformed JSON in field `{field}`: {source}")]
    MalformedField {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transaction error: {0}")]
    TxError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
