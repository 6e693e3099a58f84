//! Shared ambassador/tripler services.
//!
//! Transport-free: the HTTP layer maps [`Error::Unauthorized`] and
//! [`Error::BadRequest`] onto 401/400 and serializes the response as JSON.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A geocoded point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Address geocoding provider.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Coordinates for a free-form address, `None` when it cannot be located.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>>;
}

/// The authenticated caller, as resolved by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAddressRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAddressResponse {
    pub valid: bool,
}

/// `valid` is true iff the geocoder can place the address.
pub async fn check_address<G>(
    caller: Option<&Caller>,
    geocoder: &G,
    request: &CheckAddressRequest,
) -> Result<CheckAddressResponse>
where
    G: Geocoder + ?Sized,
{
    let Some(caller) = caller else {
        return Err(Error::Unauthorized("Permission denied.".into()));
    };
    let Some(address) = request.address.as_deref().filter(|a| !a.is_empty()) else {
        return Err(Error::BadRequest("Address not provided".into()));
    };

    let coordinates = geocoder.geocode(address).await?;
    tracing::debug!(caller = %caller.id, valid = coordinates.is_some(), "address checked");
    Ok(CheckAddressResponse { valid: coordinates.is_some() })
}
