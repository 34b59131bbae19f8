//! Location collaborator boundary
//!
//! The forecast pipeline needs a coordinate but never fails without one:
//! when the provider cannot resolve a location, the fetch proceeds with the
//! documented fallback coordinates instead.

use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

/// A geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Fallback location used when no coordinate can be resolved (Moscow)
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    latitude: 55.7558,
    longitude: 37.6173,
};

/// Errors signalled by a location provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user denied location access
    #[error("Location permission denied")]
    Denied,

    /// No location is available
    #[error("Location unavailable")]
    Unavailable,
}

/// Asynchronous source of the device's current coordinates
///
/// At most one pending request is meaningful at a time; a provider may
/// coalesce or supersede repeated calls. Errors are not fatal to a fetch
/// cycle: the controller degrades them to the fallback location.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Requests the current location, resolving with exactly one outcome.
    async fn request_location(&self) -> Result<Coordinates, LocationError>;
}

/// Location provider backed by an explicitly managed last-known coordinate
///
/// Constructed once and injected into the controller; the owning shell
/// pushes platform location updates into it via [`LastKnownLocation::set`].
#[derive(Debug, Default)]
pub struct LastKnownLocation {
    coordinates: RwLock<Option<Coordinates>>,
}

impl LastKnownLocation {
    /// Creates a provider with no known location yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider seeded with a known coordinate.
    pub fn with_coordinates(coordinates: Coordinates) -> Self {
        Self {
            coordinates: RwLock::new(Some(coordinates)),
        }
    }

    /// Records the most recent known coordinate.
    pub fn set(&self, coordinates: Coordinates) {
        *self
            .coordinates
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(coordinates);
    }

    /// Forgets the stored coordinate.
    pub fn clear(&self) {
        *self
            .coordinates
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[async_trait]
impl LocationProvider for LastKnownLocation {
    async fn request_location(&self) -> Result<Coordinates, LocationError> {
        self.coordinates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ok_or(LocationError::Unavailable)
    }
}
