//! Geolocation provider.
//!
//! A terminal has no location API, so the position comes from the command
//! line or the environment. Either way the lookup behaves like a browser's:
//! asked once per mount, it yields one coordinate or a failure, and a failure
//! only means "no coordinates".

use thiserror::Error;
use tiim_core::Coordinate;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("location is unavailable")]
    Unavailable,

    #[error("invalid coordinate {latitude},{longitude}: {reason}")]
    Invalid {
        latitude: f64,
        longitude: f64,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geolocation {
    /// A position given by the user.
    Fixed { latitude: f64, longitude: f64 },
    Unavailable,
}

impl Geolocation {
    /// Builds a provider from optional `--lat` / `--lng` values. Both are
    /// needed; one without the other counts as no location.
    #[must_use]
    pub fn from_args(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Geolocation::Fixed {
                latitude,
                longitude,
            },
            _ => Geolocation::Unavailable,
        }
    }

    /// One-shot position lookup.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Unavailable`] when no position is configured.
    /// - [`GeoError::Invalid`] when the configured position is out of range.
    pub async fn locate(&self) -> Result<Coordinate, GeoError> {
        match *self {
            Geolocation::Unavailable => Err(GeoError::Unavailable),
            Geolocation::Fixed {
                latitude,
                longitude,
            } => validate(latitude, longitude),
        }
    }

    /// [`Geolocation::locate`] with failures folded into `None`.
    pub async fn locate_soft(&self) -> Option<Coordinate> {
        match self.locate().await {
            Ok(coordinate) => {
                tracing::debug!(%coordinate, "location acquired");
                Some(coordinate)
            }
            Err(e) => {
                tracing::debug!(error = %e, "continuing without location");
                None
            }
        }
    }
}

fn validate(latitude: f64, longitude: f64) -> Result<Coordinate, GeoError> {
    let invalid = |reason| GeoError::Invalid {
        latitude,
        longitude,
        reason,
    };
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(invalid("not a finite number"));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(invalid("latitude must be within -90..=90"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(invalid("longitude must be within -180..=180"));
    }
    Ok(Coordinate::new(latitude, longitude))
}
