//! Data access for the Snowday engine.
//!
//! Responsibilities:
//! - Resolve postal codes to coordinates over HTTP ([`HttpGeocoder`]).
//! - Fetch and normalise Open-Meteo forecasts ([`HttpForecastProvider`]).
//! - Load the curated closure profile table ([`JsonProfileStore`]).
//!
//! Boundaries:
//! - Do not encode scoring rules (live in `snowday-scorer`).
//! - Convert upstream units here so the core only sees °F, millimetres and
//!   unit-tagged snowfall.
//!
//! Invariants:
//! - Providers are `Send + Sync` and hold no mutable state.
//! - A failed request is reported once; nothing is retried.

#![forbid(unsafe_code)]

mod forecast;
mod fs;
mod geocode;
mod http;
mod open_meteo;
mod profiles;

pub use forecast::{DEFAULT_FORECAST_URL, HttpForecastProvider};
pub use geocode::{DEFAULT_GEOCODER_URL, HttpGeocoder};
pub use http::{DEFAULT_USER_AGENT, HttpProviderConfig, ProviderBuildError};
pub use profiles::{JsonProfileStore, ProfileLoadError};
