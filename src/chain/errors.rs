//! Error types for route construction and execution.

use thiserror::Error;

use crate::{
    models::{AssetId, VenueRef},
    venues::VenueKind,
};

/// Route construction or route/book consistency failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("route has no legs")]
    EmptyRoute,

    /// The amount-bearing input asset of a leg does not match what the
    /// previous leg produces.
    #[error("leg {index} consumes {declared} but the previous leg produces {produced}")]
    DiscontinuousLegs { index: usize, produced: AssetId, declared: AssetId },

    /// A leg's declared venue kind does not match the venue the book
    /// resolves for it.
    #[error("leg {index} declares {declared} but venue {venue} is {actual}")]
    VenueKindMismatch { index: usize, venue: VenueRef, declared: VenueKind, actual: VenueKind },
}
