//! Caller-facing error type shared across the conversion core.

use num_bigint::BigUint;
use thiserror::Error;

use crate::{
    chain::errors::RouteError,
    ledger::LedgerError,
    models::{AssetId, VenueRef},
    venues::errors::VenueError,
};

/// Every failure a conversion entry point can surface.
///
/// Failures propagate synchronously and are never retried internally: venue
/// state may have moved between calls and a blind retry would mask a price
/// change the caller should see.
#[derive(Error, Debug)]
pub enum SwapError {
    /// The registry (or a venue directory) holds no entry for this asset.
    #[error("unknown asset: {0}")]
    UnknownAsset(AssetId),

    /// A mapping for this wrapped asset is already registered.
    #[error("mapping already registered for {0}")]
    DuplicateMapping(AssetId),

    /// The realized output fell below the caller-specified floor.
    #[error("slippage exceeded: realized {realized} below floor {floor}")]
    SlippageExceeded { realized: BigUint, floor: BigUint },

    /// A route leg references a venue the book does not hold.
    #[error("unknown venue: {0}")]
    UnknownVenue(VenueRef),

    /// The underlying venue rejected the call.
    #[error("venue failure: {0}")]
    Venue(#[from] VenueError),

    /// The route could not be constructed or is inconsistent with the book.
    #[error("route construction: {0}")]
    Route(#[from] RouteError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
