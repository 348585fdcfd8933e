//! Venue-specific failure modes.

use num_bigint::BigUint;
use thiserror::Error;

use crate::{models::AssetId, venues::VenueKind};

/// Rejections originating inside a venue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenueError {
    #[error("asset {asset} is not handled by this {kind} venue")]
    AssetNotInVenue { kind: VenueKind, asset: AssetId },

    #[error("insufficient liquidity to pay out {needed}")]
    InsufficientLiquidity { needed: BigUint },

    #[error("oracle rate for {0} is stale")]
    StaleRate(AssetId),

    #[error("venue is paused")]
    Paused,
}
