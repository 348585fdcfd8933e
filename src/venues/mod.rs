//! Venue adapters: one liquidity venue each, behind a uniform contract.
//!
//! Every adapter exposes `quote` (pure, floor-division rounding) and
//! `execute` (realizes the conversion and yields the venue's successor
//! state). The two must agree exactly when no state change happens in
//! between; that consistency is what makes view-only quoting bit-identical
//! to committing execution.

pub mod errors;
pub mod lp_wrap;
pub mod mint_burn;
pub mod stable_pool;
pub mod synth_exchange;

use std::{any::Any, fmt};

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{errors::SwapError, models::AssetId};

/// Basis-point denominator shared by every venue fee parameter.
pub const BPS: u32 = 10_000;

/// Fixed-point scale of oracle rates.
pub const RATE_SCALE: u128 = 10u128.pow(18);

/// Tag distinguishing the supported venue kinds.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueKind {
    StableSwapPool,
    SynthExchange,
    CollateralMintBurn,
    LpWrap,
}

/// Realized result of a committing venue call.
///
/// Venues do not mutate in place: a successful call yields the successor
/// state, which the enclosing transaction scope installs on commit.
#[derive(Debug)]
pub struct VenueFill {
    pub amount_out: BigUint,
    pub new_state: Box<dyn VenueAdapter>,
}

/// One external liquidity venue.
pub trait VenueAdapter: fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> VenueKind;

    /// Price `amount_in` of `asset_in` in units of `asset_out`.
    ///
    /// Pure and side-effect free. Uses the exact rounding of the venue:
    /// floor division throughout, fractional remainders truncated toward
    /// zero. Two calls with no intervening state change return identical
    /// results.
    fn quote(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
    ) -> Result<BigUint, SwapError>;

    /// Perform the conversion.
    ///
    /// Fails with [`SwapError::SlippageExceeded`] when the realized output
    /// is below `min_out`; equality passes. With no intervening state
    /// change, `execute(..).amount_out == quote(..)`.
    fn execute(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
        min_out: &BigUint,
    ) -> Result<VenueFill, SwapError>;

    /// Clone the venue state as a trait object.
    fn clone_box(&self) -> Box<dyn VenueAdapter>;

    /// Downcast access to the concrete venue type.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn VenueAdapter> {
    fn clone(&self) -> Box<dyn VenueAdapter> {
        self.clone_box()
    }
}

/// Deduct a basis-point fee from a gross amount, flooring.
pub(crate) fn take_fee(gross: &BigUint, fee_bps: u32) -> BigUint {
    gross * (BPS - fee_bps) / BPS
}

/// Enforce a venue-level slippage floor; equality passes.
pub(crate) fn check_floor(amount_out: &BigUint, min_out: &BigUint) -> Result<(), SwapError> {
    if amount_out < min_out {
        return Err(SwapError::SlippageExceeded {
            realized: amount_out.clone(),
            floor: min_out.clone(),
        });
    }
    Ok(())
}
