//! Oracle-priced synthetic asset exchange adapter.

use std::{
    any::Any,
    collections::{HashMap, HashSet},
};

use num_bigint::BigUint;

use crate::{
    errors::SwapError,
    models::AssetId,
    venues::{check_floor, errors::VenueError, take_fee, VenueAdapter, VenueFill, VenueKind, BPS},
};

/// Converts between synthetic assets at oracle rates, with a venue fee
/// subtracted from output.
///
/// Rates are USD prices per asset unit at the crate's 1e18 fixed point
/// ([`crate::venues::RATE_SCALE`]). The exchange holds no reserves:
/// synthetic supply expands and contracts with each conversion, so
/// executing does not change its pricing state.
#[derive(Debug, Clone)]
pub struct SynthExchange {
    rates: HashMap<AssetId, BigUint>,
    fee_bps: u32,
    stale: HashSet<AssetId>,
}

impl SynthExchange {
    /// Panics if `fee_bps` is not below [`BPS`].
    pub fn new(rates: HashMap<AssetId, BigUint>, fee_bps: u32) -> Self {
        assert!(fee_bps < BPS, "fee must be below {BPS} bps");
        Self { rates, fee_bps, stale: HashSet::new() }
    }

    /// Flag an asset's oracle rate as stale; conversions touching it fail
    /// until the flag is lifted by a fresh venue state.
    pub fn mark_stale(&mut self, asset: AssetId) {
        self.stale.insert(asset);
    }

    fn rate(&self, asset: &AssetId) -> Result<&BigUint, VenueError> {
        if self.stale.contains(asset) {
            return Err(VenueError::StaleRate(*asset));
        }
        self.rates
            .get(asset)
            .ok_or(VenueError::AssetNotInVenue { kind: VenueKind::SynthExchange, asset: *asset })
    }

    /// `gross = in * rate_in / rate_out` (floored), then the venue fee comes
    /// off the output.
    fn amount_out(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
    ) -> Result<BigUint, VenueError> {
        let rate_in = self.rate(asset_in)?;
        let rate_out = self.rate(asset_out)?;
        let gross = amount_in * rate_in / rate_out;
        Ok(take_fee(&gross, self.fee_bps))
    }
}

impl VenueAdapter for SynthExchange {
    fn kind(&self) -> VenueKind {
        VenueKind::SynthExchange
    }

    fn quote(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
    ) -> Result<BigUint, SwapError> {
        Ok(self.amount_out(asset_in, asset_out, amount_in)?)
    }

    fn execute(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
        min_out: &BigUint,
    ) -> Result<VenueFill, SwapError> {
        let amount_out = self.amount_out(asset_in, asset_out, amount_in)?;
        check_floor(&amount_out, min_out)?;
        Ok(VenueFill { amount_out, new_state: Box::new(self.clone()) })
    }

    fn clone_box(&self) -> Box<dyn VenueAdapter> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
