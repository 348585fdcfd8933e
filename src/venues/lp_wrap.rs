//! Pool-share wrap/unwrap adapter.

use std::any::Any;

use num_bigint::BigUint;

use crate::{
    errors::SwapError,
    models::AssetId,
    venues::{check_floor, errors::VenueError, take_fee, VenueAdapter, VenueFill, VenueKind, BPS},
};

/// Converts between a liquidity-pool share asset and the synthetic assets it
/// represents.
///
/// Shares redeem pro rata against the primary reserve. When the requested
/// synthetic is not the primary one, the venue routes the primary amount
/// through its inner pool or exchange adapter after unwrapping (or before
/// wrapping). The inner adapter is part of this venue's own state.
#[derive(Debug, Clone)]
pub struct LpWrap {
    share: AssetId,
    primary: AssetId,
    total_shares: BigUint,
    reserve: BigUint,
    fee_bps: u32,
    inner: Box<dyn VenueAdapter>,
}

impl LpWrap {
    /// Panics if `fee_bps` is not below [`BPS`] or `inner` is not a pool or
    /// exchange adapter.
    pub fn new(
        share: AssetId,
        primary: AssetId,
        total_shares: BigUint,
        reserve: BigUint,
        fee_bps: u32,
        inner: Box<dyn VenueAdapter>,
    ) -> Self {
        assert!(fee_bps < BPS, "fee must be below {BPS} bps");
        assert!(
            matches!(inner.kind(), VenueKind::StableSwapPool | VenueKind::SynthExchange),
            "inner venue must be a pool or exchange, got {}",
            inner.kind()
        );
        Self { share, primary, total_shares, reserve, fee_bps, inner }
    }

    pub fn total_shares(&self) -> &BigUint {
        &self.total_shares
    }

    pub fn reserve(&self) -> &BigUint {
        &self.reserve
    }

    fn backed(&self) -> Result<(), VenueError> {
        if self.total_shares == BigUint::ZERO || self.reserve == BigUint::ZERO {
            return Err(VenueError::InsufficientLiquidity { needed: BigUint::ZERO });
        }
        Ok(())
    }

    /// Primary synth redeemed for `shares`, net of the wrap fee. The fee
    /// stays in the reserve, accruing to remaining holders.
    fn unwrap_out(&self, shares: &BigUint) -> Result<BigUint, VenueError> {
        self.backed()?;
        let gross = shares * &self.reserve / &self.total_shares;
        if gross >= self.reserve {
            return Err(VenueError::InsufficientLiquidity { needed: gross });
        }
        Ok(take_fee(&gross, self.fee_bps))
    }

    /// Shares minted for a primary synth amount, net of the wrap fee.
    fn wrap_out(&self, primary_amount: &BigUint) -> Result<BigUint, VenueError> {
        self.backed()?;
        let gross = primary_amount * &self.total_shares / &self.reserve;
        Ok(take_fee(&gross, self.fee_bps))
    }
}

impl VenueAdapter for LpWrap {
    fn kind(&self) -> VenueKind {
        VenueKind::LpWrap
    }

    fn quote(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
    ) -> Result<BigUint, SwapError> {
        if asset_in == &self.share {
            let net = self.unwrap_out(amount_in)?;
            if asset_out == &self.primary {
                return Ok(net);
            }
            return self.inner.quote(&self.primary, asset_out, &net);
        }
        if asset_out == &self.share {
            let primary_amount = if asset_in == &self.primary {
                amount_in.clone()
            } else {
                self.inner.quote(asset_in, &self.primary, amount_in)?
            };
            return Ok(self.wrap_out(&primary_amount)?);
        }
        Err(VenueError::AssetNotInVenue { kind: VenueKind::LpWrap, asset: *asset_in }.into())
    }

    fn execute(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
        min_out: &BigUint,
    ) -> Result<VenueFill, SwapError> {
        let mut next = self.clone();
        let amount_out = if asset_in == &self.share {
            let net = self.unwrap_out(amount_in)?;
            next.total_shares -= amount_in;
            next.reserve -= &net;
            if asset_out == &self.primary {
                net
            } else {
                let fill = self
                    .inner
                    .execute(&self.primary, asset_out, &net, &BigUint::ZERO)?;
                next.inner = fill.new_state;
                fill.amount_out
            }
        } else if asset_out == &self.share {
            let primary_amount = if asset_in == &self.primary {
                amount_in.clone()
            } else {
                let fill = self
                    .inner
                    .execute(asset_in, &self.primary, amount_in, &BigUint::ZERO)?;
                next.inner = fill.new_state;
                fill.amount_out
            };
            let shares = self.wrap_out(&primary_amount)?;
            next.reserve += &primary_amount;
            next.total_shares += &shares;
            shares
        } else {
            return Err(
                VenueError::AssetNotInVenue { kind: VenueKind::LpWrap, asset: *asset_in }.into()
            );
        };
        check_floor(&amount_out, min_out)?;
        Ok(VenueFill { amount_out, new_state: Box::new(next) })
    }

    fn clone_box(&self) -> Box<dyn VenueAdapter> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
