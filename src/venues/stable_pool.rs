//! Two-asset liquidity pool adapter.

use std::any::Any;

use num_bigint::BigUint;

use crate::{
    errors::SwapError,
    models::AssetId,
    venues::{check_floor, errors::VenueError, VenueAdapter, VenueFill, VenueKind, BPS},
};

/// A shared liquidity pool holding two member assets, priced by a
/// constant-product invariant with a basis-point fee deducted from input.
///
/// Both assets of a conversion must be members of the pool.
#[derive(Debug, Clone)]
pub struct StableSwapPool {
    assets: [AssetId; 2],
    reserves: [BigUint; 2],
    fee_bps: u32,
    paused: bool,
}

impl StableSwapPool {
    /// Panics if `fee_bps` is not below [`BPS`].
    pub fn new(assets: [AssetId; 2], reserves: [BigUint; 2], fee_bps: u32) -> Self {
        assert!(fee_bps < BPS, "fee must be below {BPS} bps");
        Self { assets, reserves, fee_bps, paused: false }
    }

    /// Stop the pool from quoting or filling.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn reserves(&self) -> &[BigUint; 2] {
        &self.reserves
    }

    fn index_of(&self, asset: &AssetId) -> Result<usize, VenueError> {
        self.assets
            .iter()
            .position(|member| member == asset)
            .ok_or(VenueError::AssetNotInVenue { kind: VenueKind::StableSwapPool, asset: *asset })
    }

    /// `out = (in * (BPS - fee) * R_out) / (R_in * BPS + in * (BPS - fee))`,
    /// floored. The fee stays in the input-side reserve.
    fn amount_out(&self, i: usize, j: usize, amount_in: &BigUint) -> Result<BigUint, VenueError> {
        let (reserve_in, reserve_out) = (&self.reserves[i], &self.reserves[j]);
        if *reserve_in == BigUint::ZERO || *reserve_out == BigUint::ZERO {
            return Err(VenueError::InsufficientLiquidity { needed: amount_in.clone() });
        }

        let in_after_fee = amount_in * (BPS - self.fee_bps);
        let numerator = &in_after_fee * reserve_out;
        let denominator = reserve_in * BPS + &in_after_fee;
        let out = numerator / denominator;
        if &out >= reserve_out {
            return Err(VenueError::InsufficientLiquidity { needed: out });
        }
        Ok(out)
    }

    fn pair(&self, asset_in: &AssetId, asset_out: &AssetId) -> Result<(usize, usize), VenueError> {
        if self.paused {
            return Err(VenueError::Paused);
        }
        let i = self.index_of(asset_in)?;
        let j = self.index_of(asset_out)?;
        Ok((i, j))
    }
}

impl VenueAdapter for StableSwapPool {
    fn kind(&self) -> VenueKind {
        VenueKind::StableSwapPool
    }

    fn quote(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
    ) -> Result<BigUint, SwapError> {
        let (i, j) = self.pair(asset_in, asset_out)?;
        Ok(self.amount_out(i, j, amount_in)?)
    }

    fn execute(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
        min_out: &BigUint,
    ) -> Result<VenueFill, SwapError> {
        let (i, j) = self.pair(asset_in, asset_out)?;
        let amount_out = self.amount_out(i, j, amount_in)?;
        check_floor(&amount_out, min_out)?;

        let mut next = self.clone();
        next.reserves[i] += amount_in;
        next.reserves[j] -= &amount_out;
        Ok(VenueFill { amount_out, new_state: Box::new(next) })
    }

    fn clone_box(&self) -> Box<dyn VenueAdapter> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::models::ID_LEN;

    fn asset(n: u8) -> AssetId {
        AssetId::new([n; ID_LEN])
    }

    fn pool(fee_bps: u32) -> StableSwapPool {
        StableSwapPool::new(
            [asset(1), asset(2)],
            [BigUint::from(1_000_000u64), BigUint::from(1_000_000u64)],
            fee_bps,
        )
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(30)]
    fn quote_is_deterministic(#[case] fee_bps: u32) {
        let p = pool(fee_bps);
        let amount = BigUint::from(10_000u64);
        assert_eq!(
            p.quote(&asset(1), &asset(2), &amount).unwrap(),
            p.quote(&asset(1), &asset(2), &amount).unwrap(),
        );
    }

    #[test]
    fn execute_matches_quote_and_moves_reserves() {
        let p = pool(30);
        let amount = BigUint::from(10_000u64);
        let quoted = p.quote(&asset(1), &asset(2), &amount).unwrap();

        let fill = p
            .execute(&asset(1), &asset(2), &amount, &BigUint::ZERO)
            .unwrap();
        assert_eq!(fill.amount_out, quoted);

        let next = fill
            .new_state
            .as_any()
            .downcast_ref::<StableSwapPool>()
            .unwrap();
        assert_eq!(next.reserves()[0], BigUint::from(1_010_000u64));
        assert_eq!(next.reserves()[1], BigUint::from(1_000_000u64) - &quoted);
        // the original state is untouched
        assert_eq!(p.reserves()[0], BigUint::from(1_000_000u64));
    }

    #[test]
    fn zero_fee_quote_is_pure_invariant_output() {
        let p = pool(0);
        let amount = BigUint::from(10_000u64);
        // in * R_out / (R_in + in), floored
        let expected = BigUint::from(10_000u64) * BigUint::from(1_000_000u64)
            / BigUint::from(1_010_000u64);
        assert_eq!(p.quote(&asset(1), &asset(2), &amount).unwrap(), expected);
    }

    #[test]
    fn non_member_asset_is_rejected() {
        let p = pool(30);
        let err = p
            .quote(&asset(1), &asset(9), &BigUint::from(100u32))
            .unwrap_err();
        assert!(matches!(
            err,
            SwapError::Venue(VenueError::AssetNotInVenue { kind: VenueKind::StableSwapPool, .. })
        ));
    }

    #[test]
    fn empty_reserves_are_insufficient_liquidity() {
        let p = StableSwapPool::new(
            [asset(1), asset(2)],
            [BigUint::ZERO, BigUint::from(1_000u32)],
            30,
        );
        let err = p
            .quote(&asset(1), &asset(2), &BigUint::from(100u32))
            .unwrap_err();
        assert!(matches!(err, SwapError::Venue(VenueError::InsufficientLiquidity { .. })));
    }

    #[test]
    fn paused_pool_rejects_quotes_and_fills() {
        let mut p = pool(30);
        p.pause();
        let amount = BigUint::from(100u32);
        assert!(matches!(
            p.quote(&asset(1), &asset(2), &amount).unwrap_err(),
            SwapError::Venue(VenueError::Paused)
        ));
        assert!(matches!(
            p.execute(&asset(1), &asset(2), &amount, &BigUint::ZERO)
                .unwrap_err(),
            SwapError::Venue(VenueError::Paused)
        ));
    }

    #[test]
    fn floor_boundary_passes_and_below_fails() {
        let p = pool(30);
        let amount = BigUint::from(10_000u64);
        let quoted = p.quote(&asset(1), &asset(2), &amount).unwrap();

        assert!(p.execute(&asset(1), &asset(2), &amount, &quoted).is_ok());
        let err = p
            .execute(&asset(1), &asset(2), &amount, &(&quoted + 1u32))
            .unwrap_err();
        assert!(matches!(err, SwapError::SlippageExceeded { .. }));
    }
}
