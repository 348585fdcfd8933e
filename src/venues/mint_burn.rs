//! Collateral-backed mint/burn adapter for the protocol stable asset.

use std::any::Any;

use num_bigint::BigUint;

use crate::{
    errors::SwapError,
    models::AssetId,
    venues::{check_floor, errors::VenueError, take_fee, VenueAdapter, VenueFill, VenueKind, BPS, RATE_SCALE},
};

/// A pool manager minting and burning the protocol stable against one
/// designated collateral asset.
///
/// One venue instance exists per accepted collateral; instances are
/// independent. Minting and burning are distinct directions with their own
/// fee parameters.
#[derive(Debug, Clone)]
pub struct CollateralMintBurn {
    collateral: AssetId,
    stable: AssetId,
    /// Lifts collateral amounts to the stable's 18-decimal precision.
    collateral_scale: BigUint,
    /// Stable units per scale-adjusted collateral unit, [`RATE_SCALE`] fixed
    /// point.
    rate: BigUint,
    mint_fee_bps: u32,
    burn_fee_bps: u32,
    /// Collateral held by the venue, available to honor burns.
    reserve: BigUint,
}

impl CollateralMintBurn {
    /// Panics if a fee is not below [`BPS`] or `collateral_decimals`
    /// exceeds 18.
    pub fn new(
        collateral: AssetId,
        stable: AssetId,
        collateral_decimals: u32,
        rate: BigUint,
        mint_fee_bps: u32,
        burn_fee_bps: u32,
        reserve: BigUint,
    ) -> Self {
        assert!(mint_fee_bps < BPS && burn_fee_bps < BPS, "fee must be below {BPS} bps");
        assert!(collateral_decimals <= 18, "collateral precision beyond the stable's");
        Self {
            collateral,
            stable,
            collateral_scale: BigUint::from(10u32).pow(18 - collateral_decimals),
            rate,
            mint_fee_bps,
            burn_fee_bps,
            reserve,
        }
    }

    pub fn reserve(&self) -> &BigUint {
        &self.reserve
    }

    fn mint_out(&self, amount_in: &BigUint) -> BigUint {
        let gross = amount_in * &self.collateral_scale * &self.rate / RATE_SCALE;
        take_fee(&gross, self.mint_fee_bps)
    }

    fn burn_out(&self, amount_in: &BigUint) -> Result<BigUint, VenueError> {
        let gross = amount_in * RATE_SCALE / &self.rate / &self.collateral_scale;
        let out = take_fee(&gross, self.burn_fee_bps);
        if out > self.reserve {
            return Err(VenueError::InsufficientLiquidity { needed: out });
        }
        Ok(out)
    }

    fn direction(&self, asset_in: &AssetId, asset_out: &AssetId) -> Result<Direction, VenueError> {
        if asset_in == &self.collateral && asset_out == &self.stable {
            return Ok(Direction::Mint);
        }
        if asset_in == &self.stable && asset_out == &self.collateral {
            return Ok(Direction::Burn);
        }
        let offending =
            if asset_in == &self.collateral || asset_in == &self.stable { asset_out } else { asset_in };
        Err(VenueError::AssetNotInVenue { kind: VenueKind::CollateralMintBurn, asset: *offending })
    }
}

enum Direction {
    Mint,
    Burn,
}

impl VenueAdapter for CollateralMintBurn {
    fn kind(&self) -> VenueKind {
        VenueKind::CollateralMintBurn
    }

    fn quote(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
    ) -> Result<BigUint, SwapError> {
        match self.direction(asset_in, asset_out)? {
            Direction::Mint => Ok(self.mint_out(amount_in)),
            Direction::Burn => Ok(self.burn_out(amount_in)?),
        }
    }

    fn execute(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: &BigUint,
        min_out: &BigUint,
    ) -> Result<VenueFill, SwapError> {
        let mut next = self.clone();
        let amount_out = match self.direction(asset_in, asset_out)? {
            Direction::Mint => {
                let out = self.mint_out(amount_in);
                next.reserve += amount_in;
                out
            }
            Direction::Burn => {
                let out = self.burn_out(amount_in)?;
                next.reserve -= &out;
                out
            }
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

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::ID_LEN;

    fn asset(n: u8) -> AssetId {
        AssetId::new([n; ID_LEN])
    }

    fn one() -> BigUint {
        BigUint::from(RATE_SCALE)
    }

    /// A 6-decimal USD collateral minting a EUR-pegged stable at 0.90 EUR
    /// per USD, 30 bps mint fee, 50 bps burn fee.
    fn manager() -> CollateralMintBurn {
        CollateralMintBurn::new(
            asset(10),
            asset(20),
            6,
            one() * 9u32 / 10u32,
            30,
            50,
            BigUint::from(1_000_000u64) * BigUint::from(1_000_000u64),
        )
    }

    #[test]
    fn mint_scales_collateral_decimals_up() {
        let m = manager();
        // 100 units of 6-decimal collateral
        let amount = BigUint::from(100_000_000u64);
        let gross = BigUint::from(90u32) * one();
        assert_eq!(
            m.quote(&asset(10), &asset(20), &amount).unwrap(),
            &gross * (BPS - 30) / BPS,
        );
    }

    #[test]
    fn burn_uses_its_own_fee_and_scales_down() {
        let m = manager();
        // 90 stable units burn back toward 100 collateral units, minus 50 bps
        let amount = BigUint::from(90u32) * one();
        let gross = BigUint::from(100_000_000u64);
        assert_eq!(
            m.quote(&asset(20), &asset(10), &amount).unwrap(),
            &gross * (BPS - 50) / BPS,
        );
    }

    #[test]
    fn directions_are_not_symmetric() {
        let m = manager();
        let amount = BigUint::from(1_000_000u64);
        let minted = m.quote(&asset(10), &asset(20), &amount).unwrap();
        let back = m.quote(&asset(20), &asset(10), &minted).unwrap();
        assert!(back < amount);
    }

    #[test]
    fn execute_matches_quote_and_moves_reserve() {
        let m = manager();
        let amount = BigUint::from(5_000_000u64);
        let quoted = m.quote(&asset(10), &asset(20), &amount).unwrap();
        let fill = m
            .execute(&asset(10), &asset(20), &amount, &BigUint::ZERO)
            .unwrap();
        assert_eq!(fill.amount_out, quoted);

        let next = fill
            .new_state
            .as_any()
            .downcast_ref::<CollateralMintBurn>()
            .unwrap();
        assert_eq!(next.reserve(), &(m.reserve() + &amount));
    }

    #[test]
    fn burn_beyond_reserve_is_insufficient_liquidity() {
        let m = CollateralMintBurn::new(
            asset(10),
            asset(20),
            6,
            one(),
            0,
            0,
            BigUint::from(1u32),
        );
        let err = m
            .quote(&asset(20), &asset(10), &(BigUint::from(10u32) * one()))
            .unwrap_err();
        assert!(matches!(err, SwapError::Venue(VenueError::InsufficientLiquidity { .. })));
    }

    #[test]
    fn unrelated_pair_is_rejected() {
        let m = manager();
        let err = m
            .quote(&asset(10), &asset(99), &BigUint::from(1u32))
            .unwrap_err();
        assert!(matches!(
            err,
            SwapError::Venue(VenueError::AssetNotInVenue { asset, .. }) if asset == crate::models::AssetId::new([99; ID_LEN])
        ));
    }
}
