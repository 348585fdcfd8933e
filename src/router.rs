//! Directional conversion operations composed from venue legs.

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::{
    book::VenueBook,
    chain::{self, Route},
    errors::SwapError,
    models::{AccountId, AssetId, VenueRef},
    registry::AssetRegistry,
    venues::VenueKind,
};

/// Resolves venues for directional asset-pair conversions.
///
/// The router holds the asset registry plus a small venue directory: the
/// synth exchange, one pool manager per accepted USD-stable collateral, and
/// one LpWrap venue per pool-share asset. Every operation assembles an
/// internal [`Route`] and runs it through the chain executor, so a
/// multi-venue conversion threads its intermediate amounts exactly like a
/// caller-assembled route would — and quoting shares the committing
/// arithmetic bit for bit. Intermediate legs are invisible to the caller.
#[derive(Debug, Clone)]
pub struct Router {
    registry: AssetRegistry,
    /// Exchange venue pricing every synthetic, including the protocol
    /// stable.
    exchange: VenueRef,
    /// Pool manager per accepted collateral.
    pool_managers: HashMap<AssetId, VenueRef>,
    /// LpWrap venue per pool-share asset.
    lp_venues: HashMap<AssetId, VenueRef>,
    protocol_stable: AssetId,
}

impl Router {
    pub fn new(exchange: VenueRef, protocol_stable: AssetId) -> Self {
        Self {
            registry: AssetRegistry::new(),
            exchange,
            pool_managers: HashMap::new(),
            lp_venues: HashMap::new(),
            protocol_stable,
        }
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// Registry mutation passes through here; authorization is the
    /// caller's concern.
    pub fn registry_mut(&mut self) -> &mut AssetRegistry {
        &mut self.registry
    }

    pub fn add_pool_manager(&mut self, collateral: AssetId, venue: VenueRef) {
        self.pool_managers.insert(collateral, venue);
    }

    pub fn add_lp_venue(&mut self, share: AssetId, venue: VenueRef) {
        self.lp_venues.insert(share, venue);
    }

    fn pool_manager(&self, collateral: &AssetId) -> Result<VenueRef, SwapError> {
        self.pool_managers
            .get(collateral)
            .copied()
            .ok_or(SwapError::UnknownAsset(*collateral))
    }

    fn lp_venue(&self, share: &AssetId) -> Result<VenueRef, SwapError> {
        self.lp_venues
            .get(share)
            .copied()
            .ok_or(SwapError::UnknownAsset(*share))
    }

    // ---- route assembly ----------------------------------------------------

    fn route_ib_to_synth(&self, ib: &AssetId, synth: &AssetId) -> Result<Route, SwapError> {
        let mapping = self.registry.lookup(ib)?;
        let mut builder = Route::builder().leg(
            mapping.price_ref,
            VenueKind::StableSwapPool,
            *ib,
            mapping.underlying,
        );
        if &mapping.underlying != synth {
            builder = builder.leg(self.exchange, VenueKind::SynthExchange, mapping.underlying, *synth);
        }
        Ok(builder.build()?)
    }

    fn route_synth_to_ib(&self, synth: &AssetId, ib: &AssetId) -> Result<Route, SwapError> {
        let mapping = self.registry.lookup(ib)?;
        let mut builder = Route::builder();
        if synth != &mapping.underlying {
            builder = builder.leg(self.exchange, VenueKind::SynthExchange, *synth, mapping.underlying);
        }
        builder = builder.leg(mapping.price_ref, VenueKind::StableSwapPool, mapping.underlying, *ib);
        Ok(builder.build()?)
    }

    fn route_ib_to_ib(&self, ib_in: &AssetId, ib_out: &AssetId) -> Result<Route, SwapError> {
        let from = self.registry.lookup(ib_in)?;
        let to = self.registry.lookup(ib_out)?;
        let mut builder = Route::builder().leg(
            from.price_ref,
            VenueKind::StableSwapPool,
            *ib_in,
            from.underlying,
        );
        if from.underlying != to.underlying {
            builder = builder.leg(self.exchange, VenueKind::SynthExchange, from.underlying, to.underlying);
        }
        builder = builder.leg(to.price_ref, VenueKind::StableSwapPool, to.underlying, *ib_out);
        Ok(builder.build()?)
    }

    fn route_synth(&self, synth_in: &AssetId, synth_out: &AssetId) -> Result<Route, SwapError> {
        Ok(Route::builder()
            .leg(self.exchange, VenueKind::SynthExchange, *synth_in, *synth_out)
            .build()?)
    }

    fn route_lp(&self, share: &AssetId, asset_in: AssetId, asset_out: AssetId) -> Result<Route, SwapError> {
        Ok(Route::builder()
            .leg(self.lp_venue(share)?, VenueKind::LpWrap, asset_in, asset_out)
            .build()?)
    }

    fn route_mint(&self, collateral: &AssetId) -> Result<Route, SwapError> {
        Ok(Route::builder()
            .leg(
                self.pool_manager(collateral)?,
                VenueKind::CollateralMintBurn,
                *collateral,
                self.protocol_stable,
            )
            .build()?)
    }

    fn route_burn(&self, collateral: &AssetId) -> Result<Route, SwapError> {
        Ok(Route::builder()
            .leg(
                self.pool_manager(collateral)?,
                VenueKind::CollateralMintBurn,
                self.protocol_stable,
                *collateral,
            )
            .build()?)
    }

    fn route_stable_to_synth(&self, collateral: &AssetId, synth: &AssetId) -> Result<Route, SwapError> {
        let mut builder = Route::builder().leg(
            self.pool_manager(collateral)?,
            VenueKind::CollateralMintBurn,
            *collateral,
            self.protocol_stable,
        );
        if synth != &self.protocol_stable {
            builder = builder.leg(self.exchange, VenueKind::SynthExchange, self.protocol_stable, *synth);
        }
        Ok(builder.build()?)
    }

    fn route_synth_to_stable(&self, synth: &AssetId, collateral: &AssetId) -> Result<Route, SwapError> {
        let mut builder = Route::builder();
        if synth != &self.protocol_stable {
            builder = builder.leg(self.exchange, VenueKind::SynthExchange, *synth, self.protocol_stable);
        }
        builder = builder.leg(
            self.pool_manager(collateral)?,
            VenueKind::CollateralMintBurn,
            self.protocol_stable,
            *collateral,
        );
        Ok(builder.build()?)
    }

    fn route_stable_to_ib(&self, collateral: &AssetId, ib: &AssetId) -> Result<Route, SwapError> {
        let mapping = self.registry.lookup(ib)?;
        let mut builder = Route::builder().leg(
            self.pool_manager(collateral)?,
            VenueKind::CollateralMintBurn,
            *collateral,
            self.protocol_stable,
        );
        if mapping.underlying != self.protocol_stable {
            builder = builder.leg(
                self.exchange,
                VenueKind::SynthExchange,
                self.protocol_stable,
                mapping.underlying,
            );
        }
        builder = builder.leg(mapping.price_ref, VenueKind::StableSwapPool, mapping.underlying, *ib);
        Ok(builder.build()?)
    }

    fn route_ib_to_stable(&self, ib: &AssetId, collateral: &AssetId) -> Result<Route, SwapError> {
        let mapping = self.registry.lookup(ib)?;
        let mut builder =
            Route::builder().leg(mapping.price_ref, VenueKind::StableSwapPool, *ib, mapping.underlying);
        if mapping.underlying != self.protocol_stable {
            builder = builder.leg(
                self.exchange,
                VenueKind::SynthExchange,
                mapping.underlying,
                self.protocol_stable,
            );
        }
        builder = builder.leg(
            self.pool_manager(collateral)?,
            VenueKind::CollateralMintBurn,
            self.protocol_stable,
            *collateral,
        );
        Ok(builder.build()?)
    }

    fn route_stable_to_lp(&self, collateral: &AssetId, share: &AssetId) -> Result<Route, SwapError> {
        Ok(Route::builder()
            .leg(
                self.pool_manager(collateral)?,
                VenueKind::CollateralMintBurn,
                *collateral,
                self.protocol_stable,
            )
            .leg(self.lp_venue(share)?, VenueKind::LpWrap, self.protocol_stable, *share)
            .build()?)
    }

    fn route_lp_to_stable(&self, share: &AssetId, collateral: &AssetId) -> Result<Route, SwapError> {
        Ok(Route::builder()
            .leg(self.lp_venue(share)?, VenueKind::LpWrap, *share, self.protocol_stable)
            .leg(
                self.pool_manager(collateral)?,
                VenueKind::CollateralMintBurn,
                self.protocol_stable,
                *collateral,
            )
            .build()?)
    }

    // ---- conversion entry points -------------------------------------------

    /// Quote a yield-bearing asset into a synthetic.
    ///
    /// Looks up the asset's mapping and prices through its pool, chaining
    /// into the exchange when the requested synthetic is not the mapping's
    /// underlying.
    pub fn quote_ib_to_synth(
        &self,
        book: &VenueBook,
        ib: &AssetId,
        synth: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_ib_to_synth(ib, synth)?, amount_in)
    }

    /// Swap a yield-bearing asset into a synthetic. All legs commit or none
    /// do; `min_out` applies to the net result.
    pub fn swap_ib_to_synth(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        ib: &AssetId,
        synth: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_ib_to_synth(ib, synth)?, amount_in, min_out)
    }

    pub fn quote_synth_to_ib(
        &self,
        book: &VenueBook,
        synth: &AssetId,
        ib: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_synth_to_ib(synth, ib)?, amount_in)
    }

    pub fn swap_synth_to_ib(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        synth: &AssetId,
        ib: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_synth_to_ib(synth, ib)?, amount_in, min_out)
    }

    /// Quote between two yield-bearing assets: pool out, exchange across,
    /// pool back in.
    pub fn quote_ib_to_ib(
        &self,
        book: &VenueBook,
        ib_in: &AssetId,
        ib_out: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_ib_to_ib(ib_in, ib_out)?, amount_in)
    }

    pub fn swap_ib_to_ib(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        ib_in: &AssetId,
        ib_out: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_ib_to_ib(ib_in, ib_out)?, amount_in, min_out)
    }

    pub fn quote_synth(
        &self,
        book: &VenueBook,
        synth_in: &AssetId,
        synth_out: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_synth(synth_in, synth_out)?, amount_in)
    }

    pub fn swap_synth(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        synth_in: &AssetId,
        synth_out: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_synth(synth_in, synth_out)?, amount_in, min_out)
    }

    pub fn quote_lp_to_synth(
        &self,
        book: &VenueBook,
        share: &AssetId,
        synth: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_lp(share, *share, *synth)?, amount_in)
    }

    pub fn swap_lp_to_synth(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        share: &AssetId,
        synth: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_lp(share, *share, *synth)?, amount_in, min_out)
    }

    pub fn quote_synth_to_lp(
        &self,
        book: &VenueBook,
        synth: &AssetId,
        share: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_lp(share, *synth, *share)?, amount_in)
    }

    pub fn swap_synth_to_lp(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        synth: &AssetId,
        share: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_lp(share, *synth, *share)?, amount_in, min_out)
    }

    /// Quote minting the protocol stable against a collateral, via that
    /// collateral's pool manager.
    pub fn quote_mint(
        &self,
        book: &VenueBook,
        collateral: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_mint(collateral)?, amount_in)
    }

    pub fn mint(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        collateral: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_mint(collateral)?, amount_in, min_out)
    }

    pub fn quote_burn(
        &self,
        book: &VenueBook,
        collateral: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_burn(collateral)?, amount_in)
    }

    pub fn burn(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        collateral: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_burn(collateral)?, amount_in, min_out)
    }

    pub fn quote_stable_to_synth(
        &self,
        book: &VenueBook,
        collateral: &AssetId,
        synth: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_stable_to_synth(collateral, synth)?, amount_in)
    }

    pub fn swap_stable_to_synth(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        collateral: &AssetId,
        synth: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_stable_to_synth(collateral, synth)?, amount_in, min_out)
    }

    pub fn quote_synth_to_stable(
        &self,
        book: &VenueBook,
        synth: &AssetId,
        collateral: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_synth_to_stable(synth, collateral)?, amount_in)
    }

    pub fn swap_synth_to_stable(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        synth: &AssetId,
        collateral: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_synth_to_stable(synth, collateral)?, amount_in, min_out)
    }

    /// Quote a USD-stable into a yield-bearing asset: mint the protocol
    /// stable, exchange into the mapping's underlying, then price through
    /// the mapping's pool.
    pub fn quote_stable_to_ib(
        &self,
        book: &VenueBook,
        collateral: &AssetId,
        ib: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_stable_to_ib(collateral, ib)?, amount_in)
    }

    pub fn swap_stable_to_ib(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        collateral: &AssetId,
        ib: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_stable_to_ib(collateral, ib)?, amount_in, min_out)
    }

    pub fn quote_ib_to_stable(
        &self,
        book: &VenueBook,
        ib: &AssetId,
        collateral: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_ib_to_stable(ib, collateral)?, amount_in)
    }

    pub fn swap_ib_to_stable(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        ib: &AssetId,
        collateral: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_ib_to_stable(ib, collateral)?, amount_in, min_out)
    }

    pub fn quote_stable_to_lp(
        &self,
        book: &VenueBook,
        collateral: &AssetId,
        share: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_stable_to_lp(collateral, share)?, amount_in)
    }

    pub fn swap_stable_to_lp(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        collateral: &AssetId,
        share: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_stable_to_lp(collateral, share)?, amount_in, min_out)
    }

    pub fn quote_lp_to_stable(
        &self,
        book: &VenueBook,
        share: &AssetId,
        collateral: &AssetId,
        amount_in: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::view_only(book, &self.route_lp_to_stable(share, collateral)?, amount_in)
    }

    pub fn swap_lp_to_stable(
        &self,
        book: &mut VenueBook,
        caller: &AccountId,
        share: &AssetId,
        collateral: &AssetId,
        amount_in: BigUint,
        min_out: BigUint,
    ) -> Result<BigUint, SwapError> {
        chain::execute(book, caller, &self.route_lp_to_stable(share, collateral)?, amount_in, min_out)
    }
}
