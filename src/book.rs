//! Shared venue and balance state, with transactional scopes.

use std::collections::HashMap;

use crate::{errors::SwapError, ledger::Ledger, models::VenueRef, venues::VenueAdapter};

/// The externally-owned state every conversion transacts against: venue
/// instances keyed by reference, plus the balance ledger.
///
/// `VenueBook` is the unit of atomicity. Committing entry points run inside
/// [`VenueBook::commit`], which applies a closure to a working copy and
/// swaps it in only on success; quoting runs inside [`VenueBook::dry_run`],
/// whose working copy is discarded unconditionally. Cross-call
/// serialization is the embedding application's concern.
#[derive(Debug, Clone, Default)]
pub struct VenueBook {
    venues: HashMap<VenueRef, Box<dyn VenueAdapter>>,
    ledger: Ledger,
}

impl VenueBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a venue instance. Re-adding a reference replaces the
    /// instance; venue deployment itself is outside this core.
    pub fn add_venue(&mut self, venue: VenueRef, adapter: Box<dyn VenueAdapter>) {
        self.venues.insert(venue, adapter);
    }

    pub fn venue(&self, venue: &VenueRef) -> Result<&dyn VenueAdapter, SwapError> {
        self.venues
            .get(venue)
            .map(AsRef::as_ref)
            .ok_or(SwapError::UnknownVenue(*venue))
    }

    /// Replace a venue with its successor state after a fill.
    pub(crate) fn install(&mut self, venue: &VenueRef, state: Box<dyn VenueAdapter>) {
        self.venues.insert(*venue, state);
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Run `f` against a working copy; swap the copy in only when `f`
    /// succeeds. Any error leaves `self` byte-identical to before.
    pub fn commit<T>(
        &mut self,
        f: impl FnOnce(&mut VenueBook) -> Result<T, SwapError>,
    ) -> Result<T, SwapError> {
        let mut scratch = self.clone();
        let value = f(&mut scratch)?;
        *self = scratch;
        Ok(value)
    }

    /// Run `f` against a working copy that is dropped on exit no matter
    /// what, returning only the computed value.
    pub fn dry_run<T>(
        &self,
        f: impl FnOnce(&mut VenueBook) -> Result<T, SwapError>,
    ) -> Result<T, SwapError> {
        let mut scratch = self.clone();
        f(&mut scratch)
    }
}
