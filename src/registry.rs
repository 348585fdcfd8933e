//! Wrapped-asset registry driving venue dispatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::SwapError,
    models::{AssetId, VenueRef},
};

/// Pairing of a yield-bearing asset with its underlying synthetic and the
/// pool venue used to price between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMapping {
    pub wrapped: AssetId,
    pub underlying: AssetId,
    pub price_ref: VenueRef,
}

/// Append-only registry of wrapped-asset mappings.
///
/// `add` is the single mutation entry point; caller authorization is an
/// external concern. Entries are never removed or updated once added.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    mappings: HashMap<AssetId, AssetMapping>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        wrapped: AssetId,
        underlying: AssetId,
        price_ref: VenueRef,
    ) -> Result<(), SwapError> {
        if self.mappings.contains_key(&wrapped) {
            return Err(SwapError::DuplicateMapping(wrapped));
        }
        debug!(%wrapped, %underlying, venue = %price_ref, "asset mapping registered");
        self.mappings
            .insert(wrapped, AssetMapping { wrapped, underlying, price_ref });
        Ok(())
    }

    pub fn lookup(&self, wrapped: &AssetId) -> Result<&AssetMapping, SwapError> {
        self.mappings
            .get(wrapped)
            .ok_or(SwapError::UnknownAsset(*wrapped))
    }
}
