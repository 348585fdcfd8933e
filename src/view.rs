//! View-only simulation.

use num_bigint::BigUint;

use crate::{
    book::VenueBook,
    chain::{self, Route},
    errors::SwapError,
};

/// Prices conversions without leaving any persistent effect.
///
/// Every computation re-runs the committing code path against a scratch
/// copy of the book that is discarded on exit regardless of outcome — a
/// reversible dry run, not a separate pricing formula. Quotes therefore
/// reproduce the committing arithmetic, rounding and fee deduction
/// included, bit for bit. No slippage floor is supplied on this path, so a
/// pure quote never reports [`SwapError::SlippageExceeded`].
pub struct ViewSimulator<'a> {
    book: &'a VenueBook,
}

impl<'a> ViewSimulator<'a> {
    pub fn new(book: &'a VenueBook) -> Self {
        Self { book }
    }

    /// Price a caller-assembled route.
    pub fn quote_route(&self, route: &Route, amount_in: BigUint) -> Result<BigUint, SwapError> {
        chain::view_only(self.book, route, amount_in)
    }

    /// Run an arbitrary conversion computation — e.g. a router operation —
    /// against the scratch copy, returning only its value.
    pub fn simulate<T>(
        &self,
        f: impl FnOnce(&mut VenueBook) -> Result<T, SwapError>,
    ) -> Result<T, SwapError> {
        self.book.dry_run(f)
    }
}
