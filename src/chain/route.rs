//! Route and leg types.

use serde::{Deserialize, Serialize};

use crate::{
    chain::errors::RouteError,
    models::{AssetId, VenueRef},
    venues::VenueKind,
};

/// One venue call inside a route.
///
/// Holds the fixed arguments of the call; the input amount is the
/// deliberately absent last field, filled by the executor with the previous
/// leg's realized output (or the route's initial amount for the first leg).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub venue: VenueRef,
    pub kind: VenueKind,
    pub asset_in: AssetId,
    pub asset_out: AssetId,
}

/// Ordered sequence of legs forming one atomic multi-venue conversion.
///
/// A route is validated at construction: it is non-empty and every leg
/// consumes exactly the asset the previous leg produces. Validation also
/// runs when a route is deserialized, so an executing route always carries
/// a consistent chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Leg>", into = "Vec<Leg>")]
pub struct Route {
    legs: Vec<Leg>,
}

impl Route {
    pub fn builder() -> RouteBuilder {
        RouteBuilder::new()
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Asset the caller pays into the first leg.
    pub fn asset_in(&self) -> &AssetId {
        &self.legs[0].asset_in
    }

    /// Asset the last leg pays out.
    pub fn asset_out(&self) -> &AssetId {
        &self.legs[self.legs.len() - 1].asset_out
    }
}

impl TryFrom<Vec<Leg>> for Route {
    type Error = RouteError;

    fn try_from(legs: Vec<Leg>) -> Result<Self, RouteError> {
        if legs.is_empty() {
            return Err(RouteError::EmptyRoute);
        }
        for (index, pair) in legs.windows(2).enumerate() {
            if pair[0].asset_out != pair[1].asset_in {
                return Err(RouteError::DiscontinuousLegs {
                    index: index + 1,
                    produced: pair[0].asset_out,
                    declared: pair[1].asset_in,
                });
            }
        }
        Ok(Self { legs })
    }
}

impl From<Route> for Vec<Leg> {
    fn from(route: Route) -> Self {
        route.legs
    }
}

/// Accumulates legs and validates the chain on [`RouteBuilder::build`].
#[derive(Debug, Default)]
pub struct RouteBuilder {
    legs: Vec<Leg>,
}

impl RouteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leg(
        mut self,
        venue: VenueRef,
        kind: VenueKind,
        asset_in: AssetId,
        asset_out: AssetId,
    ) -> Self {
        self.legs.push(Leg { venue, kind, asset_in, asset_out });
        self
    }

    pub fn build(self) -> Result<Route, RouteError> {
        Route::try_from(self.legs)
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

    fn venue(n: u8) -> VenueRef {
        VenueRef::new([n; ID_LEN])
    }

    #[test]
    fn contiguous_route_builds() {
        let route = Route::builder()
            .leg(venue(1), VenueKind::SynthExchange, asset(1), asset(2))
            .leg(venue(2), VenueKind::StableSwapPool, asset(2), asset(3))
            .build()
            .unwrap();
        assert_eq!(route.asset_in(), &asset(1));
        assert_eq!(route.asset_out(), &asset(3));
        assert_eq!(route.legs().len(), 2);
    }

    #[test]
    fn empty_route_is_rejected() {
        assert_eq!(Route::builder().build().unwrap_err(), RouteError::EmptyRoute);
    }

    #[test]
    fn discontinuous_legs_fail_fast() {
        let err = Route::builder()
            .leg(venue(1), VenueKind::SynthExchange, asset(1), asset(2))
            .leg(venue(2), VenueKind::StableSwapPool, asset(9), asset(3))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::DiscontinuousLegs { index: 1, produced: asset(2), declared: asset(9) }
        );
    }

    #[test]
    fn deserialization_re_runs_validation() {
        let good = Route::builder()
            .leg(venue(1), VenueKind::SynthExchange, asset(1), asset(2))
            .leg(venue(8), VenueKind::StableSwapPool, asset(2), asset(3))
            .build()
            .unwrap();
        let json = serde_json::to_string(&good).unwrap();
        assert_eq!(serde_json::from_str::<Route>(&json).unwrap(), good);

        // break the chain in transit: the first hex occurrence of asset 2 is
        // leg 0's output
        let broken = json.replacen(
            &format!("\"0x{}\"", "02".repeat(ID_LEN)),
            &format!("\"0x{}\"", "09".repeat(ID_LEN)),
            1,
        );
        assert!(serde_json::from_str::<Route>(&broken).is_err());
    }
}
