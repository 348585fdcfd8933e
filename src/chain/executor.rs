//! Leg-threading executor.

use num_bigint::BigUint;
use tracing::{debug, trace};

use crate::{
    book::VenueBook,
    chain::{errors::RouteError, route::Route},
    errors::SwapError,
    models::AccountId,
};

/// Run the legs of `route` in order, threading each leg's realized output
/// into the amount slot of the next.
///
/// This is the single arithmetic path behind both committing execution and
/// view-only quoting; `book` is a transaction working copy in either case.
/// Venue-level floors are zero here — the net-result floor is enforced by
/// [`execute`].
pub(crate) fn run_legs(
    book: &mut VenueBook,
    route: &Route,
    amount_in: BigUint,
) -> Result<BigUint, SwapError> {
    let mut amount = amount_in;
    for (index, leg) in route.legs().iter().enumerate() {
        let adapter = book.venue(&leg.venue)?;
        if adapter.kind() != leg.kind {
            return Err(RouteError::VenueKindMismatch {
                index,
                venue: leg.venue,
                declared: leg.kind,
                actual: adapter.kind(),
            }
            .into());
        }
        let fill = adapter.execute(&leg.asset_in, &leg.asset_out, &amount, &BigUint::ZERO)?;
        trace!(
            index,
            venue = %leg.venue,
            kind = %leg.kind,
            amount_in = %amount,
            amount_out = %fill.amount_out,
            "leg filled"
        );
        book.install(&leg.venue, fill.new_state);
        amount = fill.amount_out;
    }
    Ok(amount)
}

/// Commit all legs of `route` atomically.
///
/// The caller is debited the initial input and credited the final output;
/// intermediate amounts are threaded between venues without ever touching
/// the ledger. Any leg failure aborts the whole batch with zero observable
/// effect. The slippage floor applies to the net result only; boundary
/// equality passes.
pub fn execute(
    book: &mut VenueBook,
    caller: &AccountId,
    route: &Route,
    amount_in: BigUint,
    min_out: BigUint,
) -> Result<BigUint, SwapError> {
    book.commit(|book| {
        book.ledger_mut()
            .debit(caller, route.asset_in(), &amount_in)?;
        let amount_out = run_legs(book, route, amount_in.clone())?;
        if amount_out < min_out {
            return Err(SwapError::SlippageExceeded { realized: amount_out, floor: min_out });
        }
        book.ledger_mut()
            .credit(caller, route.asset_out(), &amount_out);
        debug!(legs = route.legs().len(), amount_out = %amount_out, "route committed");
        Ok(amount_out)
    })
}

/// Identical leg-threading computation to [`execute`], run in a scope that
/// is discarded regardless of outcome. Used to price a route before
/// committing; supplies no floor, so it never reports slippage.
pub fn view_only(
    book: &VenueBook,
    route: &Route,
    amount_in: BigUint,
) -> Result<BigUint, SwapError> {
    book.dry_run(|book| run_legs(book, route, amount_in))
}

#[cfg(test)]
mod test {
    use maplit::hashmap;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        chain::route::Route,
        models::{AssetId, VenueRef, ID_LEN},
        venues::{stable_pool::StableSwapPool, synth_exchange::SynthExchange, VenueKind, RATE_SCALE},
    };

    fn asset(n: u8) -> AssetId {
        AssetId::new([n; ID_LEN])
    }

    fn venue(n: u8) -> VenueRef {
        VenueRef::new([n; ID_LEN])
    }

    fn account(n: u8) -> AccountId {
        AccountId::new([n; ID_LEN])
    }

    fn one() -> BigUint {
        BigUint::from(RATE_SCALE)
    }

    /// sUSD (1) and sEUR (2) on one exchange venue, fee as given.
    fn book_with_exchange(fee_bps: u32) -> VenueBook {
        let mut book = VenueBook::new();
        book.add_venue(
            venue(1),
            Box::new(SynthExchange::new(
                hashmap! {
                    asset(1) => one(),
                    asset(2) => one() * 11u32 / 10u32,
                },
                fee_bps,
            )),
        );
        book
    }

    fn round_trip_route() -> Route {
        Route::builder()
            .leg(venue(1), VenueKind::SynthExchange, asset(1), asset(2))
            .leg(venue(1), VenueKind::SynthExchange, asset(2), asset(1))
            .build()
            .unwrap()
    }

    #[test]
    fn round_trip_with_fees_loses_value() {
        let mut book = book_with_exchange(25);
        let caller = account(7);
        let start = BigUint::from(1_000u32) * one();
        book.ledger_mut().credit(&caller, &asset(1), &start);

        let out = execute(&mut book, &caller, &round_trip_route(), start.clone(), BigUint::ZERO)
            .unwrap();
        assert!(out < start);
        assert_eq!(book.ledger().balance_of(&caller, &asset(1)), out);
        // the intermediate synth never reaches the caller
        assert_eq!(book.ledger().balance_of(&caller, &asset(2)), BigUint::ZERO);
    }

    #[test]
    fn zero_fee_round_trip_composes_quotes_exactly() {
        let mut book = book_with_exchange(0);
        let caller = account(7);
        let start = BigUint::from(1_000u32) * one();
        book.ledger_mut().credit(&caller, &asset(1), &start);

        let exchange = book.venue(&venue(1)).unwrap().clone_box();
        let hop = exchange.quote(&asset(1), &asset(2), &start).unwrap();
        let expected = exchange.quote(&asset(2), &asset(1), &hop).unwrap();

        let out = execute(&mut book, &caller, &round_trip_route(), start, BigUint::ZERO).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn view_only_matches_execute_and_leaves_no_trace() {
        let mut book = book_with_exchange(25);
        let caller = account(7);
        let start = BigUint::from(1_000u32) * one();
        book.ledger_mut().credit(&caller, &asset(1), &start);
        let route = round_trip_route();

        let viewed = view_only(&book, &route, start.clone()).unwrap();
        let viewed_again = view_only(&book, &route, start.clone()).unwrap();
        assert_eq!(viewed, viewed_again);

        let executed = execute(&mut book, &caller, &route, start, BigUint::ZERO).unwrap();
        assert_eq!(viewed, executed);
    }

    #[test]
    fn slippage_floor_is_exact_at_the_boundary() {
        let book = book_with_exchange(25);
        let caller = account(7);
        let start = BigUint::from(1_000u32) * one();
        let route = round_trip_route();
        let expected = view_only(&book, &route, start.clone()).unwrap();

        let mut ok_book = book.clone();
        ok_book.ledger_mut().credit(&caller, &asset(1), &start);
        let out = execute(&mut ok_book, &caller, &route, start.clone(), expected.clone()).unwrap();
        assert_eq!(out, expected);

        let mut failing_book = book.clone();
        failing_book
            .ledger_mut()
            .credit(&caller, &asset(1), &start);
        let err = execute(&mut failing_book, &caller, &route, start.clone(), &expected + 1u32)
            .unwrap_err();
        assert!(matches!(err, SwapError::SlippageExceeded { .. }));
        // the aborted batch must not have settled anything
        assert_eq!(failing_book.ledger().balance_of(&caller, &asset(1)), start);
    }

    #[test]
    fn failing_leg_aborts_the_whole_batch() {
        let mut book = book_with_exchange(25);
        // second leg goes through a pool that does not hold asset 2
        book.add_venue(
            venue(2),
            Box::new(StableSwapPool::new(
                [asset(3), asset(4)],
                [BigUint::from(1_000u32), BigUint::from(1_000u32)],
                30,
            )),
        );
        let caller = account(7);
        let start = BigUint::from(1_000u32) * one();
        book.ledger_mut().credit(&caller, &asset(1), &start);

        let route = Route::builder()
            .leg(venue(1), VenueKind::SynthExchange, asset(1), asset(2))
            .leg(venue(2), VenueKind::StableSwapPool, asset(2), asset(3))
            .build()
            .unwrap();
        let err = execute(&mut book, &caller, &route, start.clone(), BigUint::ZERO).unwrap_err();
        assert!(matches!(err, SwapError::Venue(_)));
        // first leg's debit and venue progression are both rolled back
        assert_eq!(book.ledger().balance_of(&caller, &asset(1)), start);
    }

    #[test]
    fn declared_kind_must_match_the_resolved_venue() {
        let book = book_with_exchange(0);
        let route = Route::builder()
            .leg(venue(1), VenueKind::StableSwapPool, asset(1), asset(2))
            .build()
            .unwrap();
        let err = view_only(&book, &route, one()).unwrap_err();
        assert!(matches!(
            err,
            SwapError::Route(RouteError::VenueKindMismatch {
                index: 0,
                declared: VenueKind::StableSwapPool,
                actual: VenueKind::SynthExchange,
                ..
            })
        ));
    }

    #[test]
    fn single_leg_route_equals_adapter_quote() {
        let book = book_with_exchange(25);
        let start = BigUint::from(1_000u32) * one();
        let route = Route::builder()
            .leg(venue(1), VenueKind::SynthExchange, asset(1), asset(2))
            .build()
            .unwrap();
        let out = view_only(&book, &route, start.clone()).unwrap();
        let quoted = book
            .venue(&venue(1))
            .unwrap()
            .quote(&asset(1), &asset(2), &start)
            .unwrap();
        assert_eq!(out, quoted);
    }
}
