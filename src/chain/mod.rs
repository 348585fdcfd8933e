//! Chained multi-venue execution.
//!
//! A caller assembles an ordered [`Route`] of venue legs, each with its
//! input amount deliberately absent, and hands it to the executor. Legs run
//! strictly sequentially: the realized output of leg *k* fills the amount
//! slot of leg *k+1*, so otherwise-independent venue calls behave as one
//! atomic multi-leg swap without intermediate asset transfers.

pub mod errors;
pub mod executor;
pub mod route;

pub use errors::RouteError;
pub use executor::{execute, view_only};
pub use route::{Leg, Route, RouteBuilder};
