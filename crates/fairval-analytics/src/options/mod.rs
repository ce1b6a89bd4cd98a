//! Option pricing for equity options.
//!
//! This module provides:
//!
//! - **Black-Scholes**: Closed-form pricing of European calls and puts on a
//!   dividend-paying underlying ([`BlackScholesEngine`])
//! - **Greeks**: Delta, gamma, theta, vega and rho ([`Greeks`])
//! - **Put-call parity**: Opposite-side prices and consistency checks
//!
//! # Overview
//!
//! Every operation derives from one pair of intermediates:
//!
//! ```text
//! d1 = (ln(S/K) + (r - q + σ²/2)·T) / (σ·√T)
//! d2 = d1 - σ·√T
//! ```
//!
//! American options are rejected with `ValuationError::UnsupportedStyle`; no
//! approximation is attempted.

mod black_scholes;
mod distribution;
mod greeks;

pub use black_scholes::BlackScholesEngine;
pub use distribution::{norm_cdf, norm_pdf};
pub use greeks::Greeks;
