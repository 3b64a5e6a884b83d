#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based test suite entry point.
//!
//! Run with:
//!
//! ```bash
//! cargo test -p chef --test property
//! ```
//!
//! To increase the number of generated cases:
//!
//! ```bash
//! PROPTEST_CASES=512 cargo test -p chef --test property
//! ```

mod emission;
mod harness;
mod ledger;
