//! # Curve Pricing Module
//!
//! Constant-product swap math for the bonding curve.
//!
//! ```text
//!            Vc * Va = k
//!
//!   ┌────────────────────────────────────────┐
//!   │            Reserve Space               │
//!   │                                        │
//!   │    Va ▲                                │
//!   │       │ ╲                              │
//!   │       │   ╲        k = constant        │
//!   │       │     ╲__                        │
//!   │       │        ╲______                 │
//!   │       └──────────────────▶ Vc          │
//!   │                                        │
//!   │  Points on the curve = valid states    │
//!   │  Virtual reserves bootstrap the price  │
//!   │  before any real liquidity exists      │
//!   └────────────────────────────────────────┘
//! ```

pub mod constant_product;

pub use constant_product::*;
