//! # Constant-Product Pricing
//!
//! Pure swap math for the bonding curve, collateral <-> asset.
//!
//! ## The Core Invariant
//!
//! ```text
//! virtual_collateral * virtual_asset = k
//! ```
//!
//! A trade moves along the curve at constant k:
//!
//! ```text
//! buy:  asset_out      = Va - k / (Vc + collateral_in)
//! sell: collateral_out = Vc - k / (Va + asset_in)
//! ```
//!
//! ## Tax ordering
//!
//! The tax is **not** part of the swap. The reserves absorb the full
//! gross amounts (preserving k); the tax is carved out of the leg that
//! leaves the curve toward the trader:
//!
//! ```text
//! net = gross * (10_000 - tax_bps) / 10_000
//! tax = gross - net
//! ```
//!
//! Callers enforcing slippage MUST compare `min_out` against `net_out`,
//! never `gross_out`. Checking the gross amount lets a trade pass its
//! slippage gate while delivering less than the trader's declared
//! minimum once the tax is taken.

use anchor_lang::prelude::*;

/// Basis-point denominator for tax math.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Errors specific to the pricing math
#[error_code]
pub enum PricingError {
    #[msg("Reserves must be positive")]
    InvalidReserves,
    #[msg("Tax exceeds 100%")]
    InvalidTax,
    #[msg("Arithmetic overflow")]
    Overflow,
}

/// Fully-resolved execution of one trade against the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    /// Pre-tax output computed by the constant-product swap; this is
    /// the amount the reserves give up
    pub gross_out: u64,
    /// Treasury's cut, taken from the output leg
    pub tax: u64,
    /// Amount actually delivered to the trader
    pub net_out: u64,
}

/// Quote a buy: `collateral_in` enters the curve, asset leaves it.
pub fn buy_quote(
    virtual_collateral: u64,
    virtual_asset: u64,
    collateral_in: u64,
    tax_bps: u16,
) -> Result<Quote> {
    let gross_out = swap_out(virtual_collateral, virtual_asset, collateral_in)?;
    split_tax(gross_out, tax_bps)
}

/// Quote a sell: `asset_in` enters the curve, collateral leaves it.
pub fn sell_quote(
    virtual_collateral: u64,
    virtual_asset: u64,
    asset_in: u64,
    tax_bps: u16,
) -> Result<Quote> {
    let gross_out = swap_out(virtual_asset, virtual_collateral, asset_in)?;
    split_tax(gross_out, tax_bps)
}

/// Gross constant-product output: `out = R_out - k / (R_in + in)`.
fn swap_out(reserve_in: u64, reserve_out: u64, amount_in: u64) -> Result<u64> {
    require!(reserve_in > 0 && reserve_out > 0, PricingError::InvalidReserves);

    let k = (reserve_in as u128)
        .checked_mul(reserve_out as u128)
        .ok_or(PricingError::Overflow)?;
    let new_reserve_in = (reserve_in as u128)
        .checked_add(amount_in as u128)
        .ok_or(PricingError::Overflow)?;
    // Rounds the kept reserve down, i.e. the output up by at most one
    // base unit; the reserve update in state code uses the same gross
    // figure, so k never drifts against the curve.
    let new_reserve_out = k
        .checked_div(new_reserve_in)
        .ok_or(PricingError::Overflow)?;
    let out = (reserve_out as u128)
        .checked_sub(new_reserve_out)
        .ok_or(PricingError::Overflow)?;

    Ok(out as u64)
}

/// Split a gross output into the trader's net share and the treasury tax.
fn split_tax(gross_out: u64, tax_bps: u16) -> Result<Quote> {
    require!(u64::from(tax_bps) <= BPS_DENOMINATOR, PricingError::InvalidTax);

    let net_out = (gross_out as u128)
        .checked_mul((BPS_DENOMINATOR - u64::from(tax_bps)) as u128)
        .ok_or(PricingError::Overflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(PricingError::Overflow)? as u64;
    let tax = gross_out
        .checked_sub(net_out)
        .ok_or(PricingError::Overflow)?;

    Ok(Quote {
        gross_out,
        tax,
        net_out,
    })
}

// ============================================================================
// TESTS
// ============================================================================
