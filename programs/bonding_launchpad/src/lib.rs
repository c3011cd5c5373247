//! # Bonding Launchpad
//!
//! A permissionless bonding-curve token launchpad on Solana.
//!
//! ## Overview
//!
//! A creator launches a new token against virtual reserves on a
//! constant-product curve, the public buys and sells through the curve,
//! and once cumulative sales cross a configured threshold the curve
//! graduates: trading halts and the accumulated liquidity migrates to a
//! permanent venue.
//!
//! ## How it works
//! - Every curve is seeded with virtual reserves, so the price is
//!   well-defined from the very first trade.
//! - Trade taxes come out of the output leg; slippage minimums are
//!   enforced against the net amount the trader actually receives.
//! - Graduation is one-way: Trading -> Graduating -> Graduated, with
//!   the Graduating phase halting trades while migration is pending.

use anchor_lang::prelude::*;

pub mod curve;
pub mod instructions;
pub mod state;

pub use curve::*;
pub use instructions::*;
pub use state::Role;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Main launchpad program
#[program]
pub mod bonding_launchpad {
    use super::*;
    use crate::state::Role;

    /// Initialize the protocol with global configuration
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        ctx.accounts.initialize(params, ctx.bumps)
    }

    /// Update the taxes applied to curves created from now on (admin)
    pub fn set_fee_params(
        ctx: Context<Configure>,
        buy_tax_bps: u16,
        sell_tax_bps: u16,
    ) -> Result<()> {
        ctx.accounts.set_fee_params(buy_tax_bps, sell_tax_bps)
    }

    /// Point trade taxes at a new treasury (admin)
    pub fn set_treasury(ctx: Context<Configure>, treasury: Pubkey) -> Result<()> {
        ctx.accounts.set_treasury(treasury)
    }

    /// Grant a role to a principal (admin)
    pub fn grant_role(ctx: Context<Configure>, principal: Pubkey, role: Role) -> Result<()> {
        ctx.accounts.grant_role(principal, role)
    }

    /// Revoke a role from a principal (admin)
    pub fn revoke_role(ctx: Context<Configure>, principal: Pubkey, role: Role) -> Result<()> {
        ctx.accounts.revoke_role(principal, role)
    }

    /// Launch a token: create its curve, mint the supply into curve
    /// custody, and execute the founder's seed purchase
    pub fn launch(
        ctx: Context<Launch>,
        name: String,
        symbol: String,
        uri: String,
        description: String,
        initial_collateral_in: u64,
    ) -> Result<()> {
        ctx.accounts.launch(
            name,
            symbol,
            uri,
            description,
            initial_collateral_in,
            &ctx.bumps,
        )
    }

    /// Buy the asset with collateral through its bonding curve
    pub fn buy(
        ctx: Context<Trade>,
        collateral_in: u64,
        min_asset_out: u64,
        deadline: i64,
    ) -> Result<u64> {
        ctx.accounts.buy(collateral_in, min_asset_out, deadline)
    }

    /// Sell the asset back to its bonding curve for collateral
    pub fn sell(
        ctx: Context<Trade>,
        asset_in: u64,
        min_collateral_out: u64,
        deadline: i64,
    ) -> Result<u64> {
        ctx.accounts.sell(asset_in, min_collateral_out, deadline)
    }

    /// Migrate a crossed curve's earmarked liquidity to the venue
    /// (graduator only; retryable while the curve stays Graduating)
    pub fn graduate(ctx: Context<Graduate>) -> Result<()> {
        ctx.accounts.graduate()
    }
}
