//! Protocol Initialization
//!
//! Sets up the global configuration and seeds the role table.
//! This is typically called once during deployment.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::state::{Config, Role, MAX_TAX_BPS};

/// Launch-economics parameters fixed at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeParams {
    /// Treasury receiving trade taxes
    pub treasury: Pubkey,
    /// Custody that receives migrated liquidity at graduation
    pub venue_authority: Pubkey,
    /// Buy tax in basis points
    pub buy_tax_bps: u16,
    /// Sell tax in basis points
    pub sell_tax_bps: u16,
    /// Cumulative-sale threshold triggering graduation (asset base units)
    pub graduation_threshold: u64,
    /// Virtual collateral seeded into new curves
    pub initial_virtual_collateral: u64,
    /// Virtual asset reserve seeded into new curves
    pub initial_virtual_asset: u64,
    /// Fixed supply minted to curve custody per launch
    pub asset_total_supply: u64,
    /// Remaining-supply carve-out moved to the venue at graduation
    pub lp_asset_supply: u64,
    /// Minimum founder seed purchase
    pub min_seed: u64,
}

/// Accounts required for protocol initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Protocol administrator (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// Collateral token mint (e.g., USDC)
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the protocol configuration
    pub fn initialize(&mut self, params: InitializeParams, bumps: InitializeBumps) -> Result<()> {
        require!(
            params.buy_tax_bps <= MAX_TAX_BPS && params.sell_tax_bps <= MAX_TAX_BPS,
            InitializeError::FeeTooHigh
        );
        require!(
            params.initial_virtual_collateral > 0 && params.initial_virtual_asset > 0,
            InitializeError::InvalidCurveParams
        );
        require!(
            params.graduation_threshold > 0
                && params.graduation_threshold <= params.asset_total_supply,
            InitializeError::InvalidThreshold
        );
        require!(
            params.lp_asset_supply <= params.asset_total_supply,
            InitializeError::InvalidCurveParams
        );

        self.config.set_inner(Config {
            admin: self.admin.key(),
            treasury: params.treasury,
            venue_authority: params.venue_authority,
            collateral_mint: self.collateral_mint.key(),
            buy_tax_bps: params.buy_tax_bps,
            sell_tax_bps: params.sell_tax_bps,
            graduation_threshold: params.graduation_threshold,
            initial_virtual_collateral: params.initial_virtual_collateral,
            initial_virtual_asset: params.initial_virtual_asset,
            asset_total_supply: params.asset_total_supply,
            lp_asset_supply: params.lp_asset_supply,
            min_seed: params.min_seed,
            launch_count: 0,
            roles: vec![],
            bump: bumps.config,
        });

        // The admin manages the table; the config PDA is the embedded
        // router's identity and starts enabled.
        self.config.grant(self.admin.key(), Role::Admin)?;
        let router = self.config.key();
        self.config.grant(router, Role::Executor)?;

        msg!("Launchpad initialized");
        msg!("Admin: {}", self.admin.key());
        msg!("Treasury: {}", params.treasury);
        msg!(
            "Taxes: {} bps buy / {} bps sell",
            params.buy_tax_bps,
            params.sell_tax_bps
        );

        Ok(())
    }
}

#[error_code]
pub enum InitializeError {
    #[msg("Tax cannot exceed 30%")]
    FeeTooHigh,
    #[msg("Curve parameters are inconsistent")]
    InvalidCurveParams,
    #[msg("Graduation threshold must be positive and within total supply")]
    InvalidThreshold,
}
