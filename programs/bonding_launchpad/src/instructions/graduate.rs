//! Graduation
//!
//! Migrates a curve that crossed its threshold into the permanent
//! venue. The threshold-crossing trade already flipped the curve to
//! Graduating, which halts trading and acts as the mutual-exclusion
//! latch; this instruction moves the earmarked liquidity and finalizes.
//!
//! If any transfer fails the whole transaction reverts and the curve
//! stays Graduating — deliberately halted, retryable by the operator,
//! never re-opened for trading. The Graduating gate also means the
//! venue receives the liquidity at most once per curve.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        burn, transfer_checked, Burn, Mint, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::state::{BondingCurve, Config, CurveError, CurvePhase, LaunchRecord, Role};

/// Event emitted when a curve's liquidity reaches the venue
#[event]
pub struct CurveGraduated {
    pub asset_mint: Pubkey,
    pub venue: Pubkey,
    pub collateral_migrated: u64,
    pub asset_migrated: u64,
    pub asset_burned: u64,
    pub timestamp: i64,
}

/// Accounts for finalizing a graduation
#[derive(Accounts)]
pub struct Graduate<'info> {
    /// Operator; must hold the Graduator role
    #[account(mut)]
    pub operator: Signer<'info>,

    /// Protocol configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    /// Curve pending graduation
    #[account(
        mut,
        seeds = [BondingCurve::SEED, asset_mint.key().as_ref()],
        bump = curve.bump,
        constraint = curve.phase == CurvePhase::Graduating @ CurveError::InvalidTransition,
    )]
    pub curve: Box<Account<'info, BondingCurve>>,

    /// Launch record for the graduated flag and venue id
    #[account(
        mut,
        seeds = [LaunchRecord::SEED, asset_mint.key().as_ref()],
        bump = launch_record.bump,
    )]
    pub launch_record: Box<Account<'info, LaunchRecord>>,

    /// Launched asset mint (unsold overhang is burned)
    #[account(mut, constraint = asset_mint.key() == curve.asset_mint)]
    pub asset_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Collateral mint
    #[account(constraint = collateral_mint.key() == config.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Curve custody of deposited collateral
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = curve,
    )]
    pub curve_collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Curve custody of the unsold asset supply
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = curve,
    )]
    pub curve_asset_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Venue custody, validated against config
    #[account(constraint = venue_authority.key() == config.venue_authority @ GraduateError::InvalidVenue)]
    pub venue_authority: UncheckedAccount<'info>,

    /// Venue's collateral account
    #[account(
        init_if_needed,
        payer = operator,
        associated_token::mint = collateral_mint,
        associated_token::authority = venue_authority,
    )]
    pub venue_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Venue's asset account
    #[account(
        init_if_needed,
        payer = operator,
        associated_token::mint = asset_mint,
        associated_token::authority = venue_authority,
    )]
    pub venue_asset: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Graduate<'info> {
    pub fn graduate(&mut self) -> Result<()> {
        let clock = Clock::get()?;

        ensure_graduator(&self.config, &self.operator.key())?;

        // Earmarked amounts: every unit of real collateral, plus the
        // configured carve-out of the unsold supply. Whatever custody
        // still holds beyond the carve-out is burned so no supply
        // survives outside the venue.
        let collateral_out = self.curve.real_collateral_reserve;
        let asset_out = self.config.lp_asset_supply.min(self.curve_asset_vault.amount);
        let asset_burn = self
            .curve_asset_vault
            .amount
            .checked_sub(asset_out)
            .ok_or(CurveError::Overflow)?;

        let mint_key = self.asset_mint.key();
        let curve_seeds = &[BondingCurve::SEED, mint_key.as_ref(), &[self.curve.bump]];
        let curve_signer = &[&curve_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.curve_collateral_vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.venue_collateral.to_account_info(),
                    authority: self.curve.to_account_info(),
                },
                curve_signer,
            ),
            collateral_out,
            self.collateral_mint.decimals,
        )?;
        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.curve_asset_vault.to_account_info(),
                    mint: self.asset_mint.to_account_info(),
                    to: self.venue_asset.to_account_info(),
                    authority: self.curve.to_account_info(),
                },
                curve_signer,
            ),
            asset_out,
            self.asset_mint.decimals,
        )?;
        if asset_burn > 0 {
            burn(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    Burn {
                        mint: self.asset_mint.to_account_info(),
                        from: self.curve_asset_vault.to_account_info(),
                        authority: self.curve.to_account_info(),
                    },
                    curve_signer,
                ),
                asset_burn,
            )?;
        }

        self.curve.finalize_graduation()?;
        self.launch_record.graduated = true;
        self.launch_record.venue = self.venue_authority.key();

        emit!(CurveGraduated {
            asset_mint: self.asset_mint.key(),
            venue: self.venue_authority.key(),
            collateral_migrated: collateral_out,
            asset_migrated: asset_out,
            asset_burned: asset_burn,
            timestamp: clock.unix_timestamp,
        });
        msg!("Curve {} graduated", self.asset_mint.key());

        Ok(())
    }
}

/// Only Graduator holders may move a pending curve's liquidity.
pub(crate) fn ensure_graduator(config: &Config, operator: &Pubkey) -> Result<()> {
    require!(
        config.has_role(operator, Role::Graduator),
        GraduateError::Unauthorized
    );
    Ok(())
}

#[error_code]
pub enum GraduateError {
    #[msg("Caller does not hold the Graduator role")]
    Unauthorized,
    #[msg("Venue custody does not match configuration")]
    InvalidVenue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_graduator_holders_may_finalize() {
        let operator = Pubkey::new_unique();
        let mut config = Config {
            admin: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            venue_authority: Pubkey::new_unique(),
            collateral_mint: Pubkey::new_unique(),
            buy_tax_bps: 100,
            sell_tax_bps: 100,
            graduation_threshold: 1_000,
            initial_virtual_collateral: 1_000,
            initial_virtual_asset: 1_000,
            asset_total_supply: 10_000,
            lp_asset_supply: 2_000,
            min_seed: 1,
            launch_count: 0,
            roles: vec![],
            bump: 255,
        };

        let err = ensure_graduator(&config, &operator).unwrap_err();
        assert_eq!(err, error!(GraduateError::Unauthorized));

        config.grant(operator, Role::Graduator).unwrap();
        ensure_graduator(&config, &operator).unwrap();

        config.revoke(&operator, Role::Graduator);
        let err = ensure_graduator(&config, &operator).unwrap_err();
        assert_eq!(err, error!(GraduateError::Unauthorized));
    }
}
