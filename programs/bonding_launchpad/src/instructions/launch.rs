//! Token Launch
//!
//! Creates the asset mint, its bonding curve and launch record, mints
//! the full fixed supply into curve custody, and executes the founder's
//! seed purchase at the curve's starting price. The founder pays for
//! their first allocation like any other trader; nothing is minted to
//! them for free.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::curve::buy_quote;
use crate::instructions::trade::{ensure_router_enabled, ThresholdReached, TradeExecuted, TradeSide};
use crate::state::{BondingCurve, Config, CurveError, CurvePhase, LaunchRecord, Role, ASSET_DECIMALS};

/// Event emitted when a token is launched
#[event]
pub struct TokenLaunched {
    pub asset_mint: Pubkey,
    pub curve: Pubkey,
    pub creator: Pubkey,
    pub name: String,
    pub symbol: String,
    pub seed_collateral: u64,
}

/// Accounts for launching a new token
#[derive(Accounts)]
pub struct Launch<'info> {
    /// Launch creator; must hold the Creator role
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Protocol configuration
    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    /// Asset mint (created), authority held by the config PDA
    #[account(
        init,
        payer = creator,
        mint::decimals = ASSET_DECIMALS,
        mint::authority = config,
        seeds = [b"asset", config.launch_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub asset_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Collateral mint
    #[account(constraint = collateral_mint.key() == config.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Bonding curve (created); PDA uniqueness per mint makes a second
    /// curve for the same token unrepresentable
    #[account(
        init,
        payer = creator,
        space = 8 + BondingCurve::INIT_SPACE,
        seeds = [BondingCurve::SEED, asset_mint.key().as_ref()],
        bump,
    )]
    pub curve: Box<Account<'info, BondingCurve>>,

    /// Launch record (created)
    #[account(
        init,
        payer = creator,
        space = 8 + LaunchRecord::INIT_SPACE,
        seeds = [LaunchRecord::SEED, asset_mint.key().as_ref()],
        bump,
    )]
    pub launch_record: Box<Account<'info, LaunchRecord>>,

    /// Curve custody of the asset supply (created)
    #[account(
        init,
        payer = creator,
        associated_token::mint = asset_mint,
        associated_token::authority = curve,
    )]
    pub curve_asset_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Curve custody of deposited collateral (created)
    #[account(
        init,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = curve,
    )]
    pub curve_collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator's collateral account, funds the seed purchase
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = creator,
    )]
    pub creator_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator's asset account, receives the first fill
    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = asset_mint,
        associated_token::authority = creator,
    )]
    pub creator_asset: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Tax destination, validated against config
    #[account(constraint = treasury.key() == config.treasury)]
    pub treasury: UncheckedAccount<'info>,

    /// Treasury's asset account, receives the seed purchase's buy tax
    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = asset_mint,
        associated_token::authority = treasury,
    )]
    pub treasury_asset: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Launch<'info> {
    pub fn launch(
        &mut self,
        name: String,
        symbol: String,
        uri: String,
        description: String,
        initial_collateral_in: u64,
        bumps: &LaunchBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        let router = self.config.key();
        validate_launch(
            &self.config,
            &router,
            &self.creator.key(),
            initial_collateral_in,
        )?;
        require!(
            name.len() <= LaunchRecord::MAX_NAME_LEN,
            LaunchError::NameTooLong
        );
        require!(
            symbol.len() <= LaunchRecord::MAX_SYMBOL_LEN,
            LaunchError::SymbolTooLong
        );
        require!(
            uri.len() <= LaunchRecord::MAX_URI_LEN,
            LaunchError::UriTooLong
        );
        require!(
            description.len() <= LaunchRecord::MAX_DESCRIPTION_LEN,
            LaunchError::DescriptionTooLong
        );

        self.curve.set_inner(BondingCurve {
            asset_mint: self.asset_mint.key(),
            creator: self.creator.key(),
            virtual_collateral_reserve: self.config.initial_virtual_collateral,
            virtual_asset_reserve: self.config.initial_virtual_asset,
            real_collateral_reserve: 0,
            cumulative_asset_sold: 0,
            buy_tax_bps: self.config.buy_tax_bps,
            sell_tax_bps: self.config.sell_tax_bps,
            graduation_threshold: self.config.graduation_threshold,
            phase: CurvePhase::Trading,
            created_at: clock.unix_timestamp,
            bump: bumps.curve,
        });

        self.launch_record.set_inner(LaunchRecord {
            asset_mint: self.asset_mint.key(),
            curve: self.curve.key(),
            creator: self.creator.key(),
            name: name.clone(),
            symbol: symbol.clone(),
            uri,
            description,
            created_at: clock.unix_timestamp,
            graduated: false,
            venue: Pubkey::default(),
            bump: bumps.launch_record,
        });

        // Full fixed supply into curve custody
        let config_seeds = &[Config::SEED, &[self.config.bump]];
        let config_signer = &[&config_seeds[..]];
        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.asset_mint.to_account_info(),
                    to: self.curve_asset_vault.to_account_info(),
                    authority: self.config.to_account_info(),
                },
                config_signer,
            ),
            self.config.asset_total_supply,
        )?;

        self.seed_purchase(initial_collateral_in)?;

        self.config.launch_count = self
            .config
            .launch_count
            .checked_add(1)
            .ok_or(CurveError::Overflow)?;

        emit!(TokenLaunched {
            asset_mint: self.asset_mint.key(),
            curve: self.curve.key(),
            creator: self.creator.key(),
            name,
            symbol,
            seed_collateral: initial_collateral_in,
        });

        Ok(())
    }

    /// The founder's first fill, executed through the same pricing and
    /// tax path as any public buy.
    fn seed_purchase(&mut self, collateral_in: u64) -> Result<()> {
        let quote = buy_quote(
            self.curve.virtual_collateral_reserve,
            self.curve.virtual_asset_reserve,
            collateral_in,
            self.curve.buy_tax_bps,
        )?;

        self.curve_asset_vault.reload()?;
        require!(
            self.curve_asset_vault.amount >= quote.gross_out,
            CurveError::InsufficientReserves
        );

        self.curve.apply_buy(collateral_in, quote.gross_out)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.creator_collateral.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.curve_collateral_vault.to_account_info(),
                    authority: self.creator.to_account_info(),
                },
            ),
            collateral_in,
            self.collateral_mint.decimals,
        )?;

        let mint_key = self.asset_mint.key();
        let curve_seeds = &[BondingCurve::SEED, mint_key.as_ref(), &[self.curve.bump]];
        let curve_signer = &[&curve_seeds[..]];
        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.curve_asset_vault.to_account_info(),
                    mint: self.asset_mint.to_account_info(),
                    to: self.creator_asset.to_account_info(),
                    authority: self.curve.to_account_info(),
                },
                curve_signer,
            ),
            quote.net_out,
            self.asset_mint.decimals,
        )?;
        if quote.tax > 0 {
            transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.curve_asset_vault.to_account_info(),
                        mint: self.asset_mint.to_account_info(),
                        to: self.treasury_asset.to_account_info(),
                        authority: self.curve.to_account_info(),
                    },
                    curve_signer,
                ),
                quote.tax,
                self.asset_mint.decimals,
            )?;
        }

        emit!(TradeExecuted {
            asset_mint: self.asset_mint.key(),
            trader: self.creator.key(),
            side: TradeSide::Buy,
            amount_in: collateral_in,
            gross_out: quote.gross_out,
            tax: quote.tax,
            net_out: quote.net_out,
            virtual_collateral_reserve: self.curve.virtual_collateral_reserve,
            virtual_asset_reserve: self.curve.virtual_asset_reserve,
            cumulative_asset_sold: self.curve.cumulative_asset_sold,
        });

        // A seed large enough to cross the threshold graduates the
        // curve immediately, same latch as the public trade path
        if self.curve.crossed_threshold() {
            self.curve.begin_graduation()?;
            emit!(ThresholdReached {
                asset_mint: self.asset_mint.key(),
                cumulative_asset_sold: self.curve.cumulative_asset_sold,
                graduation_threshold: self.curve.graduation_threshold,
            });
        }

        Ok(())
    }
}

/// Pre-flight gates for a launch: the embedded router must hold its
/// Executor grant (the founder seed fill is a curve trade), the caller
/// must hold Creator, and the seed must meet the configured minimum.
pub(crate) fn validate_launch(
    config: &Config,
    router: &Pubkey,
    creator: &Pubkey,
    seed: u64,
) -> Result<()> {
    ensure_router_enabled(config, router)?;
    require!(
        config.has_role(creator, Role::Creator),
        LaunchError::Unauthorized
    );
    require!(seed >= config.min_seed, LaunchError::InsufficientSeed);
    Ok(())
}

#[error_code]
pub enum LaunchError {
    #[msg("Caller does not hold the Creator role")]
    Unauthorized,
    #[msg("Seed purchase is below the configured minimum")]
    InsufficientSeed,
    #[msg("Name exceeds maximum length")]
    NameTooLong,
    #[msg("Symbol exceeds maximum length")]
    SymbolTooLong,
    #[msg("URI exceeds maximum length")]
    UriTooLong,
    #[msg("Description exceeds maximum length")]
    DescriptionTooLong,
}
