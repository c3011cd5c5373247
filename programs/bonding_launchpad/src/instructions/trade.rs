//! Trade Routing
//!
//! Buy/sell against a token's bonding curve with tax deduction,
//! slippage protection and deadline enforcement.
//!
//! Ordering inside a trade is fixed: compute the gross swap, carve the
//! tax out of the output leg, check the caller's minimum against the
//! **net** amount, then mutate reserves and move funds. The whole
//! sequence is one transaction; any failed check discards everything.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::curve::{buy_quote, sell_quote, Quote};
use crate::state::{BondingCurve, Config, CurveError, Role};

/// Trade direction, as recorded in events
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Event emitted for every executed trade
#[event]
pub struct TradeExecuted {
    pub asset_mint: Pubkey,
    pub trader: Pubkey,
    pub side: TradeSide,
    pub amount_in: u64,
    pub gross_out: u64,
    pub tax: u64,
    pub net_out: u64,
    pub virtual_collateral_reserve: u64,
    pub virtual_asset_reserve: u64,
    pub cumulative_asset_sold: u64,
}

/// Event emitted by the trade that crosses the graduation threshold
#[event]
pub struct ThresholdReached {
    pub asset_mint: Pubkey,
    pub cumulative_asset_sold: u64,
    pub graduation_threshold: u64,
}

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Protocol configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    /// Curve being traded against
    #[account(
        mut,
        seeds = [BondingCurve::SEED, asset_mint.key().as_ref()],
        bump = curve.bump,
    )]
    pub curve: Box<Account<'info, BondingCurve>>,

    /// Launched asset mint
    #[account(constraint = asset_mint.key() == curve.asset_mint)]
    pub asset_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Collateral mint
    #[account(constraint = collateral_mint.key() == config.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Curve custody of collateral deposited by traders
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

    /// Trader's collateral account
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = trader,
    )]
    pub trader_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Trader's asset account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = asset_mint,
        associated_token::authority = trader,
    )]
    pub trader_asset: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Tax destination, validated against config
    #[account(constraint = treasury.key() == config.treasury @ TradeError::InvalidTreasury)]
    pub treasury: UncheckedAccount<'info>,

    /// Treasury's collateral account (sell taxes)
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = collateral_mint,
        associated_token::authority = treasury,
    )]
    pub treasury_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Treasury's asset account (buy taxes)
    #[account(
        init_if_needed,
        payer = trader,
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

impl<'info> Trade<'info> {
    /// Buy the asset with collateral.
    pub fn buy(&mut self, collateral_in: u64, min_asset_out: u64, deadline: i64) -> Result<u64> {
        self.pre_trade_checks(collateral_in, deadline)?;

        let quote = buy_quote(
            self.curve.virtual_collateral_reserve,
            self.curve.virtual_asset_reserve,
            collateral_in,
            self.curve.buy_tax_bps,
        )?;
        ensure_min_out(&quote, min_asset_out)?;
        require!(
            self.curve_asset_vault.amount >= quote.gross_out,
            CurveError::InsufficientReserves
        );

        self.curve.apply_buy(collateral_in, quote.gross_out)?;

        // Collateral in, then the gross asset output split between
        // trader and treasury
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_collateral.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.curve_collateral_vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            collateral_in,
            self.collateral_mint.decimals,
        )?;
        self.pay_out_asset(&self.trader_asset.to_account_info(), quote.net_out)?;
        if quote.tax > 0 {
            self.pay_out_asset(&self.treasury_asset.to_account_info(), quote.tax)?;
        }

        self.settle(TradeSide::Buy, collateral_in, quote)?;
        Ok(quote.net_out)
    }

    /// Sell the asset back to the curve for collateral.
    pub fn sell(&mut self, asset_in: u64, min_collateral_out: u64, deadline: i64) -> Result<u64> {
        self.pre_trade_checks(asset_in, deadline)?;

        let quote = sell_quote(
            self.curve.virtual_collateral_reserve,
            self.curve.virtual_asset_reserve,
            asset_in,
            self.curve.sell_tax_bps,
        )?;
        ensure_min_out(&quote, min_collateral_out)?;

        self.curve.apply_sell(asset_in, quote.gross_out)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_asset.to_account_info(),
                    mint: self.asset_mint.to_account_info(),
                    to: self.curve_asset_vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            asset_in,
            self.asset_mint.decimals,
        )?;
        self.pay_out_collateral(&self.trader_collateral.to_account_info(), quote.net_out)?;
        if quote.tax > 0 {
            self.pay_out_collateral(&self.treasury_collateral.to_account_info(), quote.tax)?;
        }

        self.settle(TradeSide::Sell, asset_in, quote)?;
        Ok(quote.net_out)
    }

    fn pre_trade_checks(&self, amount_in: u64, deadline: i64) -> Result<()> {
        let clock = Clock::get()?;
        ensure_not_expired(clock.unix_timestamp, deadline)?;
        require!(amount_in > 0, TradeError::ZeroAmount);
        require!(self.curve.is_trading(), CurveError::CurveNotTrading);
        let router = self.config.key();
        ensure_router_enabled(&self.config, &router)?;
        Ok(())
    }

    fn pay_out_asset(&self, to: &AccountInfo<'info>, amount: u64) -> Result<()> {
        let mint_key = self.asset_mint.key();
        let seeds = &[BondingCurve::SEED, mint_key.as_ref(), &[self.curve.bump]];
        let signer_seeds = &[&seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.curve_asset_vault.to_account_info(),
                    mint: self.asset_mint.to_account_info(),
                    to: to.clone(),
                    authority: self.curve.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            self.asset_mint.decimals,
        )
    }

    fn pay_out_collateral(&self, to: &AccountInfo<'info>, amount: u64) -> Result<()> {
        let mint_key = self.asset_mint.key();
        let seeds = &[BondingCurve::SEED, mint_key.as_ref(), &[self.curve.bump]];
        let signer_seeds = &[&seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.curve_collateral_vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: to.clone(),
                    authority: self.curve.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            self.collateral_mint.decimals,
        )
    }

    /// Emit the trade record and fire the graduation latch if this
    /// trade crossed the threshold. The crossing trade itself has
    /// already executed at curve pricing.
    fn settle(&mut self, side: TradeSide, amount_in: u64, quote: Quote) -> Result<()> {
        emit!(TradeExecuted {
            asset_mint: self.asset_mint.key(),
            trader: self.trader.key(),
            side,
            amount_in,
            gross_out: quote.gross_out,
            tax: quote.tax,
            net_out: quote.net_out,
            virtual_collateral_reserve: self.curve.virtual_collateral_reserve,
            virtual_asset_reserve: self.curve.virtual_asset_reserve,
            cumulative_asset_sold: self.curve.cumulative_asset_sold,
        });

        if self.curve.crossed_threshold() {
            self.curve.begin_graduation()?;
            emit!(ThresholdReached {
                asset_mint: self.asset_mint.key(),
                cumulative_asset_sold: self.curve.cumulative_asset_sold,
                graduation_threshold: self.curve.graduation_threshold,
            });
            msg!("Curve {} entered graduation", self.asset_mint.key());
        }

        Ok(())
    }
}

/// The embedded router runs under the Executor grant; revoking it
/// halts every path that moves curve reserves, the founder seed fill
/// at launch included.
pub(crate) fn ensure_router_enabled(config: &Config, router: &Pubkey) -> Result<()> {
    require!(
        config.has_role(router, Role::Executor),
        TradeError::RouterDisabled
    );
    Ok(())
}

/// Reject a trade evaluated after its deadline.
pub(crate) fn ensure_not_expired(now: i64, deadline: i64) -> Result<()> {
    require!(now <= deadline, TradeError::Expired);
    Ok(())
}

/// Slippage gate: the caller's minimum holds against the net amount
/// actually delivered, after tax.
pub(crate) fn ensure_min_out(quote: &Quote, min_out: u64) -> Result<()> {
    require!(quote.net_out >= min_out, TradeError::SlippageExceeded);
    Ok(())
}

#[error_code]
pub enum TradeError {
    #[msg("Trade deadline has passed")]
    Expired,
    #[msg("Trade amount must be greater than zero")]
    ZeroAmount,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("Router is disabled")]
    RouterDisabled,
    #[msg("Treasury account does not match configuration")]
    InvalidTreasury,
}
