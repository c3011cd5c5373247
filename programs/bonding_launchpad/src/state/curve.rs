//! Bonding Curve State
//!
//! One curve account per launched token. The curve prices the asset
//! against virtual reserves under a constant-product formula and walks
//! a one-way lifecycle: Trading -> Graduating -> Graduated.
//!
//! All reserve mutation goes through `apply_buy` / `apply_sell`; both
//! refuse to run once the curve has left the Trading phase, so reserves
//! are frozen the moment graduation starts.

use anchor_lang::prelude::*;

/// Per-token bonding curve account
///
/// Seeds: ["curve", asset_mint]
#[account]
#[derive(InitSpace)]
pub struct BondingCurve {
    /// Mint of the asset this curve prices
    pub asset_mint: Pubkey,

    /// Launch creator
    pub creator: Pubkey,

    /// Virtual collateral reserve (pricing only, not 1:1 backed)
    pub virtual_collateral_reserve: u64,

    /// Virtual asset reserve (pricing only)
    pub virtual_asset_reserve: u64,

    /// Collateral actually deposited by traders; funds the venue at graduation
    pub real_collateral_reserve: u64,

    /// Asset units sold out of the curve to the public; never decreases
    pub cumulative_asset_sold: u64,

    /// Buy tax snapshot taken at creation
    pub buy_tax_bps: u16,

    /// Sell tax snapshot taken at creation
    pub sell_tax_bps: u16,

    /// Graduation threshold snapshot taken at creation
    pub graduation_threshold: u64,

    /// Lifecycle phase
    pub phase: CurvePhase,

    /// Unix timestamp of creation
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

/// Curve lifecycle phase. Transitions are one-way and never skip a state.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum CurvePhase {
    /// Open for curve trading
    #[default]
    Trading,
    /// Threshold crossed, trading halted, venue migration pending
    Graduating,
    /// Liquidity migrated, curve terminal
    Graduated,
}

impl BondingCurve {
    pub const SEED: &'static [u8] = b"curve";

    pub fn is_trading(&self) -> bool {
        self.phase == CurvePhase::Trading
    }

    /// Apply the gross swap of a buy: collateral enters, asset leaves.
    ///
    /// `gross_asset_out` is the pre-tax output; tax is taken from the
    /// leg paid to the trader and never touches the reserves here.
    pub fn apply_buy(&mut self, collateral_in: u64, gross_asset_out: u64) -> Result<()> {
        require!(self.is_trading(), CurveError::CurveNotTrading);

        self.virtual_collateral_reserve = self
            .virtual_collateral_reserve
            .checked_add(collateral_in)
            .ok_or(CurveError::Overflow)?;
        self.virtual_asset_reserve = self
            .virtual_asset_reserve
            .checked_sub(gross_asset_out)
            .ok_or(CurveError::InsufficientReserves)?;
        self.real_collateral_reserve = self
            .real_collateral_reserve
            .checked_add(collateral_in)
            .ok_or(CurveError::Overflow)?;
        self.cumulative_asset_sold = self
            .cumulative_asset_sold
            .checked_add(gross_asset_out)
            .ok_or(CurveError::Overflow)?;

        Ok(())
    }

    /// Apply the gross swap of a sell: asset returns, collateral leaves.
    ///
    /// The full gross collateral output leaves the real reserve; the
    /// treasury's tax cut and the trader's net share are both paid out
    /// of it. `cumulative_asset_sold` is deliberately untouched.
    pub fn apply_sell(&mut self, asset_in: u64, gross_collateral_out: u64) -> Result<()> {
        require!(self.is_trading(), CurveError::CurveNotTrading);

        self.real_collateral_reserve = self
            .real_collateral_reserve
            .checked_sub(gross_collateral_out)
            .ok_or(CurveError::InsufficientReserves)?;
        self.virtual_collateral_reserve = self
            .virtual_collateral_reserve
            .checked_sub(gross_collateral_out)
            .ok_or(CurveError::InsufficientReserves)?;
        self.virtual_asset_reserve = self
            .virtual_asset_reserve
            .checked_add(asset_in)
            .ok_or(CurveError::Overflow)?;

        Ok(())
    }

    /// Whether cumulative sales have reached the graduation threshold.
    pub fn crossed_threshold(&self) -> bool {
        self.cumulative_asset_sold >= self.graduation_threshold
    }

    /// Trading -> Graduating. Fired by the trade that crosses the
    /// threshold, after that trade has executed at curve pricing.
    pub fn begin_graduation(&mut self) -> Result<()> {
        require!(
            self.phase == CurvePhase::Trading,
            CurveError::InvalidTransition
        );
        self.phase = CurvePhase::Graduating;
        Ok(())
    }

    /// Graduating -> Graduated. Only after the venue has received the
    /// earmarked liquidity; never callable straight from Trading.
    pub fn finalize_graduation(&mut self) -> Result<()> {
        require!(
            self.phase == CurvePhase::Graduating,
            CurveError::InvalidTransition
        );
        self.phase = CurvePhase::Graduated;
        Ok(())
    }
}

#[error_code]
pub enum CurveError {
    #[msg("Curve is not open for trading")]
    CurveNotTrading,
    #[msg("Curve lifecycle transition called out of order")]
    InvalidTransition,
    #[msg("Curve reserves cannot cover this trade")]
    InsufficientReserves,
    #[msg("Arithmetic overflow")]
    Overflow,
}
