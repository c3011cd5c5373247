//! Protocol Administration
//!
//! Tax/treasury updates and role management. Every operation requires
//! the Admin role; changes to taxes apply only to curves created
//! afterwards, since each curve snapshots its rates at creation.

use anchor_lang::prelude::*;

use crate::state::{Config, Role, MAX_TAX_BPS};

/// Accounts for admin operations
#[derive(Accounts)]
pub struct Configure<'info> {
    /// Must hold the Admin role
    pub admin: Signer<'info>,

    /// Protocol configuration
    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> Configure<'info> {
    fn require_admin(&self) -> Result<()> {
        ensure_admin(&self.config, &self.admin.key())
    }

    /// Update the taxes snapshotted onto future curves.
    pub fn set_fee_params(&mut self, buy_tax_bps: u16, sell_tax_bps: u16) -> Result<()> {
        self.require_admin()?;
        require!(
            buy_tax_bps <= MAX_TAX_BPS && sell_tax_bps <= MAX_TAX_BPS,
            ConfigureError::FeeTooHigh
        );

        self.config.buy_tax_bps = buy_tax_bps;
        self.config.sell_tax_bps = sell_tax_bps;

        msg!("Taxes set to {} bps buy / {} bps sell", buy_tax_bps, sell_tax_bps);
        Ok(())
    }

    /// Point trade taxes at a new treasury.
    pub fn set_treasury(&mut self, treasury: Pubkey) -> Result<()> {
        self.require_admin()?;
        self.config.treasury = treasury;

        msg!("Treasury set to {}", treasury);
        Ok(())
    }

    pub fn grant_role(&mut self, principal: Pubkey, role: Role) -> Result<()> {
        self.require_admin()?;
        self.config.grant(principal, role)?;

        msg!("Granted {:?} to {}", role, principal);
        Ok(())
    }

    pub fn revoke_role(&mut self, principal: Pubkey, role: Role) -> Result<()> {
        self.require_admin()?;
        self.config.revoke(&principal, role);

        msg!("Revoked {:?} from {}", role, principal);
        Ok(())
    }
}

/// Every admin operation funnels through this check.
pub(crate) fn ensure_admin(config: &Config, principal: &Pubkey) -> Result<()> {
    require!(
        config.has_role(principal, Role::Admin),
        ConfigureError::Unauthorized
    );
    Ok(())
}

#[error_code]
pub enum ConfigureError {
    #[msg("Caller does not hold the Admin role")]
    Unauthorized,
    #[msg("Tax cannot exceed 30%")]
    FeeTooHigh,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_admin(admin: Pubkey) -> Config {
        let mut config = Config {
            admin,
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
        config.grant(admin, Role::Admin).unwrap();
        config
    }

    #[test]
    fn admin_grant_is_required_and_sufficient() {
        let admin = Pubkey::new_unique();
        let config = config_with_admin(admin);

        ensure_admin(&config, &admin).unwrap();

        let stranger = Pubkey::new_unique();
        let err = ensure_admin(&config, &stranger).unwrap_err();
        assert_eq!(err, error!(ConfigureError::Unauthorized));
    }

    #[test]
    fn other_roles_do_not_confer_admin() {
        let admin = Pubkey::new_unique();
        let mut config = config_with_admin(admin);
        let operator = Pubkey::new_unique();
        config.grant(operator, Role::Graduator).unwrap();
        config.grant(operator, Role::Creator).unwrap();

        let err = ensure_admin(&config, &operator).unwrap_err();
        assert_eq!(err, error!(ConfigureError::Unauthorized));
    }
}
