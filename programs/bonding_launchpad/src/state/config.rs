//! Global Protocol Configuration
//!
//! Singleton account holding the role table, tax/treasury settings and
//! the default curve parameters applied to newly launched tokens.

use anchor_lang::prelude::*;

/// Decimals used for every launched asset mint.
pub const ASSET_DECIMALS: u8 = 6;

/// Upper bound for buy/sell taxes (30%).
pub const MAX_TAX_BPS: u16 = 3_000;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Protocol administrator set at initialization
    pub admin: Pubkey,

    /// Treasury receiving trade taxes
    pub treasury: Pubkey,

    /// Custody account that receives migrated liquidity at graduation
    pub venue_authority: Pubkey,

    /// Collateral token mint (e.g., USDC)
    pub collateral_mint: Pubkey,

    /// Buy tax in basis points, snapshotted onto curves at creation
    pub buy_tax_bps: u16,

    /// Sell tax in basis points, snapshotted onto curves at creation
    pub sell_tax_bps: u16,

    /// Cumulative-sale threshold (asset base units) that triggers graduation
    pub graduation_threshold: u64,

    /// Virtual collateral seeded into every new curve
    pub initial_virtual_collateral: u64,

    /// Virtual asset reserve seeded into every new curve
    pub initial_virtual_asset: u64,

    /// Fixed total supply minted to curve custody at launch
    pub asset_total_supply: u64,

    /// Remaining-supply carve-out handed to the venue at graduation
    pub lp_asset_supply: u64,

    /// Minimum founder seed purchase at launch
    pub min_seed: u64,

    /// Total tokens launched (used as incrementing mint seed)
    pub launch_count: u64,

    /// Access-control table: one grant per (principal, role) pair
    #[max_len(32)]
    pub roles: Vec<RoleGrant>,

    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const SEED: &'static [u8] = b"config";

    /// Whether `principal` currently holds `role`.
    pub fn has_role(&self, principal: &Pubkey, role: Role) -> bool {
        self.roles
            .iter()
            .any(|g| g.principal == *principal && g.role == role)
    }

    /// Grant `role` to `principal`. Idempotent; fails only when the
    /// table is full.
    pub fn grant(&mut self, principal: Pubkey, role: Role) -> Result<()> {
        if self.has_role(&principal, role) {
            return Ok(());
        }
        require!(
            self.roles.len() < Self::MAX_ROLE_GRANTS,
            RoleError::RoleTableFull
        );
        self.roles.push(RoleGrant { principal, role });
        Ok(())
    }

    /// Remove a grant. Revoking an absent grant is a no-op; other
    /// grants are never disturbed.
    pub fn revoke(&mut self, principal: &Pubkey, role: Role) {
        self.roles
            .retain(|g| !(g.principal == *principal && g.role == role));
    }

    const MAX_ROLE_GRANTS: usize = 32;
}

/// A single access-control grant.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub struct RoleGrant {
    pub principal: Pubkey,
    pub role: Role,
}

/// Protocol roles.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum Role {
    /// May launch new tokens
    Creator,
    /// Identity allowed to move curve reserves (the embedded router)
    Executor,
    /// May change taxes, treasury and role grants
    Admin,
    /// May finalize a pending graduation
    Graduator,
}

#[error_code]
pub enum RoleError {
    #[msg("Role table is full")]
    RoleTableFull,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_config() -> Config {
        Config {
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
        }
    }

    #[test]
    fn grant_and_check() {
        let mut config = empty_config();
        let alice = Pubkey::new_unique();

        assert!(!config.has_role(&alice, Role::Creator));
        config.grant(alice, Role::Creator).unwrap();
        assert!(config.has_role(&alice, Role::Creator));
        // A grant covers exactly one role
        assert!(!config.has_role(&alice, Role::Admin));
    }

    #[test]
    fn grant_is_idempotent() {
        let mut config = empty_config();
        let alice = Pubkey::new_unique();

        config.grant(alice, Role::Graduator).unwrap();
        config.grant(alice, Role::Graduator).unwrap();
        assert_eq!(config.roles.len(), 1);
    }

    #[test]
    fn revoke_leaves_other_grants() {
        let mut config = empty_config();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        config.grant(alice, Role::Creator).unwrap();
        config.grant(alice, Role::Admin).unwrap();
        config.grant(bob, Role::Creator).unwrap();

        config.revoke(&alice, Role::Creator);

        assert!(!config.has_role(&alice, Role::Creator));
        assert!(config.has_role(&alice, Role::Admin));
        assert!(config.has_role(&bob, Role::Creator));
    }

    #[test]
    fn revoke_absent_grant_is_noop() {
        let mut config = empty_config();
        let alice = Pubkey::new_unique();
        config.grant(alice, Role::Creator).unwrap();

        config.revoke(&alice, Role::Executor);
        assert_eq!(config.roles.len(), 1);
    }

    #[test]
    fn table_capacity_is_enforced() {
        let mut config = empty_config();
        for _ in 0..32 {
            config.grant(Pubkey::new_unique(), Role::Creator).unwrap();
        }
        let err = config.grant(Pubkey::new_unique(), Role::Creator).unwrap_err();
        assert_eq!(err, error!(RoleError::RoleTableFull));
    }
}
