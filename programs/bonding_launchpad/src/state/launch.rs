//! Launch Record
//!
//! Immutable metadata for a launched token. Only the `graduated` flag
//! and the venue id ever change after creation, and each exactly once.

use anchor_lang::prelude::*;

/// Per-token launch record
///
/// Seeds: ["launch", asset_mint]
#[account]
#[derive(InitSpace)]
pub struct LaunchRecord {
    /// Mint of the launched asset
    pub asset_mint: Pubkey,

    /// Curve pricing this asset
    pub curve: Pubkey,

    /// Launch creator
    pub creator: Pubkey,

    #[max_len(32)]
    pub name: String,

    #[max_len(10)]
    pub symbol: String,

    /// Off-chain media reference
    #[max_len(200)]
    pub uri: String,

    #[max_len(256)]
    pub description: String,

    /// Unix timestamp of the launch
    pub created_at: i64,

    /// Flipped exactly once, when the venue migration completes
    pub graduated: bool,

    /// Venue custody the liquidity migrated to (set at graduation)
    pub venue: Pubkey,

    /// PDA bump seed
    pub bump: u8,
}

impl LaunchRecord {
    pub const SEED: &'static [u8] = b"launch";

    pub const MAX_NAME_LEN: usize = 32;
    pub const MAX_SYMBOL_LEN: usize = 10;
    pub const MAX_URI_LEN: usize = 200;
    pub const MAX_DESCRIPTION_LEN: usize = 256;
}
