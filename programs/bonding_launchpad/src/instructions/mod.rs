//! Instruction handlers for the launchpad protocol
//!
//! Each instruction represents an action users can take:
//! - `initialize` - Set up the protocol (admin only, once)
//! - `configure` - Tax/treasury/role administration (admin only)
//! - `launch` - Create a token, its curve, and the founder seed fill
//! - `trade` - Buy/sell against a curve
//! - `graduate` - Migrate a crossed curve's liquidity to the venue

pub mod initialize;
pub mod configure;
pub mod launch;
pub mod trade;
pub mod graduate;

pub use initialize::*;
pub use configure::*;
pub use launch::*;
pub use trade::*;
pub use graduate::*;
