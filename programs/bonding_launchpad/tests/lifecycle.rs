//! Curve lifecycle scenarios driven through the library surface:
//! pricing quotes feeding the state-machine mutations, the same path
//! the instruction handlers take.

use anchor_lang::prelude::*;
use bonding_launchpad::curve::{buy_quote, sell_quote, Quote};
use bonding_launchpad::state::{BondingCurve, CurveError, CurvePhase};

const BUY_TAX_BPS: u16 = 100;
const SELL_TAX_BPS: u16 = 100;

fn new_curve(threshold: u64) -> BondingCurve {
    BondingCurve {
        asset_mint: Pubkey::new_unique(),
        creator: Pubkey::new_unique(),
        virtual_collateral_reserve: 30_000_000_000,
        virtual_asset_reserve: 1_073_000_000_000_000,
        real_collateral_reserve: 0,
        cumulative_asset_sold: 0,
        buy_tax_bps: BUY_TAX_BPS,
        sell_tax_bps: SELL_TAX_BPS,
        graduation_threshold: threshold,
        phase: CurvePhase::Trading,
        created_at: 0,
        bump: 255,
    }
}

/// Quote and apply a buy the way the trade handler does.
fn buy(curve: &mut BondingCurve, collateral_in: u64) -> Result<Quote> {
    let quote = buy_quote(
        curve.virtual_collateral_reserve,
        curve.virtual_asset_reserve,
        collateral_in,
        curve.buy_tax_bps,
    )?;
    curve.apply_buy(collateral_in, quote.gross_out)?;
    Ok(quote)
}

fn sell(curve: &mut BondingCurve, asset_in: u64) -> Result<Quote> {
    let quote = sell_quote(
        curve.virtual_collateral_reserve,
        curve.virtual_asset_reserve,
        asset_in,
        curve.sell_tax_bps,
    )?;
    curve.apply_sell(asset_in, quote.gross_out)?;
    Ok(quote)
}

#[test]
fn founder_seed_fill_matches_closed_form() {
    let mut curve = new_curve(u64::MAX);
    let (vc, va) = (
        curve.virtual_collateral_reserve,
        curve.virtual_asset_reserve,
    );
    let collateral_in = 2_000_000_000u64;

    let quote = buy(&mut curve, collateral_in).unwrap();

    // gross = Va - (Vc * Va) / (Vc + C)
    let expected_gross =
        va - ((vc as u128 * va as u128) / (vc as u128 + collateral_in as u128)) as u64;
    assert_eq!(quote.gross_out, expected_gross);
    assert_eq!(
        quote.net_out,
        ((expected_gross as u128 * 9_900) / 10_000) as u64
    );

    // Reserves absorbed the gross swap
    assert_eq!(curve.virtual_collateral_reserve, vc + collateral_in);
    assert_eq!(curve.virtual_asset_reserve, va - expected_gross);
    assert_eq!(curve.real_collateral_reserve, collateral_in);
    assert_eq!(curve.cumulative_asset_sold, expected_gross);
}

#[test]
fn round_trip_keeps_real_reserve_solvent() {
    let mut curve = new_curve(u64::MAX);

    let bought = buy(&mut curve, 5_000_000_000).unwrap();
    // Seller can at most return their net holdings
    let sold = sell(&mut curve, bought.net_out).unwrap();

    // The curve paid out less collateral than it took in, and the
    // remainder is still sitting in the real reserve
    assert!(sold.gross_out < 5_000_000_000);
    assert_eq!(curve.real_collateral_reserve, 5_000_000_000 - sold.gross_out);
}

#[test]
fn cumulative_sales_are_monotone_under_mixed_trading() {
    let mut curve = new_curve(u64::MAX);
    let mut last = 0u64;
    let mut held = 0u64;

    for round in 0..20 {
        if round % 3 == 2 && held > 100 {
            let part = held / 4;
            sell(&mut curve, part).unwrap();
            held -= part;
        } else {
            let q = buy(&mut curve, 1_000_000_000).unwrap();
            held += q.net_out;
        }
        assert!(curve.cumulative_asset_sold >= last);
        last = curve.cumulative_asset_sold;
    }
}

#[test]
fn crossing_trade_executes_then_curve_halts() {
    // Threshold low enough that the second buy crosses it
    let mut curve = new_curve(50_000_000_000_000);

    let first = buy(&mut curve, 1_000_000_000).unwrap();
    assert!(!curve.crossed_threshold());

    let second = buy(&mut curve, 1_000_000_000).unwrap();
    assert!(second.net_out > 0, "crossing trade still fills");
    assert!(curve.crossed_threshold());

    // The trade handler fires the latch after the crossing trade
    curve.begin_graduation().unwrap();
    assert_eq!(curve.phase, CurvePhase::Graduating);

    // Any subsequent trade is refused with no state change
    let frozen = curve.cumulative_asset_sold;
    let err = buy(&mut curve, 1_000_000_000).unwrap_err();
    assert_eq!(err, error!(CurveError::CurveNotTrading));
    let err = sell(&mut curve, first.net_out).unwrap_err();
    assert_eq!(err, error!(CurveError::CurveNotTrading));
    assert_eq!(curve.cumulative_asset_sold, frozen);
}

#[test]
fn graduation_is_one_shot_even_under_retries() {
    let mut curve = new_curve(1);
    buy(&mut curve, 1_000_000_000).unwrap();
    curve.begin_graduation().unwrap();

    // A failed venue call leaves the curve Graduating; retrying the
    // latch must not re-arm it
    assert_eq!(
        curve.begin_graduation().unwrap_err(),
        error!(CurveError::InvalidTransition)
    );

    curve.finalize_graduation().unwrap();
    assert_eq!(curve.phase, CurvePhase::Graduated);

    // Terminal: no second finalize, no reopening
    assert_eq!(
        curve.finalize_graduation().unwrap_err(),
        error!(CurveError::InvalidTransition)
    );
    assert_eq!(
        curve.begin_graduation().unwrap_err(),
        error!(CurveError::InvalidTransition)
    );
}

#[test]
fn slippage_regression_price_impact_before_victim_sell() {
    // Reference scenario: two traders buy in, the attacker sells a
    // sliver first to move the price, then the victim sells with a
    // minimum set to 99% of their earlier pre-fee quote. The executed
    // net lands below that minimum, so a net-checked router must
    // reject; only a gross-checked router would report success while
    // under-delivering.
    let mut curve = new_curve(u64::MAX);

    let attacker = buy(&mut curve, 10_000_000_000).unwrap();
    let victim = buy(&mut curve, 10_000_000_000).unwrap();

    // Victim quotes before the attack and sets min_out at 99% of the
    // pre-fee output
    let honest = sell_quote(
        curve.virtual_collateral_reserve,
        curve.virtual_asset_reserve,
        victim.net_out,
        curve.sell_tax_bps,
    )
    .unwrap();
    let min_out = ((honest.gross_out as u128 * 9_900) / 10_000) as u64;

    // Attacker front-runs with a small sell
    sell(&mut curve, attacker.net_out / 1_000).unwrap();

    // The victim's executed quote now nets below their minimum
    let executed = sell_quote(
        curve.virtual_collateral_reserve,
        curve.virtual_asset_reserve,
        victim.net_out,
        curve.sell_tax_bps,
    )
    .unwrap();
    assert!(executed.net_out < min_out);
    // A gross-side check would have let it through
    assert!(executed.gross_out >= min_out);
}
