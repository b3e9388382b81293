use soroban_sdk::{Env, U256};

use crate::errors::ContractError;

/// Fixed-point scaling factor.
///
/// The reward-per-token accumulator is stored multiplied by this constant so
/// fractional reward per unit of stake survives integer division. 10^18
/// matches 18-decimal assets; the 256-bit intermediates keep
/// `rate × elapsed × PRECISION` clear of overflow for any `i128` rate.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

pub fn precision(env: &Env) -> U256 {
    U256::from_u128(env, PRECISION)
}

// ── Core reward engine ──────────────────────────────────────────────────────

/// Advance the global `reward_per_token_stored` value by `elapsed` seconds.
///
/// ```text
/// Δrpt = reward_rate × elapsed × PRECISION / total_staked
/// new_rpt = stored_rpt + Δrpt
/// ```
///
/// An empty pool returns `stored` unchanged: reward emitted while nobody is
/// staked is forfeited rather than banked for the next depositor. Division
/// truncates toward zero.
pub fn compute_reward_per_token(
    env: &Env,
    stored: &U256,
    reward_rate: i128,
    elapsed: u64,
    total_staked: i128,
) -> U256 {
    if total_staked <= 0 || reward_rate <= 0 || elapsed == 0 {
        return stored.clone();
    }

    let delta = U256::from_u128(env, reward_rate.unsigned_abs())
        .mul(&U256::from_u128(env, u128::from(elapsed)))
        .mul(&precision(env))
        .div(&U256::from_u128(env, total_staked.unsigned_abs()));

    stored.add(&delta)
}

/// Total reward owed to one account once its snapshot catches up.
///
/// ```text
/// earned = owed + staked × (current_rpt − rpt_paid) / PRECISION
/// ```
///
/// Only the accumulation since the account's last snapshot is counted, so
/// nothing is ever credited twice.
pub fn earned(
    env: &Env,
    staked: i128,
    current_rpt: &U256,
    rpt_paid: &U256,
    owed: i128,
) -> Result<i128, ContractError> {
    if staked <= 0 || current_rpt <= rpt_paid {
        return Ok(owed);
    }

    let delta = U256::from_u128(env, staked.unsigned_abs())
        .mul(&current_rpt.sub(rpt_paid))
        .div(&precision(env));
    let delta = delta
        .to_u128()
        .and_then(|d| i128::try_from(d).ok())
        .ok_or(ContractError::ArithmeticOverflow)?;

    owed.checked_add(delta).ok_or(ContractError::ArithmeticOverflow)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure arithmetic; the Env is only needed to host the U256 values.
