use soroban_sdk::{contracttype, log, symbol_short, Env, Symbol, U256};

use crate::errors::ContractError;
use crate::rewards;

const POOL: Symbol = symbol_short!("POOL");

/// Process-wide accrual statistics.
///
/// `total_staked` always equals the sum of every account's `staked` once an
/// operation completes, and `last_update_time` never moves backwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub total_staked: i128,
    /// Reward units emitted per second across all stakers.
    pub reward_rate: i128,
    /// Cumulative reward per unit of stake, scaled by [`rewards::PRECISION`].
    pub reward_per_token_stored: U256,
    pub last_update_time: u64,
}

impl PoolState {
    pub fn genesis(env: &Env) -> Self {
        Self {
            total_staked: 0,
            reward_rate: 0,
            reward_per_token_stored: U256::from_u32(env, 0),
            last_update_time: env.ledger().timestamp(),
        }
    }

    /// Accumulator value as of `now`, without advancing the stored state.
    pub fn reward_per_token(&self, env: &Env, now: u64) -> Result<U256, ContractError> {
        let elapsed = self.elapsed(now)?;
        Ok(rewards::compute_reward_per_token(
            env,
            &self.reward_per_token_stored,
            self.reward_rate,
            elapsed,
            self.total_staked,
        ))
    }

    /// Fold the time since the last refresh into the accumulator.
    ///
    /// Must run before anything that reads the accumulator or changes
    /// `total_staked` / `reward_rate`.
    pub fn refresh(&mut self, env: &Env, now: u64) -> Result<(), ContractError> {
        self.reward_per_token_stored = self.reward_per_token(env, now)?;
        self.last_update_time = now;
        Ok(())
    }

    pub fn add_stake(&mut self, amount: i128) -> Result<i128, ContractError> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(self.total_staked)
    }

    pub fn remove_stake(&mut self, amount: i128) -> Result<i128, ContractError> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .filter(|total| *total >= 0)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(self.total_staked)
    }

    fn elapsed(&self, now: u64) -> Result<u64, ContractError> {
        now.checked_sub(self.last_update_time)
            .ok_or(ContractError::ClockRegression)
    }
}

// ── Storage ─────────────────────────────────────────────────────────────────

pub fn load(env: &Env) -> Result<PoolState, ContractError> {
    env.storage()
        .instance()
        .get(&POOL)
        .ok_or(ContractError::NotInitialized)
}

pub fn save(env: &Env, pool: &PoolState) {
    env.storage().instance().set(&POOL, pool);
}

/// Load the pool and bring its accumulator up to the current ledger time.
pub fn load_refreshed(env: &Env) -> Result<PoolState, ContractError> {
    let mut pool = load(env)?;
    pool.refresh(env, env.ledger().timestamp())?;
    log!(
        env,
        "pool refreshed",
        pool.reward_per_token_stored,
        pool.total_staked
    );
    Ok(pool)
}
