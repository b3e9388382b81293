use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, U256};

use crate::errors::ContractError;
use crate::pool::PoolState;
use crate::rewards;

const ACCOUNT: Symbol = symbol_short!("ACCT");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// Per-participant ledger entry. Created lazily, never removed: a drained
/// account keeps its snapshot so a later restake starts from the right place.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub staked: i128,
    /// Accumulator value already accounted for in `rewards_owed`.
    pub reward_per_token_paid: U256,
    /// Reward computed and due but not yet transferred out.
    pub rewards_owed: i128,
}

impl Account {
    pub fn empty(env: &Env) -> Self {
        Self {
            staked: 0,
            reward_per_token_paid: U256::from_u32(env, 0),
            rewards_owed: 0,
        }
    }

    /// `rewards_owed` as it would stand after syncing against `current_rpt`.
    pub fn earned(&self, env: &Env, current_rpt: &U256) -> Result<i128, ContractError> {
        rewards::earned(
            env,
            self.staked,
            current_rpt,
            &self.reward_per_token_paid,
            self.rewards_owed,
        )
    }

    /// Credit everything accrued since the last snapshot and move the
    /// snapshot up to the pool. The pool must already be refreshed.
    pub fn sync(&mut self, env: &Env, pool: &PoolState) -> Result<(), ContractError> {
        self.rewards_owed = self.earned(env, &pool.reward_per_token_stored)?;
        self.reward_per_token_paid = pool.reward_per_token_stored.clone();
        Ok(())
    }

    /// Drop everything owed and move the snapshot up to the pool without
    /// running the reward sum, so it cannot fail. Returns the dropped reward,
    /// saturated at `i128::MAX` when it is too large to represent.
    pub fn forfeit(&mut self, env: &Env, pool: &PoolState) -> i128 {
        let dropped = self
            .earned(env, &pool.reward_per_token_stored)
            .unwrap_or(i128::MAX);
        self.reward_per_token_paid = pool.reward_per_token_stored.clone();
        self.rewards_owed = 0;
        dropped
    }

    pub fn deposit(&mut self, amount: i128) -> Result<(), ContractError> {
        self.staked = self
            .staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: i128) -> Result<(), ContractError> {
        if amount > self.staked {
            return Err(ContractError::InsufficientBalance);
        }
        self.staked -= amount;
        Ok(())
    }

    /// Zero the owed balance, returning what it held.
    pub fn take_rewards(&mut self) -> i128 {
        core::mem::take(&mut self.rewards_owed)
    }

    /// Zero the staked balance, returning what it held.
    pub fn take_stake(&mut self) -> i128 {
        core::mem::take(&mut self.staked)
    }
}

// ── Storage ─────────────────────────────────────────────────────────────────

fn account_key(user: &Address) -> (Symbol, Address) {
    (ACCOUNT, user.clone())
}

pub fn load(env: &Env, user: &Address) -> Account {
    env.storage()
        .persistent()
        .get(&account_key(user))
        .unwrap_or_else(|| Account::empty(env))
}

pub fn save(env: &Env, user: &Address, account: &Account) {
    let key = account_key(user);
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
