#![no_std]

pub mod access;
pub mod account;
pub mod asset;
pub mod errors;
pub mod events;
pub mod pool;
pub mod rewards;

use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, Address, Env, Symbol, U256,
};

pub use account::Account;
pub use errors::ContractError;
pub use pool::PoolState;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");

const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 2_073_600;

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of a staker's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub staked: i128,
    pub pending_rewards: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingVault;

#[contractimpl]
impl StakingVault {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the vault.
    ///
    /// * `owner`        – address allowed to tune the rate, pause and recover.
    /// * `stake_token`  – SAC address of the principal asset.
    /// * `reward_token` – SAC address of the reward asset; may equal
    ///   `stake_token`, in which case staked principal is excluded from the
    ///   reward reserve.
    ///
    /// The pool starts empty with a zero reward rate.
    pub fn initialize(
        env: Env,
        owner: Address,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        access::set_owner(&env, &owner);
        asset::set_tokens(&env, &stake_token, &reward_token);
        pool::save(&env, &PoolState::genesis(&env));
        env.storage().instance().set(&INITIALIZED, &true);
        Self::extend_instance_ttl(&env);

        events::publish_ownership_transferred(&env, None, owner.clone());
        events::publish_initialized(&env, owner, stake_token, reward_token);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the principal asset.
    ///
    /// The account is synced first so the new deposit does not earn
    /// retroactively.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        access::require_not_paused(&env)?;
        Self::validate_amount(amount)?;

        let (mut pool, mut acct) = Self::sync(&env, &staker)?;

        acct.deposit(amount)?;
        let new_total = pool.add_stake(amount)?;

        let stake_token = asset::stake_token(&env)?;
        asset::ensure_wallet_balance(&env, &stake_token, &staker, amount)?;

        Self::commit(&env, &staker, &pool, &acct);
        asset::pull(&env, &stake_token, &staker, amount);

        log!(&env, "staked", staker, amount, new_total);
        events::publish_staked(&env, staker, amount, new_total);

        Ok(())
    }

    /// Withdraw `amount` of principal and, in the same call, every reward
    /// owed to the staker. Returns the reward paid.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        access::require_not_paused(&env)?;
        Self::validate_amount(amount)?;

        let (mut pool, mut acct) = Self::sync(&env, &staker)?;
        let reserve = asset::reward_reserve(&env, pool.total_staked)?;

        acct.withdraw(amount)?;
        let new_total = pool.remove_stake(amount)?;
        let reward = acct.take_rewards();

        let stake_token = asset::stake_token(&env)?;
        asset::ensure_vault_balance(&env, &stake_token, amount)?;
        if reward > reserve {
            return Err(ContractError::InsufficientRewardReserve);
        }

        Self::commit(&env, &staker, &pool, &acct);
        asset::push(&env, &stake_token, &staker, amount);
        events::publish_withdrawn(&env, staker.clone(), amount, new_total);

        if reward > 0 {
            let reward_token = asset::reward_token(&env)?;
            asset::push(&env, &reward_token, &staker, reward);
            events::publish_reward_paid(&env, staker.clone(), reward);
        }

        log!(&env, "withdrawn", staker, amount, reward);

        Ok(reward)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything owed to `staker` without touching principal.
    ///
    /// Nothing owed is not an error: the sync is still recorded, no transfer
    /// is attempted and `0` is returned.
    pub fn claim_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let (pool, mut acct) = Self::sync(&env, &staker)?;
        let reward = acct.take_rewards();

        if reward > asset::reward_reserve(&env, pool.total_staked)? {
            return Err(ContractError::InsufficientRewardReserve);
        }

        Self::commit(&env, &staker, &pool, &acct);

        if reward > 0 {
            let reward_token = asset::reward_token(&env)?;
            asset::push(&env, &reward_token, &staker, reward);
            events::publish_reward_paid(&env, staker, reward);
        }

        Ok(reward)
    }

    // ── Emergency exit ──────────────────────────────────────────────────────

    /// Return the staker's entire principal while the vault is paused.
    ///
    /// Owed reward is forfeited, not paid. Returns the principal returned.
    pub fn emergency_withdraw(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        access::require_paused(&env)?;

        // Pool refresh only: the staker's reward is discarded, never summed.
        let mut pool = pool::load_refreshed(&env)?;
        let mut acct = account::load(&env, &staker);

        let forfeited = acct.forfeit(&env, &pool);
        let amount = acct.take_stake();
        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        let new_total = pool.remove_stake(amount)?;

        let stake_token = asset::stake_token(&env)?;
        asset::ensure_vault_balance(&env, &stake_token, amount)?;

        Self::commit(&env, &staker, &pool, &acct);
        asset::push(&env, &stake_token, &staker, amount);

        log!(&env, "emergency withdrawn", staker, amount, forfeited);
        events::publish_emergency_withdrawn(&env, staker, amount, forfeited, new_total);

        Ok(amount)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Return the staker's current principal balance.
    pub fn get_staked(env: Env, staker: Address) -> i128 {
        account::load(&env, &staker).staked
    }

    /// Reward the staker could claim right now, computed without mutating
    /// state. Equal to what a sync at this instant would record.
    pub fn earned(env: Env, staker: Address) -> Result<i128, ContractError> {
        let pool = pool::load(&env)?;
        let rpt = pool.reward_per_token(&env, env.ledger().timestamp())?;
        account::load(&env, &staker).earned(&env, &rpt)
    }

    /// Return the combined position for a staker from a single account read.
    pub fn get_staker_info(env: Env, staker: Address) -> Result<StakerInfo, ContractError> {
        let pool = pool::load(&env)?;
        let rpt = pool.reward_per_token(&env, env.ledger().timestamp())?;
        let acct = account::load(&env, &staker);

        Ok(StakerInfo {
            staked: acct.staked,
            pending_rewards: acct.earned(&env, &rpt)?,
        })
    }

    /// Return the current reward rate (reward units per second).
    pub fn get_reward_rate(env: Env) -> i128 {
        pool::load(&env).map(|p| p.reward_rate).unwrap_or(0)
    }

    /// Return the sum of all currently staked principal.
    pub fn get_total_staked(env: Env) -> i128 {
        pool::load(&env).map(|p| p.total_staked).unwrap_or(0)
    }

    /// Live accumulator value, scaled by `PRECISION`.
    pub fn get_reward_per_token(env: Env) -> Result<U256, ContractError> {
        pool::load(&env)?.reward_per_token(&env, env.ledger().timestamp())
    }

    pub fn get_last_update_time(env: Env) -> u64 {
        pool::load(&env).map(|p| p.last_update_time).unwrap_or(0)
    }

    /// Return the stored pool statistics as of the last refresh.
    pub fn get_pool_state(env: Env) -> Result<PoolState, ContractError> {
        pool::load(&env)
    }

    /// Reward-asset balance available for payouts.
    pub fn get_reward_reserve(env: Env) -> Result<i128, ContractError> {
        let pool = pool::load(&env)?;
        asset::reward_reserve(&env, pool.total_staked)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        asset::stake_token(&env)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        asset::reward_token(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        access::is_paused(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        access::owner(&env)
    }

    /// Get the pending owner address, if any.
    pub fn get_pending_owner(env: Env) -> Option<Address> {
        access::pending_owner(&env)
    }

    // ── Owner functions ──────────────────────────────────────────────────────

    /// Update the reward emission rate.
    ///
    /// The accumulator is flushed at the old rate before the change, so no
    /// staker gains or loses reward retroactively.
    pub fn set_reward_rate(env: Env, caller: Address, new_rate: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;

        if new_rate < 0 {
            return Err(ContractError::InvalidRewardRate);
        }

        let mut pool = pool::load_refreshed(&env)?;
        pool.reward_rate = new_rate;
        pool::save(&env, &pool);
        Self::extend_instance_ttl(&env);

        events::publish_reward_rate_updated(&env, new_rate);

        Ok(())
    }

    /// Send `amount` of a stray `token` held by the vault to the owner.
    ///
    /// The principal asset can never be recovered, whatever the amount.
    pub fn recover_token(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;

        if token == asset::stake_token(&env)? {
            return Err(ContractError::CannotRecoverPrincipalAsset);
        }
        Self::validate_amount(amount)?;
        asset::ensure_vault_balance(&env, &token, amount)?;

        Self::refresh_pool(&env)?;
        asset::push(&env, &token, &caller, amount);

        events::publish_recovered(&env, token, amount);

        Ok(())
    }

    /// Halt `stake` / `withdraw` and open the emergency exit.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::require_not_paused(&env)?;

        Self::refresh_pool(&env)?;
        access::set_paused(&env, true);

        events::publish_paused(&env, caller);

        Ok(())
    }

    /// Restore normal operation after `pause`.
    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::require_paused(&env)?;

        Self::refresh_pool(&env)?;
        access::set_paused(&env, false);

        events::publish_unpaused(&env, caller);

        Ok(())
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Propose a new owner. Only the current owner can call this; the
    /// proposed address must call `accept_ownership` to complete it.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        access::require_owner(&env, &current_owner)?;

        access::set_pending_owner(&env, &new_owner);

        events::publish_ownership_transfer_started(&env, current_owner, new_owner);

        Ok(())
    }

    /// Accept the pending transfer. Only the proposed owner can call this.
    pub fn accept_ownership(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let pending = access::pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        if new_owner != pending {
            return Err(ContractError::NotPendingOwner);
        }

        let previous = access::owner(&env)?;
        access::set_owner(&env, &new_owner);
        access::clear_pending_owner(&env);

        events::publish_ownership_transferred(&env, Some(previous), new_owner);

        Ok(())
    }

    /// Cancel a pending transfer. Only the current owner can call this.
    pub fn cancel_ownership_transfer(
        env: Env,
        current_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        access::require_owner(&env, &current_owner)?;

        let pending = access::pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        access::clear_pending_owner(&env);

        events::publish_ownership_transfer_cancelled(&env, current_owner, pending);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the vault is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn validate_amount(amount: i128) -> Result<(), ContractError> {
        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        if amount < 0 {
            return Err(ContractError::NegativeAmount);
        }
        Ok(())
    }

    /// Refresh the pool and reconcile `user` against it, in memory only.
    ///
    /// Nothing is written until `commit`, so an operation that fails its
    /// checks after syncing leaves storage untouched.
    fn sync(env: &Env, user: &Address) -> Result<(PoolState, Account), ContractError> {
        let pool = pool::load_refreshed(env)?;
        let mut acct = account::load(env, user);
        acct.sync(env, &pool)?;
        log!(env, "account synced", user.clone(), acct.rewards_owed);
        Ok((pool, acct))
    }

    fn commit(env: &Env, user: &Address, pool: &PoolState, acct: &Account) {
        pool::save(env, pool);
        account::save(env, user, acct);
        Self::extend_instance_ttl(env);
    }

    /// Pool-only flush for owner actions that carry no account.
    fn refresh_pool(env: &Env) -> Result<(), ContractError> {
        let pool = pool::load_refreshed(env)?;
        pool::save(env, &pool);
        Self::extend_instance_ttl(env);
        Ok(())
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
