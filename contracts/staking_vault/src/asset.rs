//! Boundary to the token contracts that actually hold balances.
//!
//! Every movement is pre-checked against the relevant balance so a shortfall
//! surfaces as a named [`ContractError`] before any ledger state is written,
//! instead of as a trap inside the token contract.

use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::errors::ContractError;

const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");

pub fn stake_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&STAKE_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn reward_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&REWARD_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_tokens(env: &Env, stake_token: &Address, reward_token: &Address) {
    env.storage().instance().set(&STAKE_TOKEN, stake_token);
    env.storage().instance().set(&REWARD_TOKEN, reward_token);
}

pub fn vault_balance(env: &Env, token_id: &Address) -> i128 {
    token::Client::new(env, token_id).balance(&env.current_contract_address())
}

/// Reward-asset balance not backing anyone's principal.
///
/// When one token serves as both principal and reward, the staked total is
/// carved out so reward payouts can never spend deposits.
pub fn reward_reserve(env: &Env, total_staked: i128) -> Result<i128, ContractError> {
    let reward_token = reward_token(env)?;
    let balance = vault_balance(env, &reward_token);
    if reward_token == stake_token(env)? {
        return Ok(balance.saturating_sub(total_staked).max(0));
    }
    Ok(balance)
}

pub fn ensure_wallet_balance(
    env: &Env,
    token_id: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if token::Client::new(env, token_id).balance(from) < amount {
        return Err(ContractError::InsufficientWalletBalance);
    }
    Ok(())
}

pub fn ensure_vault_balance(
    env: &Env,
    token_id: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if vault_balance(env, token_id) < amount {
        return Err(ContractError::InsufficientVaultBalance);
    }
    Ok(())
}

/// Move `amount` of `token_id` from `from` into the vault. Requires `from`'s
/// authorization on the current invocation.
pub fn pull(env: &Env, token_id: &Address, from: &Address, amount: i128) {
    token::Client::new(env, token_id).transfer(from, &env.current_contract_address(), &amount);
}

/// Move `amount` of `token_id` from the vault to `to`.
pub fn push(env: &Env, token_id: &Address, to: &Address, amount: i128) {
    token::Client::new(env, token_id).transfer(&env.current_contract_address(), to, &amount);
}
