use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const PAUSED: Symbol = symbol_short!("PAUSED");

// ── Ownership ───────────────────────────────────────────────────────────────

pub fn owner(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Guard: revert if `caller` is not the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if *caller != owner(env)? {
        return Err(ContractError::NotOwner);
    }
    Ok(())
}

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, proposed: &Address) {
    env.storage().instance().set(&PENDING_OWNER, proposed);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}

// ── Pause flag ──────────────────────────────────────────────────────────────
// Absent key reads as Active.

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::PausedOperationNotAllowed);
    }
    Ok(())
}

pub fn require_paused(env: &Env) -> Result<(), ContractError> {
    if !is_paused(env) {
        return Err(ContractError::NotPausedOperationNotAllowed);
    }
    Ok(())
}
