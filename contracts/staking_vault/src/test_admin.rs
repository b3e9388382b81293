extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::{ContractError, StakingVault, StakingVaultClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (
    Env,
    StakingVaultClient<'static>,
    Address, // owner
    Address, // stake_token
    Address, // reward_token
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingVault, ());
    let client = StakingVaultClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &stake_token, &reward_token);
    client.set_reward_rate(&owner, &100);

    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &1_000_000_000i128);

    (env, client, owner, stake_token, reward_token)
}

fn staker_with(env: &Env, stake_token: &Address, amount: i128) -> Address {
    let staker = Address::generate(env);
    StellarAssetClient::new(env, stake_token).mint(&staker, &amount);
    staker
}

// ── Reward rate ───────────────────────────────────────────────────────────────

#[test]
fn test_set_reward_rate_by_non_owner_fails() {
    let (env, client, _owner, _, _) = setup();

    let intruder = Address::generate(&env);
    match client.try_set_reward_rate(&intruder, &999) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotOwner),
        _ => unreachable!("Expected NotOwner error"),
    }
    assert_eq!(client.get_reward_rate(), 100);
}

#[test]
fn test_negative_reward_rate_fails() {
    let (_env, client, owner, _, _) = setup();

    match client.try_set_reward_rate(&owner, &-1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidRewardRate),
        _ => unreachable!("Expected InvalidRewardRate error"),
    }
}

#[test]
fn test_set_reward_rate_allowed_while_paused() {
    let (_env, client, owner, _, _) = setup();

    client.pause(&owner);
    client.set_reward_rate(&owner, &42);
    assert_eq!(client.get_reward_rate(), 42);
}

// ── Pause gating ──────────────────────────────────────────────────────────────

#[test]
fn test_pause_blocks_stake_and_withdraw() {
    let (env, client, owner, stake_token, _) = setup();
    let staker = staker_with(&env, &stake_token, 200);
    client.stake(&staker, &100);

    client.pause(&owner);
    assert!(client.is_paused());

    match client.try_stake(&staker, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PausedOperationNotAllowed),
        _ => unreachable!("Expected PausedOperationNotAllowed error"),
    }
    match client.try_withdraw(&staker, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PausedOperationNotAllowed),
        _ => unreachable!("Expected PausedOperationNotAllowed error"),
    }
}

#[test]
fn test_emergency_withdraw_requires_pause() {
    let (env, client, _owner, stake_token, _) = setup();
    let staker = staker_with(&env, &stake_token, 100);
    client.stake(&staker, &100);

    match client.try_emergency_withdraw(&staker) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotPausedOperationNotAllowed),
        _ => unreachable!("Expected NotPausedOperationNotAllowed error"),
    }
}

#[test]
fn test_emergency_withdraw_with_zero_balance_fails() {
    let (env, client, owner, _, _) = setup();
    client.pause(&owner);

    let nobody = Address::generate(&env);
    match client.try_emergency_withdraw(&nobody) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ZeroAmount),
        _ => unreachable!("Expected ZeroAmount error"),
    }
}

#[test]
fn test_emergency_withdraw_forfeits_reward() {
    let (env, client, owner, stake_token, reward_token) = setup();
    let staker = staker_with(&env, &stake_token, 100);

    client.stake(&staker, &100);
    env.ledger().set_timestamp(100);
    client.pause(&owner);

    let reward_before = TokenClient::new(&env, &reward_token).balance(&staker);
    assert_eq!(client.emergency_withdraw(&staker), 100);

    assert_eq!(TokenClient::new(&env, &reward_token).balance(&staker), reward_before);
    assert_eq!(TokenClient::new(&env, &stake_token).balance(&staker), 100);
    assert_eq!(client.get_staked(&staker), 0);
    assert_eq!(client.get_total_staked(), 0);

    // Claiming afterwards finds nothing left to pay.
    assert_eq!(client.earned(&staker), 0);
    assert_eq!(client.claim_reward(&staker), 0);
}

#[test]
fn test_emergency_withdraw_survives_reward_overflow() {
    let (env, client, owner, stake_token, _) = setup();
    let staker = staker_with(&env, &stake_token, 1);

    client.set_reward_rate(&owner, &(i128::MAX / 50));
    client.stake(&staker, &1);
    env.ledger().set_timestamp(100);

    // Owed reward no longer fits in an i128, so every paying path fails.
    match client.try_earned(&staker) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ArithmeticOverflow),
        _ => unreachable!("Expected ArithmeticOverflow error"),
    }
    match client.try_withdraw(&staker, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ArithmeticOverflow),
        _ => unreachable!("Expected ArithmeticOverflow error"),
    }

    client.pause(&owner);
    assert_eq!(client.emergency_withdraw(&staker), 1);

    assert_eq!(client.get_staked(&staker), 0);
    assert_eq!(client.get_total_staked(), 0);
    assert_eq!(TokenClient::new(&env, &stake_token).balance(&staker), 1);
    assert_eq!(client.earned(&staker), 0);
}

#[test]
fn test_emergency_withdraw_leaves_other_stakers_accruing() {
    let (env, client, owner, stake_token, _) = setup();
    let alice = staker_with(&env, &stake_token, 100);
    let bob = staker_with(&env, &stake_token, 100);

    client.stake(&alice, &100);
    client.stake(&bob, &100);

    env.ledger().set_timestamp(10);
    client.pause(&owner);
    client.emergency_withdraw(&alice);
    client.unpause(&owner);

    // Bob had half of 1_000, then the whole 100/s for another 10s.
    env.ledger().set_timestamp(20);
    assert_eq!(client.earned(&bob), 1_500);
}

#[test]
fn test_claim_allowed_while_paused() {
    let (env, client, owner, stake_token, reward_token) = setup();
    let staker = staker_with(&env, &stake_token, 100);

    client.stake(&staker, &100);
    env.ledger().set_timestamp(5);
    client.pause(&owner);

    assert_eq!(client.claim_reward(&staker), 500);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&staker), 500);
}

#[test]
fn test_unpause_restores_staking_and_withdrawal() {
    let (env, client, owner, stake_token, reward_token) = setup();
    let staker = staker_with(&env, &stake_token, 100);

    client.pause(&owner);
    assert!(client.try_stake(&staker, &100).is_err());

    client.unpause(&owner);
    assert!(!client.is_paused());
    client.stake(&staker, &100);
    assert_eq!(client.get_staked(&staker), 100);

    env.ledger().set_timestamp(10);
    assert_eq!(client.withdraw(&staker, &100), 1_000);
    assert_eq!(client.get_staked(&staker), 0);
    assert_eq!(TokenClient::new(&env, &stake_token).balance(&staker), 100);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&staker), 1_000);
}

#[test]
fn test_pause_twice_and_unpause_when_active_fail() {
    let (_env, client, owner, _, _) = setup();

    match client.try_unpause(&owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotPausedOperationNotAllowed),
        _ => unreachable!("Expected NotPausedOperationNotAllowed error"),
    }

    client.pause(&owner);
    match client.try_pause(&owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PausedOperationNotAllowed),
        _ => unreachable!("Expected PausedOperationNotAllowed error"),
    }
}

#[test]
fn test_pause_by_non_owner_fails() {
    let (env, client, _owner, _, _) = setup();

    let intruder = Address::generate(&env);
    match client.try_pause(&intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotOwner),
        _ => unreachable!("Expected NotOwner error"),
    }
    assert!(!client.is_paused());
}

// ── Token recovery ────────────────────────────────────────────────────────────

#[test]
fn test_recover_principal_asset_always_fails() {
    let (env, client, owner, stake_token, _) = setup();
    let staker = staker_with(&env, &stake_token, 1_000);
    client.stake(&staker, &1_000);

    for amount in [1i128, 100, 1_000, 0] {
        match client.try_recover_token(&owner, &stake_token, &amount) {
            Err(Ok(e)) => assert_eq!(e, ContractError::CannotRecoverPrincipalAsset),
            _ => unreachable!("Expected CannotRecoverPrincipalAsset error"),
        }
    }
    assert_eq!(
        TokenClient::new(&env, &stake_token).balance(&client.address),
        1_000
    );
}

#[test]
fn test_recover_stray_token() {
    let (env, client, owner, _, _) = setup();

    let stray = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    StellarAssetClient::new(&env, &stray).mint(&client.address, &1_000);

    client.recover_token(&owner, &stray, &1_000);

    assert_eq!(TokenClient::new(&env, &stray).balance(&owner), 1_000);
    assert_eq!(TokenClient::new(&env, &stray).balance(&client.address), 0);
}

#[test]
fn test_recover_more_than_held_fails() {
    let (env, client, owner, _, _) = setup();

    let stray = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    StellarAssetClient::new(&env, &stray).mint(&client.address, &10);

    match client.try_recover_token(&owner, &stray, &11) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientVaultBalance),
        _ => unreachable!("Expected InsufficientVaultBalance error"),
    }
}

#[test]
fn test_recover_by_non_owner_fails() {
    let (env, client, _owner, _, reward_token) = setup();

    let intruder = Address::generate(&env);
    match client.try_recover_token(&intruder, &reward_token, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotOwner),
        _ => unreachable!("Expected NotOwner error"),
    }
}

// ── Ownership transfer (two-step) ─────────────────────────────────────────────

#[test]
fn test_ownership_transfer_flow() {
    let (env, client, owner, _, _) = setup();
    let successor = Address::generate(&env);

    client.propose_owner(&owner, &successor);
    assert_eq!(client.get_pending_owner(), Some(successor.clone()));
    // Nothing changes until the proposed owner accepts.
    assert_eq!(client.get_owner(), owner);

    client.accept_ownership(&successor);
    assert_eq!(client.get_owner(), successor);
    assert_eq!(client.get_pending_owner(), None);

    // The old owner lost its powers; the new one has them.
    match client.try_set_reward_rate(&owner, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotOwner),
        _ => unreachable!("Expected NotOwner error"),
    }
    client.set_reward_rate(&successor, &1);
    assert_eq!(client.get_reward_rate(), 1);
}

#[test]
fn test_accept_by_wrong_address_fails() {
    let (env, client, owner, _, _) = setup();
    let successor = Address::generate(&env);
    let impostor = Address::generate(&env);

    match client.try_accept_ownership(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingOwner),
        _ => unreachable!("Expected NoPendingOwner error"),
    }

    client.propose_owner(&owner, &successor);
    match client.try_accept_ownership(&impostor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotPendingOwner),
        _ => unreachable!("Expected NotPendingOwner error"),
    }
}

#[test]
fn test_cancel_ownership_transfer() {
    let (env, client, owner, _, _) = setup();
    let successor = Address::generate(&env);

    match client.try_cancel_ownership_transfer(&owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingOwner),
        _ => unreachable!("Expected NoPendingOwner error"),
    }

    client.propose_owner(&owner, &successor);
    client.cancel_ownership_transfer(&owner);
    assert_eq!(client.get_pending_owner(), None);

    match client.try_accept_ownership(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingOwner),
        _ => unreachable!("Expected NoPendingOwner error"),
    }
}

#[test]
fn test_propose_by_non_owner_fails() {
    let (env, client, _owner, _, _) = setup();
    let intruder = Address::generate(&env);

    match client.try_propose_owner(&intruder, &intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotOwner),
        _ => unreachable!("Expected NotOwner error"),
    }
}
