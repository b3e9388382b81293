use soroban_sdk::contracterror;

/// Failure conditions surfaced by the vault.
///
/// Every variant is a distinct, non-retryable validation failure so a client
/// can map it to a precise message. Discriminants are part of the contract
/// ABI and must never be renumbered.
///
/// # Code ranges
/// | Range   | Purpose                         |
/// |---------|---------------------------------|
/// | 1 – 2   | Lifecycle / initialisation      |
/// | 3       | Authorisation                   |
/// | 4 – 7   | Input validation                |
/// | 8 – 9   | Pause state                     |
/// | 10      | Time source                     |
/// | 11 – 13 | Asset ledger availability       |
/// | 14 – 17 | Arithmetic / configuration      |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Owner-gated call made by any other address.
    NotOwner = 3,
    /// Amount, or the balance to withdraw, is zero.
    ZeroAmount = 4,
    NegativeAmount = 5,
    /// Withdrawal larger than the caller's staked principal.
    InsufficientBalance = 6,
    /// Recovery may never target the principal asset.
    CannotRecoverPrincipalAsset = 7,
    /// Operation requires the vault to be active.
    PausedOperationNotAllowed = 8,
    /// Operation requires the vault to be paused.
    NotPausedOperationNotAllowed = 9,
    /// Ledger time is earlier than the last accumulator refresh.
    ClockRegression = 10,
    /// The staker does not hold enough of the principal asset to deposit.
    InsufficientWalletBalance = 11,
    /// The vault does not hold enough of the asset being pushed out.
    InsufficientVaultBalance = 12,
    /// A reward payout would dip into funds that back staked principal.
    InsufficientRewardReserve = 13,
    ArithmeticOverflow = 14,
    InvalidRewardRate = 15,
    NoPendingOwner = 16,
    NotPendingOwner = 17,
}
