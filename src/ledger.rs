//! Minimal per-account balance bookkeeping.
//!
//! The conversion core consumes balances through this narrow interface only;
//! real ownership accounting (allowances, transfers between third parties)
//! lives with the surrounding ledger.

use std::collections::HashMap;

use num_bigint::BigUint;
use thiserror::Error;

use crate::models::{AccountId, AssetId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {account} holds {held} of {asset}, needs {needed}")]
    InsufficientBalance { account: AccountId, asset: AssetId, held: BigUint, needed: BigUint },
}

/// Asset balances per account.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balances: HashMap<AccountId, HashMap<AssetId, BigUint>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &AccountId, asset: &AssetId) -> BigUint {
        self.balances
            .get(account)
            .and_then(|held| held.get(asset))
            .cloned()
            .unwrap_or(BigUint::ZERO)
    }

    pub fn credit(&mut self, account: &AccountId, asset: &AssetId, amount: &BigUint) {
        let entry = self
            .balances
            .entry(*account)
            .or_default()
            .entry(*asset)
            .or_insert(BigUint::ZERO);
        *entry += amount;
    }

    pub fn debit(
        &mut self,
        account: &AccountId,
        asset: &AssetId,
        amount: &BigUint,
    ) -> Result<(), LedgerError> {
        let entry = self
            .balances
            .get_mut(account)
            .and_then(|held| held.get_mut(asset));
        match entry {
            Some(held) if &*held >= amount => {
                *held -= amount;
                Ok(())
            }
            None if *amount == BigUint::ZERO => Ok(()),
            Some(held) => Err(LedgerError::InsufficientBalance {
                account: *account,
                asset: *asset,
                held: held.clone(),
                needed: amount.clone(),
            }),
            None => Err(LedgerError::InsufficientBalance {
                account: *account,
                asset: *asset,
                held: BigUint::ZERO,
                needed: amount.clone(),
            }),
        }
    }
}
