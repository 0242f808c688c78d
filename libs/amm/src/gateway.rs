//! Token transfer collaborator
//!
//! The engine never moves balances itself. It describes the transfers an
//! operation needs and hands them to a [`TokenGateway`] as one batch, after
//! every check has passed and before any pool record is written.

use pairswap_types::{AccountId, TokenId, TransferError};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{error, warn};

/// One balance movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub token: TokenId,
    pub amount: u128,
    pub sender: AccountId,
    pub recipient: AccountId,
}

impl Transfer {
    pub fn new(token: &TokenId, amount: u128, sender: &AccountId, recipient: &AccountId) -> Self {
        Self {
            token: token.clone(),
            amount,
            sender: sender.clone(),
            recipient: recipient.clone(),
        }
    }

    /// The same movement in the opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            token: self.token.clone(),
            amount: self.amount,
            sender: self.recipient.clone(),
            recipient: self.sender.clone(),
        }
    }
}

/// Moves token balances between accounts
pub trait TokenGateway {
    /// Move `amount` of `token` from `sender` to `recipient`
    fn transfer(
        &mut self,
        token: &TokenId,
        amount: u128,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), TransferError>;

    /// Apply a batch all-or-nothing
    ///
    /// The default executes legs in order and, on the first failure, reverses
    /// the legs already applied (last first) before reporting the failure.
    fn settle(&mut self, transfers: &[Transfer]) -> Result<(), TransferError> {
        for (applied, leg) in transfers.iter().enumerate() {
            if let Err(err) = self.transfer(&leg.token, leg.amount, &leg.sender, &leg.recipient) {
                warn!(%err, applied, "transfer failed, reversing settled legs");
                for done in transfers[..applied].iter().rev() {
                    let undo = done.reversed();
                    if let Err(undo_err) =
                        self.transfer(&undo.token, undo.amount, &undo.sender, &undo.recipient)
                    {
                        error!(%undo_err, token = %undo.token, amount = undo.amount, "compensating transfer failed");
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

/// In-process token balances for every (token, account)
///
/// Refuses zero-amount transfers, self transfers, overdrafts and any transfer
/// of a paused token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryTokenLedger {
    balances: BTreeMap<(TokenId, AccountId), u128>,
    paused: BTreeSet<TokenId>,
}

impl InMemoryTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `token` to `account` out of thin air
    pub fn mint(
        &mut self,
        token: &TokenId,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), TransferError> {
        if amount == 0 {
            return Ok(());
        }
        let key = (token.clone(), account.clone());
        let balance = self
            .balances
            .get(&key)
            .copied()
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected(format!("{} balance overflow", token)))?;
        self.balances.insert(key, balance);
        Ok(())
    }

    pub fn balance_of(&self, token: &TokenId, account: &AccountId) -> u128 {
        self.balances
            .get(&(token.clone(), account.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Make every transfer of `token` fail until [`InMemoryTokenLedger::resume`]
    pub fn pause(&mut self, token: &TokenId) {
        self.paused.insert(token.clone());
    }

    pub fn resume(&mut self, token: &TokenId) {
        self.paused.remove(token);
    }

    fn apply_leg(
        balances: &mut BTreeMap<(TokenId, AccountId), u128>,
        paused: &BTreeSet<TokenId>,
        leg: &Transfer,
    ) -> Result<(), TransferError> {
        if paused.contains(&leg.token) {
            return Err(TransferError::Rejected(format!("{} is paused", leg.token)));
        }
        if leg.amount == 0 {
            return Err(TransferError::ZeroAmount {
                token: leg.token.clone(),
            });
        }
        if leg.sender == leg.recipient {
            return Err(TransferError::SelfTransfer {
                token: leg.token.clone(),
                account: leg.sender.clone(),
            });
        }

        let sender_key = (leg.token.clone(), leg.sender.clone());
        let available = balances.get(&sender_key).copied().unwrap_or(0);
        if available < leg.amount {
            return Err(TransferError::InsufficientFunds {
                token: leg.token.clone(),
                account: leg.sender.clone(),
                requested: leg.amount,
                available,
            });
        }

        let recipient_key = (leg.token.clone(), leg.recipient.clone());
        let received = balances
            .get(&recipient_key)
            .copied()
            .unwrap_or(0)
            .checked_add(leg.amount)
            .ok_or_else(|| TransferError::Rejected("recipient balance overflow".to_string()))?;

        // zero balances are dropped so equal holdings compare equal
        match available - leg.amount {
            0 => balances.remove(&sender_key),
            left => balances.insert(sender_key, left),
        };
        balances.insert(recipient_key, received);
        Ok(())
    }
}

impl TokenGateway for InMemoryTokenLedger {
    fn transfer(
        &mut self,
        token: &TokenId,
        amount: u128,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), TransferError> {
        let leg = Transfer::new(token, amount, sender, recipient);
        Self::apply_leg(&mut self.balances, &self.paused, &leg)
    }

    /// Validates the whole batch on a scratch copy, then swaps it in
    fn settle(&mut self, transfers: &[Transfer]) -> Result<(), TransferError> {
        let mut scratch = self.balances.clone();
        for leg in transfers {
            Self::apply_leg(&mut scratch, &self.paused, leg)?;
        }
        self.balances = scratch;
        Ok(())
    }
}
