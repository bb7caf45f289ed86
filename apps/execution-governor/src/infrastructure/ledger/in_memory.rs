//! In-memory transfer ledger.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{Settlement, TransferError, TransferPort};
use crate::domain::shared::{Amount, ExecutionId, Identity};

#[derive(Debug, Default)]
struct Book {
    escrow: Amount,
    balances: HashMap<Identity, Amount>,
    refusing: HashSet<Identity>,
    applied: HashMap<ExecutionId, Settlement>,
}

/// In-memory implementation of `TransferPort`.
///
/// Payments are credited to a governor escrow; outgoing transfers leave it
/// and credit the destination balance. Each settlement applies as a whole
/// or not at all.
#[derive(Debug, Default)]
pub struct InMemoryTransferLedger {
    book: RwLock<Book>,
}

impl InMemoryTransferLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit the escrow directly.
    pub fn seed_escrow(&self, amount: Amount) -> Result<(), TransferError> {
        let mut book = self.book.write().unwrap_or_else(PoisonError::into_inner);
        book.escrow = book
            .escrow
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        Ok(())
    }

    /// Value currently held in escrow.
    #[must_use]
    pub fn escrow_balance(&self) -> Amount {
        self.book
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .escrow
    }

    /// Value credited to `identity`.
    #[must_use]
    pub fn balance_of(&self, identity: &Identity) -> Amount {
        self.book
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .balances
            .get(identity)
            .copied()
            .unwrap_or_default()
    }

    /// Settlements applied but neither confirmed nor reverted yet.
    #[must_use]
    pub fn pending_settlements(&self) -> usize {
        self.book
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .applied
            .len()
    }

    /// Make every transfer to `identity` fail.
    pub fn refuse_transfers_to(&self, identity: Identity) {
        self.book
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .refusing
            .insert(identity);
    }

    /// Accept transfers to `identity` again.
    pub fn accept_transfers_to(&self, identity: &Identity) {
        self.book
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .refusing
            .remove(identity);
    }
}

impl Book {
    fn settle(&mut self, settlement: &Settlement) -> Result<(), TransferError> {
        if let Some(refused) = settlement
            .transfers
            .iter()
            .find(|t| self.refusing.contains(&t.to))
        {
            return Err(TransferError::Refused {
                to: refused.to.clone(),
            });
        }

        let outgoing = settlement
            .outgoing_total()
            .ok_or(TransferError::Overflow)?;
        let available = self
            .escrow
            .checked_add(settlement.payment)
            .ok_or(TransferError::Overflow)?;
        let escrow = available
            .checked_sub(outgoing)
            .ok_or(TransferError::InsufficientEscrow {
                required: outgoing,
                available,
            })?;

        let mut credited: HashMap<Identity, Amount> = HashMap::new();
        for transfer in &settlement.transfers {
            let current = credited
                .get(&transfer.to)
                .or_else(|| self.balances.get(&transfer.to))
                .copied()
                .unwrap_or_default();
            let next = current
                .checked_add(transfer.amount)
                .ok_or(TransferError::Overflow)?;
            credited.insert(transfer.to.clone(), next);
        }

        self.escrow = escrow;
        self.balances.extend(credited);
        self.applied
            .insert(settlement.execution_id.clone(), settlement.clone());
        Ok(())
    }

    fn confirm(&mut self, settlement: &Settlement) -> Result<(), TransferError> {
        self.applied
            .remove(&settlement.execution_id)
            .map(|_| ())
            .ok_or_else(|| TransferError::UnknownSettlement {
                execution_id: settlement.execution_id.clone(),
            })
    }

    fn revert(&mut self, settlement: &Settlement) -> Result<(), TransferError> {
        let Some(applied) = self.applied.get(&settlement.execution_id) else {
            return Err(TransferError::UnknownSettlement {
                execution_id: settlement.execution_id.clone(),
            });
        };

        let mut debited: HashMap<Identity, Amount> = HashMap::new();
        for transfer in &applied.transfers {
            let current = debited
                .get(&transfer.to)
                .or_else(|| self.balances.get(&transfer.to))
                .copied()
                .unwrap_or_default();
            let next = current
                .checked_sub(transfer.amount)
                .ok_or(TransferError::InsufficientEscrow {
                    required: transfer.amount,
                    available: current,
                })?;
            debited.insert(transfer.to.clone(), next);
        }

        let outgoing = applied.outgoing_total().ok_or(TransferError::Overflow)?;
        let escrow = self
            .escrow
            .checked_add(outgoing)
            .and_then(|e| e.checked_sub(applied.payment))
            .ok_or(TransferError::Overflow)?;

        self.escrow = escrow;
        self.balances.extend(debited);
        self.applied.remove(&settlement.execution_id);
        Ok(())
    }
}

#[async_trait]
impl TransferPort for InMemoryTransferLedger {
    async fn settle(&self, settlement: &Settlement) -> Result<(), TransferError> {
        let result = self
            .book
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .settle(settlement);

        match &result {
            Ok(()) => tracing::debug!(
                execution_id = %settlement.execution_id,
                transfers = settlement.transfers.len(),
                "Settlement applied"
            ),
            Err(e) => tracing::warn!(
                execution_id = %settlement.execution_id,
                error = %e,
                "Settlement refused"
            ),
        }
        result
    }

    async fn revert(&self, settlement: &Settlement) -> Result<(), TransferError> {
        self.book
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .revert(settlement)?;
        tracing::debug!(execution_id = %settlement.execution_id, "Settlement reverted");
        Ok(())
    }

    async fn confirm(&self, settlement: &Settlement) -> Result<(), TransferError> {
        self.book
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .confirm(settlement)?;
        tracing::debug!(execution_id = %settlement.execution_id, "Settlement confirmed");
        Ok(())
    }
}
