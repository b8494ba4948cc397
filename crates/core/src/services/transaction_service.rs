use crate::ids::IdGenerator;
use crate::models::transaction::{Transaction, TransactionInput};

/// Transaction CRUD.
///
/// No business-rule validation happens here: wallet existence, a non-empty
/// category and a non-zero value are checked by the caller.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Update the transaction named by `input.id` in place, or create a new
    /// one at the front. Returns the id of the affected transaction.
    ///
    /// Blank descriptions are stored as `None`.
    pub fn upsert(
        &self,
        transactions: &mut Vec<Transaction>,
        input: TransactionInput,
        ids: &dyn IdGenerator,
    ) -> String {
        let description = clean_description(input.description);

        if let Some(id) = input.id.as_deref() {
            if let Some(existing) = transactions.iter_mut().find(|tx| tx.id == id) {
                existing.wallet_id = input.wallet_id;
                existing.category = input.category;
                existing.value = input.value;
                existing.description = description;
                existing.timestamp = input.timestamp;
                return existing.id.clone();
            }
        }

        let tx = Transaction {
            id: ids.next_id(),
            wallet_id: input.wallet_id,
            category: input.category,
            value: input.value,
            description,
            timestamp: input.timestamp,
        };
        let id = tx.id.clone();
        transactions.insert(0, tx);
        id
    }

    /// Remove a transaction. Returns `false` if it doesn't exist.
    pub fn delete(&self, transactions: &mut Vec<Transaction>, transaction_id: &str) -> bool {
        let before = transactions.len();
        transactions.retain(|tx| tx.id != transaction_id);
        transactions.len() != before
    }

    /// Relabel every transaction in category `from` as `to`.
    /// Returns the number of transactions changed.
    pub fn reassign_category(
        &self,
        transactions: &mut [Transaction],
        from: &str,
        to: &str,
    ) -> usize {
        let mut changed = 0;
        for tx in transactions.iter_mut().filter(|tx| tx.category == from) {
            tx.category = to.to_string();
            changed += 1;
        }
        changed
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim a description; blank becomes `None`.
pub fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
