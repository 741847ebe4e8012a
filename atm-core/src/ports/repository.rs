//! Repository port - ledger storage abstraction

use crate::domain::result::Result;
use crate::domain::AccountStore;

/// Durable storage for the whole account store
///
/// The store is the unit of durability: it is read once at startup and
/// written back in full at shutdown. Implementations must not leave a
/// partially written ledger behind.
pub trait LedgerRepository {
    /// Load every account. A missing ledger yields an empty store.
    fn load(&self) -> Result<AccountStore>;

    /// Overwrite the ledger with every account in `store`
    fn save(&self, store: &AccountStore) -> Result<()>;
}
