// Transaction port for atomic operations

use crate::domain::QueueEntry;
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Queue operations within a transaction
///
/// The queue stays locked for the lifetime of the transaction, so reading
/// taken slots and appending a new entry form one atomic step. Dropping the
/// transaction without committing discards pending inserts.
pub trait QueueTransaction: Transaction {
    /// Entries visible inside the transaction (committed plus pending)
    fn entries(&self) -> Vec<QueueEntry>;

    /// Stage an entry for append on commit
    fn insert(&mut self, entry: QueueEntry);
}
