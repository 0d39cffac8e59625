pub mod snapshot;
pub mod store;

pub use snapshot::{
    merge_backup, merge_transactions, Backup, ImportMode, Snapshot, SNAPSHOT_VERSION,
};
pub use store::{FileStore, SnapshotStore, StorageError};
