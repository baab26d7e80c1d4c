//! Ledgerlink Core Library
//!
//! Imports contact records from the remote accounting API into the local
//! client base. Remote records are filtered for completeness, decoded into
//! typed values, and merged into existing clients by version marker.

pub mod client;
pub mod importer;
pub mod remote;
pub mod storage;

pub use client::Client;
pub use importer::{ContactImporter, ImportError, RecordImporter, REQUIRED_ATTRIBUTES};
pub use remote::{DecodeError, RemoteContact, RemoteRecord, CONTACT_KIND};
pub use storage::{ClientRepository, Storage, StorageError, SyncSession};
