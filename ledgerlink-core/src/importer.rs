//! Contact Import
//!
//! Decides which remote records become local clients and performs the
//! create-or-refresh write against storage.

use log::{debug, info};
use thiserror::Error;

use crate::client::Client;
use crate::remote::{DecodeError, RemoteContact, RemoteRecord};
use crate::storage::{ClientRepository, Storage, StorageError};

/// Attribute keys that must be present and non-empty before a contact
/// record qualifies for import.
pub const REQUIRED_ATTRIBUTES: [&str; 7] = [
    "firstname",
    "lastname",
    "address1",
    "zipcode",
    "city",
    "country",
    "email",
];

/// Import error types.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Importer for one kind of remote record.
///
/// A caller walking a page of mixed remote records probes each importer
/// with [`is_candidate`](RecordImporter::is_candidate) and hands matching
/// records to [`import`](RecordImporter::import).
pub trait RecordImporter {
    /// Returns true if the record qualifies for import. No side effects.
    fn is_candidate(&self, record: &RemoteRecord) -> bool;

    /// Imports the record into the local base.
    fn import(&mut self, record: &RemoteRecord) -> Result<(), ImportError>;
}

/// Imports remote contact records into the local client base.
///
/// Mapping, lookup, and the version-gated merge happen here; each write
/// goes through its own session and commits per record.
pub struct ContactImporter<'a> {
    storage: &'a mut Storage,
}

impl<'a> ContactImporter<'a> {
    /// Creates an importer writing to the given storage.
    pub fn new(storage: &'a mut Storage) -> Self {
        ContactImporter { storage }
    }
}

impl RecordImporter for ContactImporter<'_> {
    fn is_candidate(&self, record: &RemoteRecord) -> bool {
        record.is_contact()
            && !record.attributes().is_empty()
            && REQUIRED_ATTRIBUTES
                .iter()
                .all(|key| record.has_attribute(key))
    }

    fn import(&mut self, record: &RemoteRecord) -> Result<(), ImportError> {
        if !record.is_contact() {
            debug!("skipping record of kind `{}`", record.kind());
            return Ok(());
        }

        let remote = Client::from_remote(&RemoteContact::from_record(record)?);

        // A fresh client already carries the remote version, so the merge
        // below is a no-op for first-time imports.
        let mut client = match self.storage.find_by_id(remote.id())? {
            Some(existing) => existing,
            None => remote.clone(),
        };
        client.merge_from(&remote);

        let session = self.storage.session()?;
        session.stage(&client)?;
        session.commit()?;

        info!(
            "imported client {} at version {}",
            client.id(),
            client.version()
        );
        Ok(())
    }
}
