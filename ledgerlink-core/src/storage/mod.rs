// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! Local SQLite store for imported clients. Uses versioned schema
//! migrations and explicit write sessions.

mod clients;
mod error;
pub mod migration;
mod session;

pub use clients::ClientRepository;
pub use error::StorageError;
pub use session::SyncSession;

use std::path::Path;

use rusqlite::Connection;

/// SQLite-based storage implementation.
///
/// Reads go through the [`ClientRepository`] methods on this handle;
/// writes go through a [`SyncSession`] obtained from [`Storage::session`].
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens or creates a storage database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Storage { conn };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Creates an in-memory storage (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Runs all pending schema migrations.
    fn run_migrations(&self) -> Result<(), StorageError> {
        let migrations = migration::all_migrations();
        migration::MigrationRunner::run(&self.conn, &migrations)
    }

    /// Returns the current schema version.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        migration::MigrationRunner::current_version(&self.conn)
    }

    /// Opens a write session scoped to one transaction.
    ///
    /// Staged changes become visible only after [`SyncSession::commit`];
    /// dropping the session rolls them back.
    pub fn session(&mut self) -> Result<SyncSession<'_>, StorageError> {
        SyncSession::new(&mut self.conn)
    }
}
