// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Write sessions over the client base.

use rusqlite::{params, Connection, Transaction};

use super::StorageError;
use crate::client::Client;

/// A unit of work over the client base.
///
/// Wraps one SQLite transaction: stage any number of writes, then commit
/// them atomically. A session dropped without commit rolls back.
pub struct SyncSession<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SyncSession<'conn> {
    pub(super) fn new(conn: &'conn mut Connection) -> Result<Self, StorageError> {
        let tx = conn.transaction()?;
        Ok(SyncSession { tx })
    }

    /// Stages a client write, inserting or replacing by identifier.
    pub fn stage(&self, client: &Client) -> Result<(), StorageError> {
        self.tx.execute(
            "INSERT OR REPLACE INTO clients
             (id, email, first_name, last_name, address, zipcode, city, country, version)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                client.id(),
                client.email(),
                client.first_name(),
                client.last_name(),
                client.address(),
                client.zipcode(),
                client.city(),
                client.country(),
                client.version(),
            ],
        )?;

        Ok(())
    }

    /// Commits all staged writes.
    pub fn commit(self) -> Result<(), StorageError> {
        self.tx.commit()?;
        Ok(())
    }
}
