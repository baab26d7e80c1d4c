// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client row storage operations.

use rusqlite::params;

use super::{Storage, StorageError};
use crate::client::Client;

/// Internal struct for database row data.
pub(super) struct ClientRow {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
    pub version: i64,
}

/// Lookup interface over the local client base.
///
/// The importer only ever reads through this seam; writes go through a
/// [`SyncSession`](super::SyncSession). There is no delete operation:
/// clients outlive the remote records they came from.
pub trait ClientRepository {
    /// Loads a client by identifier. Returns `None` when no client exists.
    fn find_by_id(&self, id: &str) -> Result<Option<Client>, StorageError>;

    /// Lists all clients ordered by name.
    fn list_clients(&self) -> Result<Vec<Client>, StorageError>;
}

impl ClientRepository for Storage {
    fn find_by_id(&self, id: &str) -> Result<Option<Client>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, email, first_name, last_name, address, zipcode, city, country, version
             FROM clients WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![id], |row| {
            Ok(ClientRow {
                id: row.get(0)?,
                email: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
                address: row.get(4)?,
                zipcode: row.get(5)?,
                city: row.get(6)?,
                country: row.get(7)?,
                version: row.get(8)?,
            })
        });

        match result {
            Ok(row) => Ok(Some(row_to_client(row))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    fn list_clients(&self) -> Result<Vec<Client>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, email, first_name, last_name, address, zipcode, city, country, version
             FROM clients ORDER BY last_name, first_name",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ClientRow {
                id: row.get(0)?,
                email: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
                address: row.get(4)?,
                zipcode: row.get(5)?,
                city: row.get(6)?,
                country: row.get(7)?,
                version: row.get(8)?,
            })
        })?;

        let mut clients = Vec::new();
        for row_result in rows {
            clients.push(row_to_client(row_result?));
        }

        Ok(clients)
    }
}

/// Converts a database row to a Client.
fn row_to_client(row: ClientRow) -> Client {
    Client::from_stored(
        row.id,
        row.email,
        row.first_name,
        row.last_name,
        row.address,
        row.zipcode,
        row.city,
        row.country,
        row.version,
    )
}
