//! Client Entity
//!
//! The local counterpart of a remote contact, keyed by the remote
//! customer identifier.

use crate::remote::RemoteContact;

/// A client in the local base.
///
/// The version mirrors the remote version marker this client was last
/// merged from; an equal marker means the stored fields are current.
/// Clients are created and refreshed by the importer, never deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Client {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    address: String,
    zipcode: String,
    city: String,
    country: String,
    version: i64,
}

impl Client {
    /// Maps a decoded remote contact onto a fresh client.
    pub fn from_remote(remote: &RemoteContact) -> Self {
        Client {
            id: remote.customer_id().to_string(),
            email: remote.email().to_string(),
            first_name: remote.first_name().to_string(),
            last_name: remote.last_name().to_string(),
            address: remote.address().to_string(),
            zipcode: remote.zipcode().to_string(),
            city: remote.city().to_string(),
            country: remote.country().to_string(),
            version: remote.version(),
        }
    }

    /// Reconstructs a client from stored column values.
    ///
    /// Used when loading rows from storage.
    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        id: String,
        email: String,
        first_name: String,
        last_name: String,
        address: String,
        zipcode: String,
        city: String,
        country: String,
        version: i64,
    ) -> Self {
        Client {
            id,
            email,
            first_name,
            last_name,
            address,
            zipcode,
            city,
            country,
            version,
        }
    }

    /// Returns the client's identifier (the remote customer id).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the address line.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the postal code.
    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }

    /// Returns the city.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the country.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the version marker of the last merged remote state.
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Merges remote values into this client.
    ///
    /// When the version markers differ, every mutable field is overwritten
    /// with the remote value and the remote version is adopted. An equal
    /// marker leaves the client untouched.
    pub fn merge_from(&mut self, remote: &Client) {
        if self.version == remote.version {
            return;
        }

        self.email = remote.email.clone();
        self.first_name = remote.first_name.clone();
        self.last_name = remote.last_name.clone();
        self.address = remote.address.clone();
        self.zipcode = remote.zipcode.clone();
        self.city = remote.city.clone();
        self.country = remote.country.clone();
        self.version = remote.version;
    }
}
