// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote Record Decoding
//!
//! Wire-shaped records from the accounting API and the decoder that turns
//! a contact record's attribute map into a typed [`RemoteContact`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Kind tag the API puts on contact records.
pub const CONTACT_KIND: &str = "contact";

/// Decode errors for remote records.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Missing attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("Invalid attribute {key}: expected {expected}")]
    InvalidAttribute {
        key: &'static str,
        expected: &'static str,
    },
}

/// A raw record fetched from the accounting API.
///
/// Records arrive as JSON with a kind tag and a free-form attribute map.
/// Only contact-kinded records are of interest here; other kinds pass
/// through the importer untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Record kind tag, `"contact"` for contact records.
    #[serde(rename = "type")]
    kind: String,
    /// Attribute map as shipped by the API.
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl RemoteRecord {
    /// Creates a record with the given kind and no attributes.
    pub fn new(kind: &str) -> Self {
        RemoteRecord {
            kind: kind.to_string(),
            attributes: Map::new(),
        }
    }

    /// Sets an attribute, replacing any existing value under the key.
    pub fn set_attribute(&mut self, key: &str, value: Value) {
        self.attributes.insert(key.to_string(), value);
    }

    /// Builder-style variant of [`set_attribute`] for record assembly.
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Returns the record's kind tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns true if this is a contact-kinded record.
    pub fn is_contact(&self) -> bool {
        self.kind == CONTACT_KIND
    }

    /// Returns the full attribute map.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns one attribute value, if set.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns true if the attribute under `key` is present and non-empty.
    ///
    /// Null values and blank strings count as absent.
    pub fn has_attribute(&self, key: &str) -> bool {
        match self.attributes.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }
}

/// A contact record decoded into its typed shape.
///
/// The version is a monotonic change counter maintained by the remote
/// service; it only ever moves when the remote record's fields change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteContact {
    customer_id: String,
    email: String,
    first_name: String,
    last_name: String,
    address: String,
    zipcode: String,
    city: String,
    country: String,
    version: i64,
}

impl RemoteContact {
    /// Decodes a contact record's attribute map into a typed value.
    ///
    /// Fails with [`DecodeError::MissingAttribute`] on the first absent
    /// key. Presence is not validated up front here; callers probe
    /// `ContactImporter::is_candidate` before importing.
    pub fn from_record(record: &RemoteRecord) -> Result<Self, DecodeError> {
        let attributes = record.attributes();

        Ok(RemoteContact {
            customer_id: require_string(attributes, "customer_id")?,
            email: require_string(attributes, "email")?,
            first_name: require_string(attributes, "firstname")?,
            last_name: require_string(attributes, "lastname")?,
            address: require_string(attributes, "address1")?,
            zipcode: require_string(attributes, "zipcode")?,
            city: require_string(attributes, "city")?,
            country: require_string(attributes, "country")?,
            version: require_version(attributes, "version")?,
        })
    }

    /// Returns the remote customer identifier.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
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

    /// Returns the remote version marker.
    pub fn version(&self) -> i64 {
        self.version
    }
}

fn require_string(
    attributes: &Map<String, Value>,
    key: &'static str,
) -> Result<String, DecodeError> {
    match attributes.get(key) {
        None | Some(Value::Null) => Err(DecodeError::MissingAttribute(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        // customer_id comes back numeric on some endpoints
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(DecodeError::InvalidAttribute {
            key,
            expected: "string",
        }),
    }
}

fn require_version(
    attributes: &Map<String, Value>,
    key: &'static str,
) -> Result<i64, DecodeError> {
    match attributes.get(key) {
        None | Some(Value::Null) => Err(DecodeError::MissingAttribute(key)),
        Some(Value::Number(n)) => n.as_i64().ok_or(DecodeError::InvalidAttribute {
            key,
            expected: "integer",
        }),
        Some(Value::String(s)) => {
            s.trim()
                .parse::<i64>()
                .map_err(|_| DecodeError::InvalidAttribute {
                    key,
                    expected: "integer",
                })
        }
        Some(_) => Err(DecodeError::InvalidAttribute {
            key,
            expected: "integer",
        }),
    }
}
