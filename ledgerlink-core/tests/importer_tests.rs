// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the contact importer.

use serde_json::{json, Value};

use ledgerlink_core::{
    ClientRepository, ContactImporter, DecodeError, ImportError, RecordImporter, RemoteRecord,
    Storage, REQUIRED_ATTRIBUTES,
};

fn make_contact_record(id: &str, version: i64, email: &str) -> RemoteRecord {
    RemoteRecord::new("contact")
        .with_attribute("customer_id", id)
        .with_attribute("firstname", "Alice")
        .with_attribute("lastname", "de Vries")
        .with_attribute("address1", "Keizersgracht 123")
        .with_attribute("zipcode", "1015 CJ")
        .with_attribute("city", "Amsterdam")
        .with_attribute("country", "NL")
        .with_attribute("email", email)
        .with_attribute("version", version)
}

fn make_record_with(missing_key: &str, value: Option<Value>) -> RemoteRecord {
    let mut record = make_contact_record("c100", 1, "alice@example.com");
    match value {
        Some(v) => record.set_attribute(missing_key, v),
        None => {
            // Rebuild without the key entirely
            let mut rebuilt = RemoteRecord::new("contact");
            for (key, v) in record.attributes() {
                if key.as_str() != missing_key {
                    rebuilt.set_attribute(key, v.clone());
                }
            }
            record = rebuilt;
        }
    }
    record
}

#[test]
fn test_candidate_accepts_complete_record() {
    let mut storage = Storage::in_memory().unwrap();
    let importer = ContactImporter::new(&mut storage);

    let record = make_contact_record("c100", 1, "alice@example.com");
    assert!(importer.is_candidate(&record));
}

#[test]
fn test_candidate_rejects_each_missing_required_field() {
    let mut storage = Storage::in_memory().unwrap();
    let importer = ContactImporter::new(&mut storage);

    for key in REQUIRED_ATTRIBUTES {
        let record = make_record_with(key, None);
        assert!(
            !importer.is_candidate(&record),
            "record without `{key}` must not be a candidate"
        );
    }
}

#[test]
fn test_candidate_rejects_blank_required_field() {
    let mut storage = Storage::in_memory().unwrap();
    let importer = ContactImporter::new(&mut storage);

    for key in REQUIRED_ATTRIBUTES {
        let record = make_record_with(key, Some(json!("")));
        assert!(
            !importer.is_candidate(&record),
            "record with blank `{key}` must not be a candidate"
        );
    }
}

#[test]
fn test_candidate_rejects_null_required_field() {
    let mut storage = Storage::in_memory().unwrap();
    let importer = ContactImporter::new(&mut storage);

    let record = make_record_with("email", Some(Value::Null));
    assert!(!importer.is_candidate(&record));
}

#[test]
fn test_candidate_rejects_non_contact_kind() {
    let mut storage = Storage::in_memory().unwrap();
    let importer = ContactImporter::new(&mut storage);

    let mut record = make_contact_record("c100", 1, "alice@example.com");
    let complete = record.attributes().clone();
    record = RemoteRecord::new("invoice");
    for (key, value) in &complete {
        record.set_attribute(key, value.clone());
    }
    assert!(!importer.is_candidate(&record));
}

#[test]
fn test_candidate_rejects_empty_attribute_map() {
    let mut storage = Storage::in_memory().unwrap();
    let importer = ContactImporter::new(&mut storage);

    assert!(!importer.is_candidate(&RemoteRecord::new("contact")));
}

#[test]
fn test_candidate_ignores_missing_customer_id() {
    // customer_id is needed for mapping but is not part of the candidate
    // check; the remote service always ships it.
    let mut storage = Storage::in_memory().unwrap();
    let importer = ContactImporter::new(&mut storage);

    let record = make_record_with("customer_id", None);
    assert!(importer.is_candidate(&record));
}

#[test]
fn test_import_creates_new_client() {
    let mut storage = Storage::in_memory().unwrap();
    let mut importer = ContactImporter::new(&mut storage);

    let record = make_contact_record("c100", 2, "alice@example.com");
    importer.import(&record).unwrap();

    let client = storage.find_by_id("c100").unwrap().unwrap();
    assert_eq!(client.id(), "c100");
    assert_eq!(client.email(), "alice@example.com");
    assert_eq!(client.first_name(), "Alice");
    assert_eq!(client.last_name(), "de Vries");
    assert_eq!(client.address(), "Keizersgracht 123");
    assert_eq!(client.zipcode(), "1015 CJ");
    assert_eq!(client.city(), "Amsterdam");
    assert_eq!(client.country(), "NL");
    assert_eq!(client.version(), 2);
}

#[test]
fn test_import_refreshes_client_on_version_change() {
    let mut storage = Storage::in_memory().unwrap();
    let mut importer = ContactImporter::new(&mut storage);

    importer
        .import(&make_contact_record("c100", 1, "a@old.com"))
        .unwrap();
    importer
        .import(&make_contact_record("c100", 2, "a@new.com"))
        .unwrap();

    let client = storage.find_by_id("c100").unwrap().unwrap();
    assert_eq!(client.email(), "a@new.com");
    assert_eq!(client.version(), 2);
}

#[test]
fn test_import_keeps_client_on_equal_version() {
    let mut storage = Storage::in_memory().unwrap();
    let mut importer = ContactImporter::new(&mut storage);

    importer
        .import(&make_contact_record("c100", 3, "a@old.com"))
        .unwrap();
    importer
        .import(&make_contact_record("c100", 3, "a@new.com"))
        .unwrap();

    let client = storage.find_by_id("c100").unwrap().unwrap();
    assert_eq!(client.email(), "a@old.com");
    assert_eq!(client.version(), 3);
}

#[test]
fn test_import_applies_any_version_change() {
    // The merge keys on inequality, not ordering: a remote rollback to a
    // lower marker still refreshes the stored fields.
    let mut storage = Storage::in_memory().unwrap();
    let mut importer = ContactImporter::new(&mut storage);

    importer
        .import(&make_contact_record("c100", 3, "a@old.com"))
        .unwrap();
    importer
        .import(&make_contact_record("c100", 1, "a@rolled-back.com"))
        .unwrap();

    let client = storage.find_by_id("c100").unwrap().unwrap();
    assert_eq!(client.email(), "a@rolled-back.com");
    assert_eq!(client.version(), 1);
}

#[test]
fn test_import_ignores_non_contact_record() {
    let mut storage = Storage::in_memory().unwrap();
    let mut importer = ContactImporter::new(&mut storage);

    let record = RemoteRecord::new("invoice")
        .with_attribute("customer_id", "c100")
        .with_attribute("version", 1);
    importer.import(&record).unwrap();

    assert!(storage.list_clients().unwrap().is_empty());
}

#[test]
fn test_import_fails_on_missing_attribute() {
    let mut storage = Storage::in_memory().unwrap();
    let mut importer = ContactImporter::new(&mut storage);

    let record = make_record_with("customer_id", None);
    let err = importer.import(&record).unwrap_err();
    assert!(matches!(
        err,
        ImportError::Decode(DecodeError::MissingAttribute("customer_id"))
    ));

    assert!(storage.list_clients().unwrap().is_empty());
}

#[test]
fn test_import_fails_on_missing_version() {
    let mut storage = Storage::in_memory().unwrap();
    let mut importer = ContactImporter::new(&mut storage);

    let record = make_record_with("version", None);
    let err = importer.import(&record).unwrap_err();
    assert!(matches!(
        err,
        ImportError::Decode(DecodeError::MissingAttribute("version"))
    ));
}

#[test]
fn test_import_same_record_twice_keeps_single_row() {
    let mut storage = Storage::in_memory().unwrap();
    let mut importer = ContactImporter::new(&mut storage);

    let record = make_contact_record("c100", 2, "alice@example.com");
    importer.import(&record).unwrap();
    importer.import(&record).unwrap();

    assert_eq!(storage.list_clients().unwrap().len(), 1);
}
