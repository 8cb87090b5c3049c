//! Tests for strongly-typed identifiers

use core_kernel::{ClientId, DependentId};
use uuid::Uuid;

#[test]
fn test_client_id_new_is_unique() {
    let a = ClientId::new();
    let b = ClientId::new();
    assert_ne!(a, b);
}

#[test]
fn test_client_id_display_prefix() {
    let id = ClientId::new();
    assert!(id.to_string().starts_with("CLI-"));
    assert_eq!(ClientId::prefix(), "CLI");
}

#[test]
fn test_dependent_id_display_prefix() {
    let id = DependentId::new();
    assert!(id.to_string().starts_with("DEP-"));
}

#[test]
fn test_round_trip_parse() {
    let id = ClientId::new();
    let parsed: ClientId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn test_parse_without_prefix() {
    let uuid = Uuid::new_v4();
    let parsed: ClientId = uuid.to_string().parse().unwrap();
    assert_eq!(parsed.as_uuid(), &uuid);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("not-a-uuid".parse::<ClientId>().is_err());
}

#[test]
fn test_serde_transparent() {
    let id = DependentId::new();
    let json = serde_json::to_string(&id).unwrap();
    // Serialized as a bare UUID string, no prefix
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));
}
