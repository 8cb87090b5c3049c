//! Integration tests for the client entity and its lifecycle

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClientId, DependentId};
use domain_clients::{
    Client, ClientAttributes, ClientError, ClientStatus, Dependent, MAX_DEPENDENTS,
};

fn attributes() -> ClientAttributes {
    ClientAttributes {
        id: ClientId::new(),
        name: "Ana Paz".to_string(),
        email: "ana@example.com".to_string(),
        rut: "12345678-9".to_string(),
        phone: "912345678".to_string(),
        age: 30,
        region: "Metropolitana".to_string(),
        commune: "Maipú".to_string(),
        income: dec!(500000),
        dependents: 0,
        health_insurance: "Fonasa".to_string(),
        created_at: None,
        status: None,
        dependent_list: Vec::new(),
    }
}

#[test]
fn test_full_lifecycle() {
    let mut client = Client::new(attributes()).unwrap();
    assert_eq!(client.status(), ClientStatus::Pending);

    let child = Dependent::new(DependentId::new(), "23456789-0".to_string(), 5, None).unwrap();
    client.add_dependent(child).unwrap();
    assert_eq!(client.dependent_list().len(), 1);

    client.activate().unwrap();
    assert_eq!(client.status(), ClientStatus::Active);
}

#[test]
fn test_rehydration_preserves_status_and_dependents() {
    let dependent =
        Dependent::new(DependentId::new(), "23456789-0".to_string(), 5, None).unwrap();
    let mut attrs = attributes();
    attrs.status = Some(ClientStatus::Active);
    attrs.created_at = Some(Utc::now() - chrono::Duration::days(30));
    attrs.dependent_list = vec![dependent.clone()];

    let client = Client::new(attrs).unwrap();
    assert_eq!(client.status(), ClientStatus::Active);
    assert_eq!(client.dependent_list(), &[dependent]);
}

#[test]
fn test_rehydration_with_full_dependent_list() {
    let list: Vec<Dependent> = (0..MAX_DEPENDENTS)
        .map(|i| {
            Dependent::new(DependentId::new(), format!("2000000{i:02}-1"), 10, None).unwrap()
        })
        .collect();

    let mut attrs = attributes();
    attrs.dependent_list = list;
    let mut client = Client::new(attrs).unwrap();

    let extra = Dependent::new(DependentId::new(), "30000000-5".to_string(), 4, None).unwrap();
    assert!(matches!(
        client.add_dependent(extra),
        Err(ClientError::DependentLimitReached)
    ));
}

#[test]
fn test_zero_income_client_constructs_but_cannot_activate() {
    let mut attrs = attributes();
    attrs.income = Decimal::ZERO;
    let mut client = Client::new(attrs).unwrap();

    assert!(client.activate().is_err());
    assert_eq!(client.status(), ClientStatus::Pending);
}

proptest! {
    /// Any structurally valid input yields a Pending client with its
    /// fields preserved verbatim.
    #[test]
    fn prop_valid_clients_start_pending(
        name in "[A-Za-z ]{2,100}",
        local in "[a-z0-9]{1,20}",
        rut_body in "[0-9]{7,8}",
        check in "[0-9kK]",
        age in 0u32..120,
        income in 0i64..100_000_000,
        dependents in 0u32..=20,
    ) {
        let mut attrs = attributes();
        attrs.name = name.clone();
        attrs.email = format!("{local}@example.com");
        attrs.rut = format!("{rut_body}-{check}");
        attrs.age = age;
        attrs.income = Decimal::from(income);
        attrs.dependents = dependents;

        let client = Client::new(attrs).unwrap();
        prop_assert_eq!(client.status(), ClientStatus::Pending);
        prop_assert_eq!(client.name, name);
        prop_assert_eq!(client.income, Decimal::from(income));
        prop_assert!(client.created_at <= Utc::now());
    }

    /// Negative income never constructs, no matter the magnitude.
    #[test]
    fn prop_negative_income_rejected(income in -100_000_000i64..0) {
        let mut attrs = attributes();
        attrs.income = Decimal::from(income);
        prop_assert!(matches!(
            Client::new(attrs),
            Err(ClientError::NegativeIncome(_))
        ));
    }

    /// Declared dependent counts above the limit never construct.
    #[test]
    fn prop_dependents_over_limit_rejected(dependents in 21u32..1000) {
        let mut attrs = attributes();
        attrs.dependents = dependents;
        // Bound first: prop_assert! stringifies its condition into a format
        // string, so a struct pattern's braces cannot appear inline.
        let result = Client::new(attrs);
        prop_assert!(
            matches!(result, Err(ClientError::TooManyDependents { .. })),
            "expected TooManyDependents"
        );
    }
}
