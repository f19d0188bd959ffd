use std::sync::Arc;

use yokai_state::{FactoryError, FactoryKind, StorageError, StorageField, StoreError};
use yokai_test::{initialized_state, initialized_state_with, TestPlatformContext};

#[test]
fn first_read_writes_through_and_later_reads_hit_cache() {
    let (state, context) = initialized_state();
    let field = StorageField::new(state.plain().clone(), "yokai", "threads", 4);

    assert_eq!(field.get().unwrap(), 4);
    let store = context.store("common_prefs");
    assert_eq!(store.peek("yokai_threads"), Some("4".to_string()));
    let reads = store.reads();

    for _ in 0..5 {
        assert_eq!(field.get().unwrap(), 4);
    }
    assert_eq!(store.reads(), reads);
}

#[test]
fn every_set_writes_immediately() {
    let (state, context) = initialized_state();
    let field = StorageField::new(state.plain().clone(), "yokai", "threads", 4);
    let store = context.store("common_prefs");

    field.set(1).unwrap();
    field.set(2).unwrap();
    field.set(3).unwrap();

    assert_eq!(store.writes(), 3);
    assert_eq!(store.peek("yokai_threads"), Some("3".to_string()));
}

#[test]
fn backends_are_constructed_once_per_namespace() {
    let (state, context) = initialized_state();

    let first = state.secure().create("yokai").unwrap();
    let second = state.secure().create("yokai").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(context.key_requests(), 1);
    assert_eq!(context.opened_stores(), 1);

    state.secure().create("other").unwrap();
    assert_eq!(context.key_requests(), 2);
    assert_eq!(context.opened_stores(), 2);
}

#[test]
fn missing_key_material_is_a_security_provider_error() {
    let (state, context) = initialized_state_with(TestPlatformContext::without_master_key());

    let err = state.secure().create("yokai").unwrap_err();
    assert!(matches!(err, FactoryError::SecurityProvider(ref e) if e.alias == "yokai_master_key"));

    // Not retried behind the caller's back.
    assert_eq!(context.key_requests(), 1);
    assert!(!context.has_store("secure_prefs_yokai"));

    // Plain stores do not need key material.
    let field = StorageField::new(state.plain().clone(), "yokai", "name", String::new());
    assert_eq!(field.get().unwrap(), "");
}

#[test]
fn store_failures_surface_to_the_caller() {
    let (state, _) = initialized_state_with(TestPlatformContext::with_failing_stores());
    let field = StorageField::new(state.plain().clone(), "yokai", "threads", 4);

    assert!(matches!(
        field.get(),
        Err(StorageError::Factory(FactoryError::Store(StoreError::Internal(_))))
    ));
    assert!(!field.is_loaded());
}

#[test]
fn uninitialized_state_fails_every_field() {
    let state = yokai_state::StateContext::default();
    let field = StorageField::new(state.secure().clone(), "yokai", "token", String::new());

    assert!(matches!(
        field.set("value".to_string()),
        Err(StorageError::Factory(FactoryError::Uninitialized(
            FactoryKind::Secure
        )))
    ));
}
