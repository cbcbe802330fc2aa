use std::thread;

use super::prelude::{is_seeded, Environment, SharedEnvironment, UserId, Value, VariableTable};

#[test]
fn test_tables_are_seeded_on_first_use() {
    let mut env = Environment::new();

    assert!(env.table(UserId::Id(7)).is_none());

    let table = env.set_user(UserId::Id(7));

    assert_eq!(table.get("k"), Some(&Value::from(1_000)));
    assert_eq!(table.get("m"), Some(&Value::from(1_000_000)));
    assert_eq!(table.get("id"), Some(&Value::from(7)));
    assert_eq!(table.len(), 3);
}

#[test]
fn test_anonymous_table_has_no_id() {
    let mut env = Environment::new();
    let table = env.set_user(UserId::Anonymous);

    assert!(table.get("id").is_none());
    assert_eq!(table.get("k"), Some(&Value::from(1_000)));
}

#[test]
fn test_set_user_keeps_existing_table() {
    let mut env = Environment::new();

    env.set_user(UserId::Id(1)).set("x".to_string(), Value::from(5));

    let table = env.set_user(UserId::Id(1));
    assert_eq!(table.get("x"), Some(&Value::from(5)));
    assert_eq!(env.users().count(), 1);
}

#[test]
fn test_tables_are_isolated() {
    let mut env = Environment::new();

    env.set_user(UserId::Id(1)).set("x".to_string(), Value::from(5));
    env.set_user(UserId::Id(2));

    assert!(env.table(UserId::Id(2)).and_then(|table| table.get("x")).is_none());
    assert!(env.table(UserId::Anonymous).is_none());
}

#[test]
fn test_set_returns_previous_value() {
    let mut table = VariableTable::seeded(UserId::Anonymous);

    assert_eq!(table.set("k".to_string(), Value::from(2)), Some(Value::from(1_000)));
    assert_eq!(table.set("fresh".to_string(), Value::from(2)), None);
}

#[test]
fn test_bindings_are_sorted() {
    let table = VariableTable::seeded(UserId::Id(3));
    let names = table.bindings()
        .into_iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["id", "k", "m"]);
}

#[test]
fn test_seeded_names() {
    assert!(is_seeded("k"));
    assert!(is_seeded("m"));
    assert!(is_seeded("id"));
    assert!(!is_seeded("x"));
}

#[test]
fn test_user_id_conversions() {
    assert_eq!(UserId::from(Some(4)), UserId::Id(4));
    assert_eq!(UserId::from(None), UserId::Anonymous);
    assert_eq!(UserId::from(9).to_string(), "9");
    assert_eq!(UserId::default(), UserId::Anonymous);
}

#[test]
fn test_shared_environment_across_threads() {
    let shared = SharedEnvironment::new();

    let handles = (0..4u64)
        .map(|user| {
            let shared = shared.clone();

            thread::spawn(move || {
                let mut env = shared.lock();
                env.set_user(UserId::Id(user)).set("x".to_string(), Value::from(user as i64));
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    let env = shared.lock();

    assert_eq!(env.users().count(), 4);
    assert_eq!(
        env.table(UserId::Id(3)).and_then(|table| table.get("x")),
        Some(&Value::from(3))
    );
}
