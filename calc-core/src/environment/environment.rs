use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};

use super::prelude::Value;

/// Bindings every new table starts with.
pub const CONSTANTS: [(&str, i64); 2] = [
    ("k", 1_000),
    ("m", 1_000_000),
];

/// Bound to the numeric user id in tables of identified users.
pub const ID_BINDING: &str = "id";

pub fn is_seeded(name: &str) -> bool {
    name == ID_BINDING || CONSTANTS.iter().any(|(constant, _)| *constant == name)
}

/// Whose variables a line reads and writes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserId {
    /// Shared session used when the host does not identify the caller.
    #[default]
    Anonymous,
    Id(u64),
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        UserId::Id(value)
    }
}

impl From<Option<u64>> for UserId {
    fn from(value: Option<u64>) -> Self {
        value.map_or(UserId::Anonymous, UserId::Id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Anonymous => write!(f, "anonymous"),
            UserId::Id(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct VariableTable {
    pub store: HashMap<String, Value>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self {
            store: HashMap::new()
        }
    }

    pub fn seeded(user: UserId) -> Self {
        let mut table = Self::new();

        for (name, value) in CONSTANTS {
            table.set(name.to_string(), Value::from(value));
        }

        if let UserId::Id(id) = user {
            table.set(ID_BINDING.to_string(), Value::Integer { value: id.into() });
        }

        table
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    /// Binds `name`, returning what it held before.
    pub fn set(&mut self, name: String, value: Value) -> Option<Value> {
        self.store.insert(name, value)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Bindings sorted by name.
    pub fn bindings(&self) -> Vec<(&String, &Value)> {
        let mut bindings = self.store.iter().collect::<Vec<_>>();
        bindings.sort_by(|(a, _), (b, _)| a.cmp(b));

        bindings
    }
}

/// Variable tables of every user seen so far. Tables are never dropped.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    tables: HashMap<UserId, VariableTable>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new()
        }
    }

    /// Table of `user`, created with the default constants on first use.
    pub fn set_user(&mut self, user: UserId) -> &mut VariableTable {
        self.tables
            .entry(user)
            .or_insert_with(|| VariableTable::seeded(user))
    }

    pub fn table(&self, user: UserId) -> Option<&VariableTable> {
        self.tables.get(&user)
    }

    pub fn users(&self) -> impl Iterator<Item = &UserId> {
        self.tables.keys()
    }
}

/// [`Environment`] behind one global lock, for hosts evaluating on several threads.
#[derive(Debug, Default, Clone)]
pub struct SharedEnvironment {
    inner: Arc<Mutex<Environment>>,
}

impl SharedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, Environment> {
        self.inner.lock().expect("Environment lock poisoned")
    }
}

impl From<Environment> for SharedEnvironment {
    fn from(value: Environment) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value))
        }
    }
}
