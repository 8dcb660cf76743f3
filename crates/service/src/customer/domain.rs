use serde::{Deserialize, Serialize};

/// A stored customer (business view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// A customer that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRegistrationRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Partial update input; `None` means "leave as is".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
}

impl From<CustomerRegistrationRequest> for NewCustomer {
    fn from(r: CustomerRegistrationRequest) -> Self {
        Self { name: r.name, email: r.email, age: r.age }
    }
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self { id: m.id, name: m.name, email: m.email, age: m.age }
    }
}

/// Merge `patch` into `current`.
///
/// A field is staged only when the patch supplies it and it differs from the
/// current value. Returns the merged record and whether anything was staged.
pub fn apply_update(current: &Customer, patch: &CustomerUpdateRequest) -> (Customer, bool) {
    let mut merged = current.clone();
    let mut changed = false;

    if let Some(name) = patch.name.as_ref().filter(|n| **n != current.name) {
        merged.name = name.clone();
        changed = true;
    }
    if let Some(age) = patch.age.filter(|a| *a != current.age) {
        merged.age = age;
        changed = true;
    }
    if let Some(email) = patch.email.as_ref().filter(|e| **e != current.email) {
        merged.email = email.clone();
        changed = true;
    }

    (merged, changed)
}
