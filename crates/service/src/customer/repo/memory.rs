use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::customer::domain::{Customer, NewCustomer};
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;

#[derive(Debug)]
struct Table {
    rows: Vec<Customer>,
    next_id: i64,
}

/// Process-local customer list. Construct once and inject it; every clone of
/// the owning `Arc` sees the same rows.
#[derive(Debug)]
pub struct InMemoryCustomerRepository {
    table: Mutex<Table>,
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self { table: Mutex::new(Table { rows: Vec::new(), next_id: 1 }) }
    }
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self { Self::default() }

    /// Repository preloaded with two sample customers (ids 1 and 2).
    pub fn with_sample_data() -> Self {
        let rows = vec![
            Customer { id: 1, name: "Alex".into(), email: "Alex@gmail.com".into(), age: 21 },
            Customer { id: 2, name: "Jamila".into(), email: "Jamila@gmail.com".into(), age: 19 },
        ];
        Self { table: Mutex::new(Table { rows, next_id: 3 }) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, ServiceError> {
        self.table
            .lock()
            .map_err(|_| ServiceError::Repository("customer table lock poisoned".into()))
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.lock()?.rows.clone())
    }

    async fn select_customer_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        Ok(self.lock()?.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, ServiceError> {
        let mut table = self.lock()?;
        // Mirrors the unique index a database backend would enforce.
        if table.rows.iter().any(|c| c.email == customer.email) {
            return Err(ServiceError::email_taken());
        }
        let stored = Customer { id: table.next_id, name: customer.name, email: customer.email, age: customer.age };
        table.next_id += 1;
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.lock()?.rows.iter().any(|c| c.email == email))
    }

    async fn exists_customer_with_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.lock()?.rows.iter().any(|c| c.id == id))
    }

    async fn delete_customer_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.lock()?.rows.retain(|c| c.id != id);
        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), ServiceError> {
        let mut table = self.lock()?;
        if table.rows.iter().any(|c| c.id != customer.id && c.email == customer.email) {
            return Err(ServiceError::email_taken());
        }
        let slot = table
            .rows
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or_else(|| ServiceError::customer_not_found(customer.id))?;
        *slot = customer.clone();
        Ok(())
    }
}
