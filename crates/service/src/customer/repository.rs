use async_trait::async_trait;

use super::domain::{Customer, NewCustomer};
use crate::errors::ServiceError;

/// Repository abstraction for customer persistence.
///
/// Implementations perform no business validation; uniqueness and existence
/// rules live in [`super::service::CustomerService`].
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers ordered by id.
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn select_customer_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError>;
    /// Insert and return the stored row with its assigned id.
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, ServiceError>;
    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError>;
    async fn exists_customer_with_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn delete_customer_by_id(&self, id: i64) -> Result<(), ServiceError>;
    /// Overwrite every column of the row identified by `customer.id`.
    async fn update_customer(&self, customer: &Customer) -> Result<(), ServiceError>;
}
