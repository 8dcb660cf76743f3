//! Service layer for customer records.
//! - Separates business rules (uniqueness, existence, partial-update diff) from data access.
//! - Storage is reached only through the `CustomerRepository` trait; three backends implement it.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod customer;
#[cfg(test)]
pub mod test_support;

pub use customer::{CustomerRepository, CustomerService, DynCustomerService};
pub use errors::ServiceError;
