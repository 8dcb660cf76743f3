//! Customer module: three-layer architecture (domain, repository, service).
//!
//! The service owns every business rule; repositories only translate
//! entity operations into persistence calls.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use self::repository::CustomerRepository;
pub use self::service::{CustomerService, DynCustomerService};
