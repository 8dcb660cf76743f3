//! Interchangeable `CustomerRepository` backends.

pub mod memory;
pub mod raw;
pub mod seaorm;

pub use memory::InMemoryCustomerRepository;
pub use raw::RawCustomerRepository;
pub use seaorm::SeaOrmCustomerRepository;
