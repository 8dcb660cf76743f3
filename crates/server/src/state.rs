use std::sync::Arc;

use service::{CustomerRepository, CustomerService, DynCustomerService};

/// Shared handler state. Cloning is cheap; the service (and its repository)
/// is built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub customers: Arc<DynCustomerService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customers: Arc::new(CustomerService::new(repo)) }
    }
}
