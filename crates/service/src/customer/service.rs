use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{apply_update, Customer, CustomerRegistrationRequest, CustomerUpdateRequest, NewCustomer};
use super::repository::CustomerRepository;
use crate::errors::ServiceError;

/// Service over whichever backend was picked at startup.
pub type DynCustomerService = CustomerService<dyn CustomerRepository>;

/// Customer business service independent of web framework and storage backend.
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        self.repo.select_all_customers().await
    }

    pub async fn get_customer(&self, id: i64) -> Result<Customer, ServiceError> {
        self.repo
            .select_customer_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::customer_not_found(id))
    }

    /// Register a new customer; the store assigns the id.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{repo::InMemoryCustomerRepository, service::CustomerService};
    /// use service::customer::domain::CustomerRegistrationRequest;
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(InMemoryCustomerRepository::default()));
    /// let req = CustomerRegistrationRequest { name: "Alex".into(), email: "alex@x.com".into(), age: 21 };
    /// let created = tokio_test::block_on(svc.add_customer(req)).unwrap();
    /// assert_eq!(created.email, "alex@x.com");
    /// ```
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn add_customer(&self, request: CustomerRegistrationRequest) -> Result<Customer, ServiceError> {
        models::customer::validate_name(&request.name)?;
        if self.repo.exists_customer_with_email(&request.email).await? {
            debug!("email already registered");
            return Err(ServiceError::email_taken());
        }
        let created = self.repo.insert_customer(NewCustomer::from(request)).await?;
        info!(customer_id = created.id, email = %created.email, "customer_registered");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete_customer_by_id(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_customer_with_id(id).await? {
            return Err(ServiceError::customer_not_found(id));
        }
        self.repo.delete_customer_by_id(id).await?;
        info!(customer_id = id, "customer_deleted");
        Ok(())
    }

    /// Apply a partial update. Only supplied fields that differ from the stored
    /// value count as changes; an update with no changes is rejected.
    ///
    /// The email re-check does not exclude `id`: a staged email always differs
    /// from this customer's own, so any match belongs to another record.
    #[instrument(skip(self, request))]
    pub async fn update_customer(&self, id: i64, request: CustomerUpdateRequest) -> Result<Customer, ServiceError> {
        let current = self.get_customer(id).await?;
        if let Some(name) = request.name.as_deref() {
            models::customer::validate_name(name)?;
        }
        let (merged, changed) = apply_update(&current, &request);

        if merged.email != current.email && self.repo.exists_customer_with_email(&merged.email).await? {
            return Err(ServiceError::email_taken());
        }
        if !changed {
            return Err(ServiceError::Validation("no data changes found".into()));
        }

        self.repo.update_customer(&merged).await?;
        info!(customer_id = id, "customer_updated");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::repo::InMemoryCustomerRepository;

    fn service() -> (Arc<InMemoryCustomerRepository>, CustomerService<InMemoryCustomerRepository>) {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        (repo.clone(), CustomerService::new(repo))
    }

    fn registration(name: &str, email: &str, age: i32) -> CustomerRegistrationRequest {
        CustomerRegistrationRequest { name: name.into(), email: email.into(), age }
    }

    #[tokio::test]
    async fn register_with_fresh_email_appears_in_list() -> anyhow::Result<()> {
        let (_, svc) = service();
        let created = svc.add_customer(registration("Alex", "alex@x.com", 21)).await?;
        let all = svc.get_all_customers().await?;
        assert_eq!(all, vec![created.clone()]);
        assert_eq!(svc.get_customer(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn register_with_taken_email_is_conflict_and_creates_nothing() -> anyhow::Result<()> {
        let (repo, svc) = service();
        svc.add_customer(registration("Alex", "alex@x.com", 21)).await?;
        let err = svc.add_customer(registration("Other", "alex@x.com", 30)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == "email already taken"));
        assert_eq!(repo.select_all_customers().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn register_with_blank_name_is_validation() {
        let (repo, svc) = service();
        let err = svc.add_customer(registration("  ", "blank@x.com", 21)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(repo.select_all_customers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let (_, svc) = service();
        let err = svc.get_customer(404).await.unwrap_err();
        assert_eq!(err.to_string(), "not found: Customer with id [404] not found");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> anyhow::Result<()> {
        let (_, svc) = service();
        let c = svc.add_customer(registration("Alex", "alex@x.com", 21)).await?;
        svc.delete_customer_by_id(c.id).await?;
        assert!(matches!(svc.get_customer(c.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let (_, svc) = service();
        assert!(matches!(svc.delete_customer_by_id(9).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_single_field_keeps_the_others() -> anyhow::Result<()> {
        let (_, svc) = service();
        let c = svc.add_customer(registration("Alex", "alex@x.com", 20)).await?;
        svc.update_customer(c.id, CustomerUpdateRequest { age: Some(21), ..Default::default() }).await?;
        let after = svc.get_customer(c.id).await?;
        assert_eq!(after, Customer { age: 21, ..c });
        Ok(())
    }

    #[tokio::test]
    async fn noop_update_is_validation_and_leaves_record() -> anyhow::Result<()> {
        let (_, svc) = service();
        let c = svc.add_customer(registration("Alex", "alex@x.com", 21)).await?;

        let empty = svc.update_customer(c.id, CustomerUpdateRequest::default()).await.unwrap_err();
        assert!(matches!(empty, ServiceError::Validation(ref m) if m == "no data changes found"));

        let same = CustomerUpdateRequest { name: Some("Alex".into()), email: None, age: Some(21) };
        assert!(matches!(svc.update_customer(c.id, same).await, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get_customer(c.id).await?, c);
        Ok(())
    }

    #[tokio::test]
    async fn update_to_own_email_is_noop_not_conflict() -> anyhow::Result<()> {
        let (_, svc) = service();
        let c = svc.add_customer(registration("Alex", "alex@x.com", 21)).await?;
        let req = CustomerUpdateRequest { email: Some("alex@x.com".into()), ..Default::default() };
        assert!(matches!(svc.update_customer(c.id, req).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_to_other_customers_email_is_conflict() -> anyhow::Result<()> {
        let (_, svc) = service();
        let alex = svc.add_customer(registration("Alex", "alex@x.com", 21)).await?;
        svc.add_customer(registration("Jamila", "jamila@x.com", 19)).await?;
        let req = CustomerUpdateRequest { email: Some("jamila@x.com".into()), age: Some(30), ..Default::default() };
        assert!(matches!(svc.update_customer(alex.id, req).await, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.get_customer(alex.id).await?, alex);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let (_, svc) = service();
        let req = CustomerUpdateRequest { age: Some(1), ..Default::default() };
        assert!(matches!(svc.update_customer(77, req).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_with_blank_name_is_validation() -> anyhow::Result<()> {
        let (_, svc) = service();
        let c = svc.add_customer(registration("Alex", "alex@x.com", 21)).await?;
        let req = CustomerUpdateRequest { name: Some("".into()), ..Default::default() };
        assert!(matches!(svc.update_customer(c.id, req).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_with_blank_name_is_not_found() {
        let (_, svc) = service();
        let req = CustomerUpdateRequest { name: Some("".into()), ..Default::default() };
        let err = svc.update_customer(999, req).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn works_through_a_trait_object() -> anyhow::Result<()> {
        let repo: Arc<dyn CustomerRepository> = Arc::new(InMemoryCustomerRepository::with_sample_data());
        let svc: DynCustomerService = CustomerService::new(repo);
        assert_eq!(svc.get_all_customers().await?.len(), 2);
        svc.update_customer(1, CustomerUpdateRequest { age: Some(22), ..Default::default() }).await?;
        assert_eq!(svc.get_customer(1).await?.age, 22);
        Ok(())
    }
}
