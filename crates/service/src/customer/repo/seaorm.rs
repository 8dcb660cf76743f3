use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Unchanged,
};

use models::customer;

use crate::customer::domain::{Customer, NewCustomer};
use crate::customer::repository::CustomerRepository;
use crate::errors::{db_err, ServiceError};

/// SeaORM-backed repository: entity finders and active-model persistence.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn select_customer_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        let found = customer::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(Customer::from))
    }

    async fn insert_customer(&self, new: NewCustomer) -> Result<Customer, ServiceError> {
        let am = customer::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            email: Set(new.email),
            age: Set(new.age),
        };
        let created = am.insert(&self.db).await.map_err(db_err)?;
        Ok(created.into())
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError> {
        let n = customer::Entity::find()
            .filter(customer::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(n > 0)
    }

    async fn exists_customer_with_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = customer::Entity::find_by_id(id).count(&self.db).await.map_err(db_err)?;
        Ok(n > 0)
    }

    async fn delete_customer_by_id(&self, id: i64) -> Result<(), ServiceError> {
        customer::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update_customer(&self, c: &Customer) -> Result<(), ServiceError> {
        let am = customer::ActiveModel {
            id: Unchanged(c.id),
            name: Set(c.name.clone()),
            email: Set(c.email.clone()),
            age: Set(c.age),
        };
        match am.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::customer_not_found(c.id)),
            Err(e) => Err(db_err(e)),
        }
    }
}
