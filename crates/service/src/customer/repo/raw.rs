//! Repository speaking plain parameterized SQL through the connection, with a
//! hand-written row mapper instead of entity derives.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, Statement, Value};
use tracing::debug;

use crate::customer::domain::{Customer, NewCustomer};
use crate::customer::repository::CustomerRepository;
use crate::errors::{db_err, ServiceError};

const SELECT_ALL: &str = "SELECT id, name, email, age FROM customer ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, name, email, age FROM customer WHERE id = $1";
const INSERT: &str = "INSERT INTO customer (name, email, age) VALUES ($1, $2, $3) RETURNING id, name, email, age";
const EXISTS_BY_EMAIL: &str = "SELECT EXISTS(SELECT 1 FROM customer WHERE email = $1) AS present";
const EXISTS_BY_ID: &str = "SELECT EXISTS(SELECT 1 FROM customer WHERE id = $1) AS present";
const DELETE_BY_ID: &str = "DELETE FROM customer WHERE id = $1";
const UPDATE_BY_ID: &str = "UPDATE customer SET name = $1, email = $2, age = $3 WHERE id = $4";

/// Copy the four customer columns out of a result row.
pub fn map_row(row: &QueryResult) -> Result<Customer, DbErr> {
    Ok(Customer {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        email: row.try_get("", "email")?,
        age: row.try_get("", "age")?,
    })
}

pub struct RawCustomerRepository {
    pub db: DatabaseConnection,
}

impl RawCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn stmt<I>(sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        debug!(sql = %sql, "query");
        Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, values)
    }

    async fn query_flag(&self, sql: &str, value: Value) -> Result<bool, ServiceError> {
        let row = self.db.query_one(Self::stmt(sql, [value])).await.map_err(db_err)?;
        match row {
            Some(r) => r.try_get::<bool>("", "present").map_err(db_err),
            None => Ok(false),
        }
    }
}

#[async_trait]
impl CustomerRepository for RawCustomerRepository {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = self.db.query_all(Self::stmt(SELECT_ALL, Vec::<Value>::new())).await.map_err(db_err)?;
        rows.iter().map(map_row).collect::<Result<Vec<_>, _>>().map_err(db_err)
    }

    async fn select_customer_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        let row = self.db.query_one(Self::stmt(SELECT_BY_ID, [id.into()])).await.map_err(db_err)?;
        row.as_ref().map(map_row).transpose().map_err(db_err)
    }

    async fn insert_customer(&self, new: NewCustomer) -> Result<Customer, ServiceError> {
        let row = self
            .db
            .query_one(Self::stmt(INSERT, [new.name.into(), new.email.into(), new.age.into()]))
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::Repository("insert returned no row".into()))?;
        map_row(&row).map_err(db_err)
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError> {
        self.query_flag(EXISTS_BY_EMAIL, email.into()).await
    }

    async fn exists_customer_with_id(&self, id: i64) -> Result<bool, ServiceError> {
        self.query_flag(EXISTS_BY_ID, id.into()).await
    }

    async fn delete_customer_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let res = self.db.execute(Self::stmt(DELETE_BY_ID, [id.into()])).await.map_err(db_err)?;
        debug!(id, rows_affected = res.rows_affected(), "delete customer");
        Ok(())
    }

    async fn update_customer(&self, c: &Customer) -> Result<(), ServiceError> {
        let values: [Value; 4] = [c.name.clone().into(), c.email.clone().into(), c.age.into(), c.id.into()];
        let res = self.db.execute(Self::stmt(UPDATE_BY_ID, values)).await.map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Err(ServiceError::customer_not_found(c.id));
        }
        Ok(())
    }
}
