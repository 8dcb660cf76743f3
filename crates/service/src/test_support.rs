#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use uuid::Uuid;

use crate::customer::domain::{Customer, NewCustomer};
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Live database for backend tests, or `None` when `DATABASE_URL` is unset,
/// `SKIP_DB_TESTS` is set, or the server cannot be reached.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return None;
    }
    let migrated = MIGRATED
        .get_or_init(|| async {
            match models::db::connect().await {
                Ok(db) => migration::Migrator::up(&db, None).await.is_ok(),
                Err(_) => false,
            }
        })
        .await;
    if !*migrated {
        return None;
    }
    // Fresh connection for the current test's runtime
    models::db::connect().await.ok()
}

pub fn unique_email(tag: &str) -> String {
    format!("{}_{}@example.com", tag, Uuid::new_v4())
}

/// Behaviour every `CustomerRepository` backend must share.
pub async fn exercise_repository(repo: &dyn CustomerRepository) -> anyhow::Result<()> {
    let email = unique_email("contract");
    assert!(!repo.exists_customer_with_email(&email).await?);

    let created = repo
        .insert_customer(NewCustomer { name: "Alex".into(), email: email.clone(), age: 21 })
        .await?;
    assert!(created.id > 0);
    assert_eq!((created.name.as_str(), created.email.as_str(), created.age), ("Alex", email.as_str(), 21));

    assert!(repo.exists_customer_with_email(&email).await?);
    assert!(repo.exists_customer_with_id(created.id).await?);
    let all = repo.select_all_customers().await?;
    assert!(all.contains(&created));
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(repo.select_customer_by_id(created.id).await?, Some(created.clone()));

    // a second row with the same email is refused by the store itself
    let dup = repo
        .insert_customer(NewCustomer { name: "Other".into(), email: email.clone(), age: 30 })
        .await;
    assert!(matches!(dup, Err(ServiceError::Conflict(_))));

    let updated = Customer { age: 22, ..created.clone() };
    repo.update_customer(&updated).await?;
    assert_eq!(repo.select_customer_by_id(created.id).await?, Some(updated));

    repo.delete_customer_by_id(created.id).await?;
    assert!(!repo.exists_customer_with_id(created.id).await?);
    assert_eq!(repo.select_customer_by_id(created.id).await?, None);
    Ok(())
}
