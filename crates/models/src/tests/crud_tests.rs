use crate::customer;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, QueryFilter, Set, SqlErr};
use anyhow::Result;
use uuid::Uuid;

fn unique_email() -> String {
    format!("crud_{}@example.com", Uuid::new_v4())
}

/// Insert, read back, update and delete one customer row
#[tokio::test]
async fn test_customer_crud() -> Result<()> {
    let Some(db) = super::test_db().await else { return Ok(()); };

    let email = unique_email();
    let created = customer::ActiveModel {
        id: NotSet,
        name: Set("Alex".into()),
        email: Set(email.clone()),
        age: Set(21),
    }
    .insert(&db)
    .await?;
    assert!(created.id > 0);
    assert_eq!(created.email, email);

    let found = customer::Entity::find()
        .filter(customer::Column::Email.eq(email.clone()))
        .one(&db)
        .await?
        .expect("customer by email");
    assert_eq!(found, created);

    let mut am: customer::ActiveModel = found.into();
    am.age = Set(22);
    let updated = am.update(&db).await?;
    assert_eq!(updated.age, 22);
    assert_eq!(updated.name, "Alex");

    customer::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(customer::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

/// The unique index rejects a second row with the same email
#[tokio::test]
async fn test_email_unique_index() -> Result<()> {
    let Some(db) = super::test_db().await else { return Ok(()); };

    let email = unique_email();
    let first = customer::ActiveModel {
        id: NotSet,
        name: Set("First".into()),
        email: Set(email.clone()),
        age: Set(30),
    }
    .insert(&db)
    .await?;

    let err = customer::ActiveModel {
        id: NotSet,
        name: Set("Second".into()),
        email: Set(email),
        age: Set(31),
    }
    .insert(&db)
    .await
    .expect_err("duplicate email must fail");
    assert!(matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))));

    customer::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}
