use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::{people, prelude::*};

#[derive(Debug, Clone)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub remark: Option<String>,
}

pub struct PeopleRepository {
    conn: DatabaseConnection,
}

impl PeopleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<people::Model>> {
        People::find()
            .order_by_desc(people::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list people")
    }

    pub async fn get(&self, id: i32) -> Result<Option<people::Model>> {
        People::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query person")
    }

    pub async fn create(&self, person: NewPerson, now: DateTime<Utc>) -> Result<people::Model> {
        people::ActiveModel {
            first_name: Set(person.first_name),
            last_name: Set(person.last_name),
            birth_date: Set(person.birth_date),
            age: Set(person.age),
            remark: Set(person.remark),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert person")
    }
}
