use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::entities::profiles;

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub profile_image: String,
    pub occupation: String,
    pub sex: String,
    pub birth_day: NaiveDate,
}

pub struct ProfileRepository {
    conn: DatabaseConnection,
}

impl ProfileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, profile: NewProfile, now: DateTime<Utc>) -> Result<profiles::Model> {
        profiles::ActiveModel {
            first_name: Set(profile.first_name),
            last_name: Set(profile.last_name),
            email: Set(profile.email),
            phone: Set(profile.phone),
            profile_image: Set(profile.profile_image),
            occupation: Set(profile.occupation),
            sex: Set(profile.sex),
            birth_day: Set(profile.birth_day),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert profile")
    }
}
