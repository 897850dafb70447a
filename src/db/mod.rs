use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::approval_documents::DocumentStatus;
use crate::entities::{approval_documents, comments, exam_results, people, profiles, questions};
use crate::security::PasswordHash;

mod migrator;
pub mod repositories;

pub use migrator::Migrator;
pub use repositories::document::DecisionOutcome;
pub use repositories::people::NewPerson;
pub use repositories::product_code::{CodeRegistry, ProductCode};
pub use repositories::profile::NewProfile;
pub use repositories::question::NewQuestion;
pub use repositories::queue::TicketCursor;
pub use repositories::user::{Credential, User};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        Migrator::up(&conn, None).await?;

        let store = Self { conn };
        store.queue_repo().ensure_cursor(Utc::now()).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(store)
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn queue_repo(&self) -> repositories::queue::QueueRepository {
        repositories::queue::QueueRepository::new(self.conn.clone())
    }

    fn people_repo(&self) -> repositories::people::PeopleRepository {
        repositories::people::PeopleRepository::new(self.conn.clone())
    }

    fn document_repo(&self) -> repositories::document::DocumentRepository {
        repositories::document::DocumentRepository::new(self.conn.clone())
    }

    fn profile_repo(&self) -> repositories::profile::ProfileRepository {
        repositories::profile::ProfileRepository::new(self.conn.clone())
    }

    fn product_code_repo(
        &self,
        registry: CodeRegistry,
    ) -> repositories::product_code::ProductCodeRepository {
        repositories::product_code::ProductCodeRepository::new(self.conn.clone(), registry)
    }

    fn question_repo(&self) -> repositories::question::QuestionRepository {
        repositories::question::QuestionRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    fn exam_repo(&self) -> repositories::exam::ExamRepository {
        repositories::exam::ExamRepository::new(self.conn.clone())
    }

    // Accounts

    pub async fn get_credential(&self, normalized_username: &str) -> Result<Option<Credential>> {
        self.user_repo().get_credential(normalized_username).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn username_exists(&self, normalized_username: &str) -> Result<bool> {
        self.user_repo().exists(normalized_username).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        normalized_username: &str,
        password: PasswordHash,
        now: DateTime<Utc>,
    ) -> Result<Option<User>> {
        self.user_repo()
            .create(username, normalized_username, password, now)
            .await
    }

    pub async fn record_login_failure(
        &self,
        id: i32,
        failed_login_count: i32,
        lockout_end: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.user_repo()
            .record_login_failure(id, failed_login_count, lockout_end)
            .await
    }

    pub async fn record_login_success(&self, id: i32, now: DateTime<Utc>) -> Result<()> {
        self.user_repo().record_login_success(id, now).await
    }

    // Queue

    pub async fn current_ticket(&self) -> Result<TicketCursor> {
        self.queue_repo().current().await
    }

    pub async fn advance_ticket(&self, now: DateTime<Utc>) -> Result<TicketCursor> {
        self.queue_repo().advance(now).await
    }

    pub async fn reset_tickets(&self, now: DateTime<Utc>) -> Result<TicketCursor> {
        self.queue_repo().reset(now).await
    }

    // People

    pub async fn list_people(&self) -> Result<Vec<people::Model>> {
        self.people_repo().list().await
    }

    pub async fn get_person(&self, id: i32) -> Result<Option<people::Model>> {
        self.people_repo().get(id).await
    }

    pub async fn add_person(&self, person: NewPerson, now: DateTime<Utc>) -> Result<people::Model> {
        self.people_repo().create(person, now).await
    }

    // Approval documents

    pub async fn list_documents(&self) -> Result<Vec<approval_documents::Model>> {
        self.document_repo().list().await
    }

    pub async fn decide_documents(
        &self,
        ids: &[i32],
        status: DocumentStatus,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<DecisionOutcome> {
        self.document_repo().decide(ids, status, reason, now).await
    }

    pub async fn reset_documents(&self, now: DateTime<Utc>) -> Result<usize> {
        self.document_repo().reset(now).await
    }

    // Profiles

    pub async fn add_profile(
        &self,
        profile: NewProfile,
        now: DateTime<Utc>,
    ) -> Result<profiles::Model> {
        self.profile_repo().create(profile, now).await
    }

    // Product codes

    pub async fn list_product_codes(&self, registry: CodeRegistry) -> Result<Vec<ProductCode>> {
        self.product_code_repo(registry).list().await
    }

    pub async fn product_code_exists(&self, registry: CodeRegistry, code: &str) -> Result<bool> {
        self.product_code_repo(registry).exists(code).await
    }

    pub async fn add_product_code(
        &self,
        registry: CodeRegistry,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ProductCode>> {
        self.product_code_repo(registry).add(code, now).await
    }

    pub async fn remove_product_code(&self, registry: CodeRegistry, id: i32) -> Result<bool> {
        self.product_code_repo(registry).remove(id).await
    }

    // Question bank

    pub async fn list_questions(&self) -> Result<Vec<questions::Model>> {
        self.question_repo().list().await
    }

    pub async fn add_question(
        &self,
        question: NewQuestion,
        now: DateTime<Utc>,
    ) -> Result<questions::Model> {
        self.question_repo().create(question, now).await
    }

    pub async fn remove_question(&self, id: i32) -> Result<bool> {
        self.question_repo().delete(id).await
    }

    // Comment thread

    pub async fn list_comments(&self) -> Result<Vec<comments::Model>> {
        self.comment_repo().list().await
    }

    pub async fn add_comment(&self, message: &str, now: DateTime<Utc>) -> Result<comments::Model> {
        self.comment_repo().add(message, now).await
    }

    // Exam

    pub async fn record_exam_result(
        &self,
        full_name: &str,
        score: i32,
        total_questions: i32,
        now: DateTime<Utc>,
    ) -> Result<exam_results::Model> {
        self.exam_repo()
            .record(full_name, score, total_questions, now)
            .await
    }
}
