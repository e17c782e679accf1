//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod competitions;
mod participants;
mod submissions;

use crate::config::AppConfig;
use crate::errors::{PromptArenaError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PromptArenaError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PromptArenaError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PromptArenaError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PromptArenaError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    competitions::{entities::Competition, requests::CreateCompetitionRequest},
    grading::responses::GradingStatusResponse,
    participants::entities::{NewParticipant, Participant},
    submissions::{
        entities::{PendingSubmission, Submission, SubmissionStatus},
        requests::SubmissionListQuery,
        responses::SubmissionListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 竞赛模块
    async fn create_competition(
        &self,
        competition: CreateCompetitionRequest,
    ) -> Result<Competition> {
        self.create_competition_impl(competition).await
    }

    async fn get_competition_by_id(&self, id: i64) -> Result<Option<Competition>> {
        self.get_competition_by_id_impl(id).await
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>> {
        self.list_competitions_impl().await
    }

    // 赛题模块
    async fn create_assignment(
        &self,
        competition_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(competition_id, assignment)
            .await
    }

    async fn list_assignments(&self, competition_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(competition_id).await
    }

    // 参赛者模块
    async fn create_participants(
        &self,
        competition_id: i64,
        participants: Vec<NewParticipant>,
    ) -> Result<usize> {
        self.create_participants_impl(competition_id, participants)
            .await
    }

    async fn list_participants(&self, competition_id: i64) -> Result<Vec<Participant>> {
        self.list_participants_impl(competition_id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        competition_id: i64,
        participant_id: i64,
        assignment_id: i64,
        prompt_text: String,
    ) -> Result<Submission> {
        self.create_submission_impl(competition_id, participant_id, assignment_id, prompt_text)
            .await
    }

    async fn list_submissions_with_pagination(
        &self,
        competition_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(competition_id, query)
            .await
    }

    // 评分流水线模块
    async fn list_pending_submissions(
        &self,
        competition_id: i64,
    ) -> Result<Vec<PendingSubmission>> {
        self.list_pending_submissions_impl(competition_id).await
    }

    async fn update_submission_status(&self, id: i64, status: SubmissionStatus) -> Result<bool> {
        self.update_submission_status_impl(id, status).await
    }

    async fn complete_submission(
        &self,
        id: i64,
        score: f64,
        feedback: &str,
        grading_details: &str,
    ) -> Result<bool> {
        self.complete_submission_impl(id, score, feedback, grading_details)
            .await
    }

    async fn fail_submission(&self, id: i64, feedback: &str) -> Result<bool> {
        self.fail_submission_impl(id, feedback).await
    }

    async fn count_submissions_by_status(
        &self,
        competition_id: i64,
    ) -> Result<GradingStatusResponse> {
        self.count_submissions_by_status_impl(competition_id).await
    }

    async fn list_completed_submissions(&self, competition_id: i64) -> Result<Vec<Submission>> {
        self.list_completed_submissions_impl(competition_id).await
    }
}
