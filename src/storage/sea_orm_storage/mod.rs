//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod users;

use crate::config::AppConfig;
use crate::errors::{AssignFlowError, Result};
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
            .map_err(|e| AssignFlowError::database_operation(format!("数据库迁移失败: {e}")))?;

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
            .map_err(|e| AssignFlowError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AssignFlowError::database_connection(format!("SQLite 连接失败: {e}")))?;

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
            .map_err(|e| AssignFlowError::database_connection(format!("无法连接到数据库: {e}")))
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
            Err(AssignFlowError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::entities::{Assignment, AssignmentState},
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;

#[async_trait::async_trait]
impl Storage for SeaOrmStorage {
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_teachers(&self) -> Result<Vec<User>> {
        self.list_teachers_impl().await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn create_assignment(&self, student_id: i64, content: String) -> Result<Assignment> {
        self.create_assignment_impl(student_id, content).await
    }

    async fn update_assignment(
        &self,
        assignment: &Assignment,
        expected: AssignmentState,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment, expected).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn list_assignments_by_student(&self, student_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_student_impl(student_id).await
    }

    async fn list_submitted_assignments_by_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        self.list_submitted_assignments_by_student_impl(student_id)
            .await
    }

    async fn list_assignments_by_teacher(&self, teacher_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_teacher_impl(teacher_id).await
    }

    async fn list_submitted_and_graded_assignments(&self) -> Result<Vec<Assignment>> {
        self.list_submitted_and_graded_assignments_impl().await
    }
}
