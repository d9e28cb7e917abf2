use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub argon2: Argon2Config,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// Argon2 密码哈希配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}
