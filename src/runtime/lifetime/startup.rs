use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认校长账号
/// 如果数据库中没有任何用户，则创建一个默认的 principal 账号
async fn seed_principal(storage: &Arc<dyn Storage>) {
    // 检查是否已有用户
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping principal seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default principal account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping principal seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("PRINCIPAL_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  PRINCIPAL PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated principal password: {}", pwd);
        warn!("  Please save this password or set PRINCIPAL_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    // 哈希密码
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash principal password: {}, skipping principal seed", e);
            return;
        }
    };

    // 创建校长账号
    let principal_request = CreateUserRequest {
        username: "principal".to_string(),
        email: "principal@localhost".to_string(),
        password: password_hash,
        role: UserRole::Principal,
    };

    match storage.create_user(principal_request).await {
        Ok(user) => {
            info!(
                "Default principal account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create principal account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化与默认账号填充
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认校长账号（如果需要）
    seed_principal(&storage).await;

    StartupContext { storage }
}
