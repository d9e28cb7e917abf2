//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_assignflow_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AssignFlowError {
            $($variant(String),)*
        }

        impl AssignFlowError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AssignFlowError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AssignFlowError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AssignFlowError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AssignFlowError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AssignFlowError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_assignflow_errors! {
    Validation("E001", "Validation Error"),
    NotFound("E002", "Resource Not Found"),
    Forbidden("E003", "Permission Denied"),
    InvalidStateTransition("E004", "Invalid State Transition"),
    DatabaseConfig("E005", "Database Configuration Error"),
    DatabaseConnection("E006", "Database Connection Error"),
    DatabaseOperation("E007", "Database Operation Error"),
    Serialization("E008", "Serialization Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
}

impl AssignFlowError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AssignFlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AssignFlowError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AssignFlowError {
    fn from(err: sea_orm::DbErr) -> Self {
        AssignFlowError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AssignFlowError {
    fn from(err: std::io::Error) -> Self {
        AssignFlowError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AssignFlowError {
    fn from(err: serde_json::Error) -> Self {
        AssignFlowError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssignFlowError>;
