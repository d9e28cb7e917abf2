//! AssignFlow - 作业流转平台后端服务
//!
//! 基于 Actix Web 构建的作业生命周期管理后端：学生起草并提交作业，
//! 教师批改，校长跨教师查看与复批。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义（含作业状态机）
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（操作门面与访问控制）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
