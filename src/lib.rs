//! Prompt Arena - 提示词竞赛自动评分平台后端服务
//!
//! 基于 Actix Web 构建的提示词竞赛自动评分系统后端。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `grading`: 评分核心（单次评估、多轮聚合、批量编排）
//! - `models`: 数据模型定义
//! - `oracle`: 文本生成/评估模型客户端
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod grading;
pub mod models;
pub mod oracle;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
