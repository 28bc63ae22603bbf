//! NovelVerse - 小说阅读平台数据访问服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Novel Context: 小说、题材、搜索过滤
//! - Chapter Context: 章节与序号维护
//! - Reading: 首页 / 详情页 / 阅读页的纯函数视图
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, DocumentExtractor, Notifier）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Remote: PostgREST 风格远程数据服务
//! - Memory: 带模拟延迟的内存数据源
//! - Adapters: 文档文本提取
//! - Events: 通知推送

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
