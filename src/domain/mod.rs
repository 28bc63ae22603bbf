//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Novel Context: 小说与题材
//! - Chapter Context: 章节与序号维护
//!
//! 以及首页 / 详情页使用的只读视图聚合

pub mod chapter;
pub mod novel;
pub mod reading;
