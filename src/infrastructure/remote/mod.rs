//! Remote Layer - 远程数据服务
//!
//! PostgREST 风格 REST 接口上的仓储实现

mod chapter_repo;
mod client;
#[cfg(test)]
mod fake;
mod novel_repo;
mod rows;

pub use chapter_repo::RemoteChapterRepository;
pub use client::{RemoteClient, RemoteClientConfig, NO_ROWS_CODE};
pub use novel_repo::RemoteNovelRepository;
