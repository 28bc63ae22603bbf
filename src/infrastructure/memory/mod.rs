//! Memory Layer - Mock Store
//!
//! 未配置远程数据服务时的进程内存储：写时复制的内存表、示例数据、模拟延迟

mod chapter_repo;
mod novel_repo;
mod seed;
mod store;
mod table;

pub use chapter_repo::MemoryChapterRepository;
pub use novel_repo::MemoryNovelRepository;
pub use store::{MockLatency, MockStore};
pub use table::{MemoryTable, Record};
