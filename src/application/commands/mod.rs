//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod chapter_commands;
mod novel_commands;

pub mod handlers;

pub use chapter_commands::*;
pub use novel_commands::*;
