//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod chapter_handlers;
mod import_handlers;
mod novel_handlers;
mod validation;

pub use chapter_handlers::*;
pub use import_handlers::*;
pub use novel_handlers::*;
