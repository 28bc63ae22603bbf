//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod chapter_handlers;
mod novel_handlers;
mod view_handlers;

pub use chapter_handlers::*;
pub use novel_handlers::*;
pub use view_handlers::*;
