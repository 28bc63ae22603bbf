//! Novel Context - 小说限界上下文
//!
//! 职责:
//! - 小说聚合管理
//! - 题材解析（大小写不敏感复用 / 新建）
//! - 关键字 + 题材交集搜索

mod aggregate;
mod genre;
mod search;
mod value_objects;

pub use aggregate::{Novel, NovelDraft};
pub use genre::{genre_key, resolve_genres, Genre, GenreResolution};
pub use search::NovelFilter;
pub use value_objects::{ChapterId, GenreId, NovelId, Title, MAX_TITLE_CHARS};
