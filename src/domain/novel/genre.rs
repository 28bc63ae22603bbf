//! Novel Context - Genre

use serde::{Deserialize, Serialize};

use super::GenreId;

/// 题材
///
/// 不变量:
/// - 名称按大小写不敏感唯一
/// - 创建后不可修改，也不可删除
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Genre {
    /// 以去除首尾空白后的名称创建新题材
    pub fn new(name: &str) -> Self {
        Self {
            id: GenreId::generate(),
            name: name.trim().to_string(),
        }
    }

    pub fn with_id(id: impl Into<GenreId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// 名称是否与给定名称大小写不敏感相等
    pub fn matches_name(&self, name: &str) -> bool {
        genre_key(&self.name) == genre_key(name)
    }
}

/// 题材名称的比较键
pub fn genre_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// 题材解析结果
#[derive(Debug, Clone, Default)]
pub struct GenreResolution {
    /// 按请求顺序解析出的题材（已去重）
    pub genres: Vec<Genre>,
    /// 本次新建、需要追加到可用题材集合的题材
    pub created: Vec<Genre>,
}

/// 将请求的题材名称解析为题材记录
///
/// - 空白名称忽略
/// - 与已有题材大小写不敏感匹配时复用已有记录
/// - 否则新建题材；同一请求内重复的名称只新建一次
pub fn resolve_genres(requested: &[String], available: &[Genre]) -> GenreResolution {
    let mut resolution = GenreResolution::default();

    for name in requested {
        if name.trim().is_empty() {
            continue;
        }

        let genre = available
            .iter()
            .chain(resolution.created.iter())
            .find(|g| g.matches_name(name))
            .cloned()
            .unwrap_or_else(|| {
                let genre = Genre::new(name);
                resolution.created.push(genre.clone());
                genre
            });

        if !resolution.genres.iter().any(|g| g.id == genre.id) {
            resolution.genres.push(genre);
        }
    }

    resolution
}
