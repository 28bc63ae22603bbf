//! Remote Rows - 远程表行与领域对象之间的映射
//!
//! 远程表使用 snake_case 列名；`novels.genres` 是 JSON 列，
//! 可能是数组，也可能是序列化后的 JSON 字符串

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::chapter::Chapter;
use crate::domain::novel::{Genre, Novel};

pub const NOVELS: &str = "novels";
pub const CHAPTERS: &str = "chapters";
pub const GENRES: &str = "genres";

/// ID 列：字符串或整数
fn id_column<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid id: {}", other))),
    }
}

/// 时间列：RFC3339，或不带时区的时间戳（视为 UTC）
fn timestamp_column<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| D::Error::custom(format!("invalid timestamp {}: {}", raw, e)))
}

/// 题材行
#[derive(Debug, Clone, Deserialize)]
pub struct GenreRow {
    #[serde(deserialize_with = "id_column")]
    pub id: String,
    pub name: String,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Genre::with_id(row.id, row.name)
    }
}

/// 新建题材
#[derive(Debug, Serialize)]
pub struct GenreInsert<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

/// 解析 `genres` JSON 列；无法解析时记录日志并视为空
fn parse_genres(novel_id: &str, value: Value) -> Vec<Genre> {
    let value = match value {
        Value::Null => return Vec::new(),
        Value::String(s) if s.trim().is_empty() => return Vec::new(),
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(novel_id = %novel_id, error = %e, "Unparseable genres column");
                return Vec::new();
            }
        },
        other => other,
    };

    match serde_json::from_value::<Vec<GenreRow>>(value) {
        Ok(rows) => rows.into_iter().map(Genre::from).collect(),
        Err(e) => {
            tracing::warn!(novel_id = %novel_id, error = %e, "Unparseable genres column");
            Vec::new()
        }
    }
}

/// 小说行
#[derive(Debug, Deserialize)]
pub struct NovelRow {
    #[serde(deserialize_with = "id_column")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub genres: Value,
    #[serde(deserialize_with = "timestamp_column")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp_column")]
    pub updated_at: DateTime<Utc>,
}

impl From<NovelRow> for Novel {
    fn from(row: NovelRow) -> Self {
        let genres = parse_genres(&row.id, row.genres);
        Novel {
            id: row.id.into(),
            title: row.title,
            description: row.description.unwrap_or_default(),
            image_url: row.image_url.unwrap_or_default(),
            genres,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// 题材快照（写入 `novels.genres` 列）
#[derive(Debug, Serialize)]
pub struct GenreSnapshot<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

impl<'a> From<&'a Genre> for GenreSnapshot<'a> {
    fn from(genre: &'a Genre) -> Self {
        Self {
            id: genre.id.as_str(),
            name: &genre.name,
        }
    }
}

/// 新建小说
#[derive(Debug, Serialize)]
pub struct NovelInsert<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub genres: Vec<GenreSnapshot<'a>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Novel> for NovelInsert<'a> {
    fn from(novel: &'a Novel) -> Self {
        Self {
            id: novel.id.as_str(),
            title: &novel.title,
            description: &novel.description,
            image_url: &novel.image_url,
            genres: novel.genres.iter().map(GenreSnapshot::from).collect(),
            created_at: novel.created_at,
            updated_at: novel.updated_at,
        }
    }
}

/// 小说可编辑字段
#[derive(Debug, Serialize)]
pub struct NovelPatch<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub genres: Vec<GenreSnapshot<'a>>,
    pub updated_at: DateTime<Utc>,
}

/// 章节行
#[derive(Debug, Deserialize)]
pub struct ChapterRow {
    #[serde(deserialize_with = "id_column")]
    pub id: String,
    #[serde(deserialize_with = "id_column")]
    pub novel_id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub order: u32,
    #[serde(deserialize_with = "timestamp_column")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp_column")]
    pub updated_at: DateTime<Utc>,
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Chapter {
            id: row.id.into(),
            novel_id: row.novel_id.into(),
            title: row.title,
            content: row.content.unwrap_or_default(),
            order: row.order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// 新建章节（ID 由服务端生成）
#[derive(Debug, Serialize)]
pub struct ChapterInsert<'a> {
    pub novel_id: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 章节标题与正文
#[derive(Debug, Serialize)]
pub struct ChapterPatch<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// 仅修改序号
#[derive(Debug, Serialize)]
pub struct OrderPatch {
    pub order: u32,
}

/// 仅查询序号
#[derive(Debug, Deserialize)]
pub struct OrderRow {
    pub order: u32,
}

/// 仅查询 ID
#[derive(Debug, Deserialize)]
pub struct IdRow {
    #[serde(deserialize_with = "id_column")]
    pub id: String,
}
