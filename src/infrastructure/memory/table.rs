//! In-Memory Table - 写时复制的有序表
//!
//! 以 ID 为键的有序 Map，每次写入都复制整张表、修改后原子替换，
//! 读者拿到的总是完整快照，不会看到写到一半的记录。

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chapter::Chapter;
use crate::domain::novel::{ChapterId, Genre, GenreId, Novel, NovelId};

/// 可存入内存表的记录
pub trait Record: Clone + Send + Sync + 'static {
    type Key: Ord + Clone + Send + Sync + 'static;

    fn key(&self) -> &Self::Key;
}

impl Record for Novel {
    type Key = NovelId;

    fn key(&self) -> &NovelId {
        &self.id
    }
}

impl Record for Chapter {
    type Key = ChapterId;

    fn key(&self) -> &ChapterId {
        &self.id
    }
}

impl Record for Genre {
    type Key = GenreId;

    fn key(&self) -> &GenreId {
        &self.id
    }
}

/// 内存表
pub struct MemoryTable<T: Record> {
    rows: RwLock<Arc<BTreeMap<T::Key, T>>>,
}

impl<T: Record> MemoryTable<T> {
    pub fn new() -> Self {
        Self::from_rows(Vec::new())
    }

    pub fn from_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let map = rows
            .into_iter()
            .map(|row| (row.key().clone(), row))
            .collect::<BTreeMap<_, _>>();
        Self {
            rows: RwLock::new(Arc::new(map)),
        }
    }

    /// 当前快照
    pub async fn snapshot(&self) -> Arc<BTreeMap<T::Key, T>> {
        self.rows.read().await.clone()
    }

    /// 全部记录（按键排序）
    pub async fn list(&self) -> Vec<T> {
        self.snapshot().await.values().cloned().collect()
    }

    /// 满足条件的记录
    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.snapshot()
            .await
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub async fn get(&self, key: &T::Key) -> Option<T> {
        self.snapshot().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.snapshot().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// 写时复制：复制整张表，在副本上执行修改，然后替换
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut BTreeMap<T::Key, T>) -> R) -> R {
        let mut guard = self.rows.write().await;
        let mut next = (**guard).clone();
        let result = f(&mut next);
        *guard = Arc::new(next);
        result
    }

    pub async fn insert(&self, row: T) {
        self.mutate(|rows| {
            rows.insert(row.key().clone(), row);
        })
        .await
    }

    /// 修改已存在的记录，返回修改后的副本
    pub async fn update(&self, key: &T::Key, f: impl FnOnce(&mut T)) -> Option<T> {
        self.mutate(|rows| {
            rows.get_mut(key).map(|row| {
                f(row);
                row.clone()
            })
        })
        .await
    }

    pub async fn remove(&self, key: &T::Key) -> Option<T> {
        self.mutate(|rows| rows.remove(key)).await
    }
}

impl<T: Record> Default for MemoryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
