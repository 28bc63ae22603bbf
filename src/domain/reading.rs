//! 阅读视图聚合
//!
//! 首页和详情页使用的只读组合：最新小说、每本小说的最新章节、分页

use serde::{Deserialize, Serialize};

use crate::domain::chapter::Chapter;
use crate::domain::novel::Novel;

/// 首页展示的最新小说数量
pub const LATEST_NOVELS_LIMIT: usize = 4;

/// 首页最新章节每页数量
pub const LATEST_CHAPTERS_PER_PAGE: usize = 8;

/// 详情页章节列表每页数量
pub const DETAIL_CHAPTERS_PER_PAGE: usize = 10;

/// 按 `updated_at` 倒序取前 `limit` 本
pub fn latest_novels(mut novels: Vec<Novel>, limit: usize) -> Vec<Novel> {
    novels.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    novels.truncate(limit);
    novels
}

/// `updated_at` 最大的章节
pub fn latest_chapter(chapters: Vec<Chapter>) -> Option<Chapter> {
    chapters.into_iter().max_by_key(|c| c.updated_at)
}

/// 最新章节及其所属小说
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterWithNovel {
    pub chapter: Chapter,
    pub novel: Novel,
}

/// 每本小说取一条最新章节，按章节 `updated_at` 倒序
///
/// 没有章节的小说被跳过
pub fn latest_chapters(pairs: Vec<(Novel, Vec<Chapter>)>) -> Vec<ChapterWithNovel> {
    let mut latest: Vec<ChapterWithNovel> = pairs
        .into_iter()
        .filter_map(|(novel, chapters)| {
            latest_chapter(chapters).map(|chapter| ChapterWithNovel { chapter, novel })
        })
        .collect();
    latest.sort_by(|a, b| b.chapter.updated_at.cmp(&a.chapter.updated_at));
    latest
}

/// 详情页章节排序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterSort {
    /// 最早创建的在前
    #[default]
    Oldest,
    /// 最新创建的在前
    Newest,
}

impl ChapterSort {
    pub fn apply(self, chapters: &mut [Chapter]) {
        match self {
            ChapterSort::Oldest => chapters.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            ChapterSort::Newest => chapters.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
    }
}

/// 分页结果（页码从 1 开始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// 取第 `page` 页；页码小于 1 按第 1 页处理，超出范围返回空页
    pub fn slice(items: Vec<T>, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page);

        let items = items
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chapter::ChapterDraft;
    use crate::domain::novel::NovelDraft;
    use chrono::{Duration, Utc};

    fn novel(title: &str, age_days: i64) -> Novel {
        let mut novel = Novel::new(
            &NovelDraft {
                title: title.to_string(),
                ..Default::default()
            },
            vec![],
        );
        novel.updated_at = Utc::now() - Duration::days(age_days);
        novel
    }

    fn chapter(novel: &Novel, title: &str, age_days: i64) -> Chapter {
        let mut chapter = Chapter::new(novel.id.clone(), &ChapterDraft::new(title, "text"), 1);
        chapter.updated_at = Utc::now() - Duration::days(age_days);
        chapter.created_at = chapter.updated_at;
        chapter
    }

    #[test]
    fn test_latest_novels_sorted_and_limited() {
        let novels = vec![
            novel("a", 5),
            novel("b", 1),
            novel("c", 3),
            novel("d", 4),
            novel("e", 2),
        ];
        let titles: Vec<String> = latest_novels(novels, LATEST_NOVELS_LIMIT)
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["b", "e", "c", "d"]);
    }

    #[test]
    fn test_latest_chapter_per_novel() {
        let alpha = novel("Alpha", 0);
        let beta = novel("Beta", 0);
        let empty = novel("Empty", 0);

        let pairs = vec![
            (
                alpha.clone(),
                vec![chapter(&alpha, "a1", 10), chapter(&alpha, "a2", 3)],
            ),
            (beta.clone(), vec![chapter(&beta, "b1", 1)]),
            (empty, vec![]),
        ];

        let latest = latest_chapters(pairs);
        let titles: Vec<&str> = latest.iter().map(|p| p.chapter.title.as_str()).collect();
        assert_eq!(titles, vec!["b1", "a2"]);
        assert_eq!(latest[1].novel.title, "Alpha");
    }

    #[test]
    fn test_page_slicing() {
        let items: Vec<u32> = (1..=17).collect();

        let first = Page::slice(items.clone(), 1, LATEST_CHAPTERS_PER_PAGE);
        assert_eq!(first.items, (1..=8).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous);
        assert!(first.has_next);

        let last = Page::slice(items.clone(), 3, LATEST_CHAPTERS_PER_PAGE);
        assert_eq!(last.items, vec![17]);
        assert!(!last.has_next);

        let beyond = Page::slice(items, 9, LATEST_CHAPTERS_PER_PAGE);
        assert!(beyond.items.is_empty());
    }

    #[test]
    fn test_huge_page_number_is_empty() {
        let page = Page::slice(vec![1, 2, 3], usize::MAX, LATEST_CHAPTERS_PER_PAGE);
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 3);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_page_json_carries_navigation_flags() {
        let page = Page::slice(vec![1, 2, 3], 2, 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"], serde_json::json!([3]));
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["hasPrevious"], true);
        assert_eq!(json["hasNext"], false);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u32> = Page::slice(vec![], 0, 8);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_chapter_sort() {
        let alpha = novel("Alpha", 0);
        let mut chapters = vec![chapter(&alpha, "new", 1), chapter(&alpha, "old", 9)];
        ChapterSort::Oldest.apply(&mut chapters);
        assert_eq!(chapters[0].title, "old");
        ChapterSort::Newest.apply(&mut chapters);
        assert_eq!(chapters[0].title, "new");
    }
}
