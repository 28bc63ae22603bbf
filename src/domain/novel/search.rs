//! Novel Context - 搜索过滤

use super::{GenreId, Novel};

/// 小说搜索条件
///
/// 关键字为空且题材为空时不做任何过滤
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NovelFilter {
    pub query: String,
    pub genre_ids: Vec<GenreId>,
}

impl NovelFilter {
    pub fn new(query: impl Into<String>, genre_ids: Vec<GenreId>) -> Self {
        Self {
            query: query.into(),
            genre_ids,
        }
    }

    /// 去除首尾空白后的关键字
    pub fn query(&self) -> &str {
        self.query.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.query().is_empty() && self.genre_ids.is_empty()
    }

    /// (关键字为空 或 标题/简介包含关键字) 且 (题材为空 或 包含全部题材)
    pub fn matches(&self, novel: &Novel) -> bool {
        let matches_query = self.query().is_empty() || novel.mentions(self.query());
        let matches_genres = self.genre_ids.is_empty() || novel.has_all_genres(&self.genre_ids);
        matches_query && matches_genres
    }

    /// 仅按题材过滤（远程模式下关键字已由服务端过滤）
    pub fn matches_genres(&self, novel: &Novel) -> bool {
        novel.has_all_genres(&self.genre_ids)
    }

    pub fn apply(&self, novels: Vec<Novel>) -> Vec<Novel> {
        if self.is_empty() {
            return novels;
        }
        novels.into_iter().filter(|n| self.matches(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::{Genre, NovelDraft};

    fn novel(title: &str, genres: Vec<Genre>) -> Novel {
        Novel::new(
            &NovelDraft {
                title: title.to_string(),
                description: format!("{} description", title),
                image_url: String::new(),
                genres: vec![],
            },
            genres,
        )
    }

    fn fantasy() -> Genre {
        Genre::with_id("fantasy", "Fantasy")
    }

    fn horror() -> Genre {
        Genre::with_id("horror", "Horror")
    }

    fn catalogue() -> Vec<Novel> {
        vec![
            novel("Alpha", vec![fantasy()]),
            novel("Beta", vec![fantasy(), horror()]),
        ]
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let novels = catalogue();
        let result = NovelFilter::default().apply(novels.clone());
        assert_eq!(result, novels);
    }

    #[test]
    fn test_genre_filter_is_intersection() {
        let filter = NovelFilter::new("", vec!["fantasy".into(), "horror".into()]);
        let result = filter.apply(catalogue());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Beta");
    }

    #[test]
    fn test_single_genre_matches_both() {
        let filter = NovelFilter::new("", vec!["fantasy".into()]);
        assert_eq!(filter.apply(catalogue()).len(), 2);
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let filter = NovelFilter::new("alpha", vec![]);
        let result = filter.apply(catalogue());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Alpha");
    }

    #[test]
    fn test_query_and_genres_combined() {
        let filter = NovelFilter::new("alpha", vec!["horror".into()]);
        assert!(filter.apply(catalogue()).is_empty());
    }
}
