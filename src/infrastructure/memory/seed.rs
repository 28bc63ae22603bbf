//! Mock Store 种子数据
//!
//! 本地开发时使用的示例目录

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::chapter::Chapter;
use crate::domain::novel::{Genre, Novel};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// 示例题材
pub fn genres() -> Vec<Genre> {
    vec![
        Genre::with_id("1", "Fantasy"),
        Genre::with_id("2", "Science Fiction"),
        Genre::with_id("3", "Romance"),
        Genre::with_id("4", "Mystery"),
        Genre::with_id("5", "Horror"),
        Genre::with_id("6", "Adventure"),
        Genre::with_id("7", "Historical"),
    ]
}

fn genre(id: &str) -> Genre {
    genres()
        .into_iter()
        .find(|g| g.id.as_str() == id)
        .unwrap_or_else(|| Genre::with_id(id, id))
}

fn novel(
    id: &str,
    title: &str,
    description: &str,
    image_url: &str,
    genre_ids: &[&str],
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Novel {
    Novel {
        id: id.into(),
        title: title.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        genres: genre_ids.iter().map(|id| genre(id)).collect(),
        created_at,
        updated_at,
    }
}

/// 示例小说
pub fn novels() -> Vec<Novel> {
    vec![
        novel(
            "1",
            "The Crystal Kingdom",
            "A young mage discovers her powers in a world where magic is forbidden.",
            "https://images.unsplash.com/photo-1518744386442-2d48ac47a7eb",
            &["1", "6"],
            date(2023, 6, 12),
            date(2023, 7, 14),
        ),
        novel(
            "2",
            "Starship Odyssey",
            "The last survivors of Earth embark on a journey to find a new home.",
            "https://images.unsplash.com/photo-1501862700950-18382cd41497",
            &["2", "6"],
            date(2023, 4, 22),
            date(2023, 5, 30),
        ),
        novel(
            "3",
            "Midnight Detective",
            "A detective with unusual methods solves crimes in a corrupt city.",
            "https://images.unsplash.com/photo-1509347528160-9a9e33742cdb",
            &["4"],
            date(2023, 2, 5),
            date(2023, 3, 15),
        ),
        novel(
            "4",
            "Love in Paris",
            "Two strangers meet in Paris and their lives are changed forever.",
            "https://images.unsplash.com/photo-1502602898657-3e91760cbb34",
            &["3", "7"],
            date(2023, 8, 19),
            date(2023, 9, 2),
        ),
    ]
}

fn chapter(id: &str, novel_id: &str, title: &str, content: &str, order: u32, at: DateTime<Utc>) -> Chapter {
    Chapter {
        id: id.into(),
        novel_id: novel_id.into(),
        title: title.to_string(),
        content: content.to_string(),
        order,
        created_at: at,
        updated_at: at,
    }
}

/// 示例章节
pub fn chapters() -> Vec<Chapter> {
    vec![
        chapter(
            "1",
            "1",
            "The Beginning",
            "In a world where magic flowed like water, young Elara discovered her powers at the age of twelve. \
             It was during the Festival of Lights, when the entire village gathered to celebrate the annual return \
             of the glowing crystal butterflies.",
            1,
            date(2023, 6, 12),
        ),
        chapter(
            "2",
            "1",
            "The Discovery",
            "\"You must hide this gift,\" the elder whispered urgently, pulling Elara away from the crowd. \
             \"Magic has been forbidden in the kingdom for decades.\" That night, Elara learned the dark history \
             of her homeland.",
            2,
            date(2023, 6, 15),
        ),
        chapter(
            "3",
            "1",
            "The Training",
            "For months, Elara met with the elder, whose name she learned was Thorne, in a hidden cave beneath \
             the ancient oak tree at the edge of the village. The training was grueling.",
            3,
            date(2023, 6, 20),
        ),
        chapter(
            "4",
            "2",
            "Launch Day",
            "The countdown echoed through the massive launch facility, each number bringing humanity closer to \
             its most desperate gamble. Captain Sarah Chen stood on the bridge of the Starship Odyssey.",
            1,
            date(2023, 4, 22),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_seed_chapter_orders_are_dense() {
        let mut by_novel: HashMap<String, Vec<u32>> = HashMap::new();
        for chapter in chapters() {
            by_novel
                .entry(chapter.novel_id.to_string())
                .or_default()
                .push(chapter.order);
        }
        for orders in by_novel.values_mut() {
            orders.sort();
            let expected: Vec<u32> = (1..=orders.len() as u32).collect();
            assert_eq!(*orders, expected);
        }
    }

    #[test]
    fn test_seed_novels_reference_known_genres() {
        let known = genres();
        for novel in novels() {
            for genre in &novel.genres {
                assert!(known.contains(genre));
            }
        }
    }
}
