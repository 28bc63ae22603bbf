//! Chapter Context - 章节顺序维护
//!
//! 章节顺序是从 1 开始的连续整数序列，由过程式维护：
//! - 新建章节追加到 max(order) + 1
//! - 删除章节后剩余章节重新编号为 1..N
//! - 重排按给定 ID 列表的位置编号

use std::collections::HashMap;

use super::Chapter;
use crate::domain::novel::ChapterId;

/// 下一个章节序号（无章节时为 1）
pub fn next_order(orders: impl IntoIterator<Item = u32>) -> u32 {
    orders.into_iter().max().unwrap_or(0) + 1
}

/// 将同一小说的章节按原顺序重新编号为 1..N
///
/// 返回序号发生变化的章节 ID
pub fn resequence(chapters: &mut [Chapter]) -> Vec<ChapterId> {
    chapters.sort_by_key(|c| c.order);

    let mut changed = Vec::new();
    for (position, chapter) in chapters.iter_mut().enumerate() {
        let order = position as u32 + 1;
        if chapter.order != order {
            chapter.order = order;
            changed.push(chapter.id.clone());
        }
    }
    changed
}

/// 重排结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderOutcome {
    /// 序号被改写的章节
    pub updated: Vec<ChapterId>,
    /// 该小说中未出现在列表里的章节数（保持原序号）
    pub omitted: usize,
    /// 列表中不属于该小说的 ID 数
    pub unknown: usize,
}

/// ID 在列表中的 1-based 位置；重复 ID 取第一次出现的位置
pub fn positions(ordered_ids: &[ChapterId]) -> HashMap<&ChapterId, u32> {
    let mut positions = HashMap::with_capacity(ordered_ids.len());
    for (index, id) in ordered_ids.iter().enumerate() {
        positions.entry(id).or_insert(index as u32 + 1);
    }
    positions
}

/// 按列表位置改写同一小说的章节序号
///
/// 未出现在列表中的章节保持原值
pub fn apply_reorder(chapters: &mut [Chapter], ordered_ids: &[ChapterId]) -> ReorderOutcome {
    let positions = positions(ordered_ids);
    let mut outcome = ReorderOutcome::default();

    for chapter in chapters.iter_mut() {
        match positions.get(&chapter.id) {
            Some(&order) => {
                if chapter.order != order {
                    chapter.order = order;
                    outcome.updated.push(chapter.id.clone());
                }
            }
            None => outcome.omitted += 1,
        }
    }

    outcome.unknown = positions
        .keys()
        .filter(|&&id| !chapters.iter().any(|c| &c.id == id))
        .count();
    outcome
}

/// 前一章 / 后一章：序号等于 current - 1 / current + 1 的章节
pub fn neighbors(chapters: &[Chapter], current_order: u32) -> (Option<&Chapter>, Option<&Chapter>) {
    let previous = current_order
        .checked_sub(1)
        .and_then(|order| chapters.iter().find(|c| c.order == order));
    let next = chapters.iter().find(|c| c.order == current_order + 1);
    (previous, next)
}
