use crate::core::{Record, Table};
use std::cmp::Ordering;

/// Default number of rows in the most/least voted rankings.
pub const DEFAULT_K: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOrder {
    MostVoted,
    LeastVoted,
}

fn compare_votes(a: &Record, b: &Record, order: VoteOrder) -> Ordering {
    // Rows without a vote count sort last in either direction.
    match (a.votes, b.votes) {
        (Some(x), Some(y)) => match order {
            VoteOrder::MostVoted => y.cmp(&x),
            VoteOrder::LeastVoted => x.cmp(&y),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// First `k` rows of a stable sort by votes.
///
/// Ties keep their original relative order. A table with fewer than `k`
/// rows is returned whole (re-ordered).
pub fn rank_by_votes(table: &Table, k: usize, order: VoteOrder) -> Table {
    let mut ranked: Vec<&Record> = table.iter().collect();
    ranked.sort_by(|a, b| compare_votes(a, b, order));

    table.derive(ranked.into_iter().take(k).cloned().collect())
}

/// The `k` most voted rows, descending.
pub fn top_by_votes(table: &Table, k: usize) -> Table {
    rank_by_votes(table, k, VoteOrder::MostVoted)
}

/// The `k` least voted rows, ascending.
pub fn bottom_by_votes(table: &Table, k: usize) -> Table {
    rank_by_votes(table, k, VoteOrder::LeastVoted)
}
