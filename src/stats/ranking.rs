use super::{RankEntry, SortOrder};

/// Orders entries by value and, unless `include_all` is set, keeps the first
/// `top_n`. The sort is stable, so equal values keep their discovery order in
/// both directions.
pub fn finalize(
    mut entries: Vec<RankEntry>,
    sort_order: SortOrder,
    top_n: usize,
    include_all: bool,
) -> Vec<RankEntry> {
    match sort_order {
        SortOrder::Asc => entries.sort_by(|a, b| a.value.cmp(&b.value)),
        SortOrder::Desc => entries.sort_by(|a, b| b.value.cmp(&a.value)),
    }

    if !include_all {
        entries.truncate(top_n);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[RankEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn sample() -> Vec<RankEntry> {
        vec![
            RankEntry::new("a", 5),
            RankEntry::new("b", 9),
            RankEntry::new("c", 5),
            RankEntry::new("d", 1),
            RankEntry::new("e", 9),
        ]
    }

    #[test]
    fn descending_keeps_ties_in_discovery_order() {
        let ranked = finalize(sample(), SortOrder::Desc, 10, false);
        assert_eq!(names(&ranked), vec!["b", "e", "a", "c", "d"]);
    }

    #[test]
    fn ascending_keeps_ties_in_discovery_order() {
        let ranked = finalize(sample(), SortOrder::Asc, 10, false);
        assert_eq!(names(&ranked), vec!["d", "a", "c", "b", "e"]);
    }

    #[test]
    fn distinct_values_reverse_between_orders() {
        let distinct = vec![
            RankEntry::new("a", 3),
            RankEntry::new("b", 1),
            RankEntry::new("c", 2),
        ];
        let desc = finalize(distinct.clone(), SortOrder::Desc, 10, false);
        let mut asc = finalize(distinct, SortOrder::Asc, 10, false);
        asc.reverse();
        assert_eq!(desc, asc);
    }

    #[test]
    fn truncates_to_top_n() {
        let ranked = finalize(sample(), SortOrder::Desc, 2, false);
        assert_eq!(names(&ranked), vec!["b", "e"]);
    }

    #[test]
    fn include_all_ignores_top_n() {
        let all = finalize(sample(), SortOrder::Desc, 2, true);
        let full = finalize(sample(), SortOrder::Desc, sample().len(), false);
        assert_eq!(all, full);
    }

    #[test]
    fn zero_top_n_yields_nothing() {
        assert!(finalize(sample(), SortOrder::Asc, 0, false).is_empty());
    }
}
