//! Derivation of the visible page.

use super::{PaginationWindow, SearchPredicate};
use crate::record::Record;

/// One page of filtered records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// Records on this page, in snapshot order.
    pub records: Vec<&'a Record>,
    /// Page index actually shown.
    pub page: usize,
    pub page_size: usize,
    /// Records matching the predicate across all pages.
    pub total_matches: usize,
    pub page_count: usize,
}

impl<'a> Page<'a> {
    /// A page with nothing on it.
    pub fn empty(window: &PaginationWindow) -> Self {
        Self {
            records: Vec::new(),
            page: 0,
            page_size: window.page_size(),
            total_matches: 0,
            page_count: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Row number of the first record, counting from 1 across pages.
    pub fn first_row_number(&self) -> usize {
        self.page * self.page_size + 1
    }

    /// `(row number, record)` pairs, numbered consecutively across pages.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &'a Record)> + '_ {
        let first = self.first_row_number();
        self.records
            .iter()
            .enumerate()
            .map(move |(index, record)| (first + index, *record))
    }
}

/// Filter `snapshot` by `predicate`, then cut out the window.
///
/// Pure: the result depends only on the three inputs.
pub fn visible_page<'a>(
    snapshot: &'a [Record],
    predicate: &SearchPredicate,
    window: &PaginationWindow,
) -> Page<'a> {
    let matching: Vec<&'a Record> = snapshot.iter().filter(|r| predicate.matches(r)).collect();
    let total_matches = matching.len();
    let range = window.range(total_matches);

    Page {
        records: matching[range].to_vec(),
        page: window.effective_page(total_matches),
        page_size: window.page_size(),
        total_matches,
        page_count: window.page_count(total_matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn posts(titles: &[&str]) -> Vec<Record> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| Record::new(json!({"id": i + 1, "title": title})).unwrap())
            .collect()
    }

    #[test]
    fn filters_then_windows() {
        let snapshot = posts(&["alpha", "beta", "alphabet", "gamma", "ALPHA omega"]);
        let mut predicate = SearchPredicate::new("title");
        predicate.set("alpha");
        let mut window = PaginationWindow::new(2).unwrap();

        let first = visible_page(&snapshot, &predicate, &window);
        assert_eq!(first.total_matches, 3);
        assert_eq!(first.page_count, 2);
        let ids: Vec<u64> = first.records.iter().map(|r| r.id().unwrap().get()).collect();
        assert_eq!(ids, vec![1, 3]);

        window.set_page(1, first.total_matches);
        let second = visible_page(&snapshot, &predicate, &window);
        let rows: Vec<(usize, u64)> = second
            .rows()
            .map(|(n, r)| (n, r.id().unwrap().get()))
            .collect();
        assert_eq!(rows, vec![(3, 5)]);
    }

    #[test]
    fn stale_page_index_is_clamped_on_derivation() {
        let snapshot = posts(&["a", "b", "c"]);
        let predicate = SearchPredicate::new("title");
        let mut window = PaginationWindow::new(1).unwrap();
        window.set_page(2, 3);

        let page = visible_page(&snapshot[..1], &predicate, &window);
        assert_eq!(page.page, 0);
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn empty_snapshot_gives_empty_first_page() {
        let page = visible_page(
            &[],
            &SearchPredicate::new("title"),
            &PaginationWindow::default(),
        );
        assert!(page.is_empty());
        assert_eq!(page.page, 0);
        assert_eq!(page.page_count, 1);
    }

    fn arb_snapshot() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec("[a-cA-C ]{0,6}", 0..40).prop_map(|titles| {
            titles
                .into_iter()
                .enumerate()
                .map(|(i, title)| Record::new(json!({"id": i + 1, "title": title})).unwrap())
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn page_is_bounded_ordered_subsequence_of_matches(
            snapshot in arb_snapshot(),
            needle in "[a-cA-C]{0,2}",
            page_size in 1usize..8,
            page in 0usize..12,
        ) {
            let mut predicate = SearchPredicate::new("title");
            predicate.set(needle);
            let mut window = PaginationWindow::new(page_size).unwrap();
            window.set_page(page, snapshot.len());

            let result = visible_page(&snapshot, &predicate, &window);

            prop_assert!(result.len() <= page_size);
            prop_assert!(result.records.iter().all(|r| predicate.matches(r)));

            // Subsequence of the snapshot: identifiers strictly increase.
            let ids: Vec<u64> = result.records.iter().map(|r| r.id().unwrap().get()).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));

            // Same call, same answer.
            prop_assert_eq!(result.clone(), visible_page(&snapshot, &predicate, &window));
        }
    }
}
