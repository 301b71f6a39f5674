pub mod fuzzy;

pub use fuzzy::FuzzyNameMatcher;

use serde::Serialize;

use crate::core::{Record, SortKey};
use crate::index::{AvlIndex, Traversal};

/// 展示层的一次请求
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    /// 全量遍历
    All(Traversal),
    /// identifier 精确查找（至多一条）
    ById(String),
    /// name 精确查找（可能多条）
    ByName(String),
    /// name 模糊查找（按分数排序）
    FuzzyName(String),
}

impl Query {
    /// 搜索框语义：空串 → 中序全量；否则按当前字段精确查找
    pub fn from_search_term(term: &str, field: SortKey) -> Self {
        let term = term.trim();
        if term.is_empty() {
            return Query::All(Traversal::InOrder);
        }
        match field {
            SortKey::Id => Query::ById(term.to_string()),
            SortKey::Name => Query::ByName(term.to_string()),
        }
    }

    /// CLI `search`：`fuzzy` 只对非空姓名生效，空串仍回落到中序全量
    pub fn from_search(term: &str, field: SortKey, fuzzy: bool) -> Self {
        match Self::from_search_term(term, field) {
            Query::ByName(name) if fuzzy => Query::FuzzyName(name),
            q => q,
        }
    }

    pub fn run<'a>(&self, index: &'a AvlIndex) -> Vec<&'a Record> {
        match self {
            Query::All(order) => index.traverse(*order),
            Query::ById(id) => index.search_exact(id).into_iter().collect(),
            Query::ByName(name) => index.search_by_name(name),
            Query::FuzzyName(keyword) => FuzzyNameMatcher::new()
                .rank(keyword, index.in_order())
                .into_iter()
                .map(|(r, _)| r)
                .collect(),
        }
    }
}

/// 表格一行：姓名 / 学号 / 第一志愿 / 第二志愿
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub name: String,
    pub id: String,
    pub first_choice: String,
    pub second_choice: String,
}

impl DisplayRow {
    pub const HEADERS: [&'static str; 4] = ["Name", "Id", "First Choice", "Second Choice"];

    pub fn cells(&self) -> [&str; 4] {
        [&self.name, &self.id, &self.first_choice, &self.second_choice]
    }
}

impl From<&Record> for DisplayRow {
    fn from(r: &Record) -> Self {
        Self {
            name: r.name().to_string(),
            id: r.identifier().to_string(),
            first_choice: r.preference_one().to_string(),
            second_choice: r.preference_two().to_string(),
        }
    }
}

pub fn to_rows(records: &[&Record]) -> Vec<DisplayRow> {
    records.iter().map(|r| DisplayRow::from(*r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AvlIndex {
        AvlIndex::from_records(
            SortKey::Id,
            vec![
                Record::new("20", "Sari", "Riset", "Humas", None),
                Record::new("3", "Andi", "Humas", "", None),
                Record::new("11", "Sari", "Media", "Riset", None),
            ],
        )
    }

    #[test]
    fn empty_term_lists_everything_in_order() {
        let idx = sample();
        let q = Query::from_search_term("  ", SortKey::Id);
        assert_eq!(q, Query::All(Traversal::InOrder));
        let ids: Vec<_> = q.run(&idx).iter().map(|r| r.identifier()).collect();
        assert_eq!(ids, vec!["3", "11", "20"]);
    }

    #[test]
    fn id_term_returns_single_row() {
        let idx = sample();
        let rows = to_rows(&Query::from_search_term("11", SortKey::Id).run(&idx));
        assert_eq!(
            rows,
            vec![DisplayRow {
                name: "Sari".into(),
                id: "11".into(),
                first_choice: "Media".into(),
                second_choice: "Riset".into(),
            }]
        );
        assert!(Query::ById("99".into()).run(&idx).is_empty());
    }

    #[test]
    fn name_term_returns_every_match() {
        let idx = sample();
        let hits = Query::from_search_term("Sari", SortKey::Name).run(&idx);
        let ids: Vec<_> = hits.iter().map(|r| r.identifier()).collect();
        assert_eq!(ids, vec!["11", "20"]);
    }

    #[test]
    fn search_flags_map_to_queries() {
        assert_eq!(
            Query::from_search("", SortKey::Name, true),
            Query::All(Traversal::InOrder)
        );
        assert_eq!(
            Query::from_search(" Sari ", SortKey::Name, true),
            Query::FuzzyName("Sari".into())
        );
        assert_eq!(
            Query::from_search("11", SortKey::Id, true),
            Query::ById("11".into())
        );

        let idx = sample();
        assert_eq!(Query::from_search("", SortKey::Id, false).run(&idx).len(), 3);
    }

    #[test]
    fn fuzzy_name_finds_partial() {
        let idx = sample();
        let hits = Query::FuzzyName("and".into()).run(&idx);
        assert_eq!(hits.first().map(|r| r.name()), Some("Andi"));
    }

    #[test]
    fn row_cells_follow_header_order() {
        let r = Record::new("1", "Ani", "A", "B", None);
        let row = DisplayRow::from(&r);
        assert_eq!(row.cells(), ["Ani", "1", "A", "B"]);
    }
}
