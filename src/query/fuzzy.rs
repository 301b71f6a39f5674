use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::core::Record;

/// 姓名模糊匹配（skim 打分）
pub struct FuzzyNameMatcher {
    matcher: SkimMatcherV2,
}

impl FuzzyNameMatcher {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// 返回命中的记录，分数高者在前；同分保持输入顺序
    pub fn rank<'a>(&self, keyword: &str, records: Vec<&'a Record>) -> Vec<(&'a Record, i64)> {
        let mut results: Vec<(&Record, i64)> = records
            .into_iter()
            .filter_map(|r| self.matcher.fuzzy_match(r.name(), keyword).map(|s| (r, s)))
            .collect();
        results.sort_by_key(|k| std::cmp::Reverse(k.1));
        results
    }
}

impl Default for FuzzyNameMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_closer_names_first() {
        let a = Record::keyed("1", "Sri Wahyuni");
        let b = Record::keyed("2", "Siti Rahma");
        let c = Record::keyed("3", "Bambang");

        let hits = FuzzyNameMatcher::new().rank("siti", vec![&a, &b, &c]);
        assert_eq!(hits.first().map(|(r, _)| r.identifier()), Some("2"));
        assert!(hits.iter().all(|(r, _)| r.identifier() != "3"));
    }
}
