use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// 一份简历记录（构造后不可变）
///
/// 字段不做任何校验：空串照单全收，校验是抽取层的责任。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    identifier: String,
    name: String,
    preference_one: String,
    preference_two: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<PathBuf>,
}

impl Record {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        preference_one: impl Into<String>,
        preference_two: impl Into<String>,
        source: Option<PathBuf>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            preference_one: preference_one.into(),
            preference_two: preference_two.into(),
            source,
        }
    }

    /// 仅含排序键的轻量记录（测试 fixture / 比较器探针）
    pub fn keyed(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(identifier, name, "", "", None)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preference_one(&self) -> &str {
        &self.preference_one
    }

    pub fn preference_two(&self) -> &str {
        &self.preference_two
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// 树的排序键：建树时选定，整棵树生命周期内不变
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Name,
}

impl SortKey {
    /// 取出记录上参与比较的字段
    pub fn field<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            SortKey::Id => record.identifier(),
            SortKey::Name => record.name(),
        }
    }

    /// 记录间全序
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        self.compare_value(self.field(a), b)
    }

    /// 查询值与记录字段比较（用于下探查找）
    pub fn compare_value(&self, value: &str, record: &Record) -> Ordering {
        match self {
            SortKey::Id => compare_identifiers(value, record.identifier()),
            SortKey::Name => value.cmp(record.name()),
        }
    }
}

/// identifier 全序：纯数字串按数值排在前面，其余按字节序排在后面。
///
/// 数值相等时（前导零不同）短串在前（"7" < "07" < "007"），保证 Equal 当且仅当两串相同。
pub fn compare_identifiers(a: &str, b: &str) -> Ordering {
    fn is_numeric(s: &str) -> bool {
        s.bytes().all(|c| c.is_ascii_digit())
    }

    match (is_numeric(a), is_numeric(b)) {
        (true, true) => {
            let ta = a.trim_start_matches('0');
            let tb = b.trim_start_matches('0');
            ta.len()
                .cmp(&tb.len())
                .then_with(|| ta.cmp(tb))
                .then_with(|| a.len().cmp(&b.len()))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Id => write!(f, "id"),
            SortKey::Name => write!(f, "name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_leaves_preferences_empty() {
        let r = Record::keyed("42", "Budi");
        assert_eq!(r.identifier(), "42");
        assert_eq!(r.name(), "Budi");
        assert_eq!(r.preference_one(), "");
        assert_eq!(r.preference_two(), "");
        assert!(r.source().is_none());
    }

    #[test]
    fn sort_key_selects_field() {
        let a = Record::keyed("2", "Ani");
        let b = Record::keyed("1", "Budi");
        assert_eq!(SortKey::Id.compare(&a, &b), Ordering::Greater);
        assert_eq!(SortKey::Name.compare(&a, &b), Ordering::Less);
        assert_eq!(SortKey::Name.compare_value("Budi", &b), Ordering::Equal);
    }

    #[test]
    fn empty_fields_are_accepted() {
        let a = Record::keyed("", "");
        let b = Record::keyed("1", "");
        assert_eq!(SortKey::Id.compare(&a, &b), Ordering::Less);
        assert_eq!(SortKey::Name.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn identifiers_order_numerically() {
        assert_eq!(compare_identifiers("5", "10"), Ordering::Less);
        assert_eq!(compare_identifiers("20", "15"), Ordering::Greater);
        assert_eq!(compare_identifiers("007", "7"), Ordering::Greater);
        assert_eq!(compare_identifiers("07", "007"), Ordering::Less);
        assert_eq!(compare_identifiers("", "0"), Ordering::Less);
        assert_eq!(compare_identifiers("7", "7"), Ordering::Equal);
        // 非数字串整体排在数字串之后
        assert_eq!(compare_identifiers("999", "A1"), Ordering::Less);
        assert_eq!(compare_identifiers("A1", "B0"), Ordering::Less);
    }
}
