use std::fmt;

use serde::Serialize;

use crate::core::SortKey;
use crate::index::{height_bound, AvlIndex};

/// 索引结构报告
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    pub sort_by: SortKey,
    pub records: usize,
    /// 被拒绝的重复插入次数
    pub duplicates_rejected: usize,
    pub height: u32,
    /// AVL 理论上界 ⌈1.44·log2(n+2)⌉
    pub height_bound: u32,
    /// 高度记账错误或失衡的节点数（应为 0）
    pub balance_violations: usize,
    pub root: Option<String>,
}

impl IndexReport {
    pub fn collect(index: &AvlIndex) -> Self {
        Self {
            sort_by: index.key(),
            records: index.len(),
            duplicates_rejected: index.rejected(),
            height: index.height(),
            height_bound: height_bound(index.len()),
            balance_violations: index.balance_violations(),
            root: index.root().map(|r| index.key().field(r).to_string()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.balance_violations == 0 && self.height <= self.height_bound
    }
}

impl fmt::Display for IndexReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════════════════╗")?;
        writeln!(f, "║           cv-index Structure Report              ║")?;
        writeln!(f, "╠══════════════════════════════════════════════════╣")?;
        writeln!(f, "║   sorted by:    {:>10}                       ║", self.sort_by.to_string())?;
        writeln!(f, "║   records:      {:>10}                       ║", self.records)?;
        writeln!(
            f,
            "║   duplicates:   {:>10}                       ║",
            self.duplicates_rejected
        )?;
        writeln!(f, "╠──────────────────────────────────────────────────╣")?;
        writeln!(
            f,
            "║   height:       {:>10}  (bound {:>4})          ║",
            self.height, self.height_bound
        )?;
        writeln!(
            f,
            "║   violations:   {:>10}                       ║",
            self.balance_violations
        )?;
        writeln!(
            f,
            "║   root:         {:>10}                       ║",
            self.root.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "╚══════════════════════════════════════════════════╝")?;
        Ok(())
    }
}
