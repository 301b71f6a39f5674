use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::core::{Record, SortKey};
use crate::index::avl::AvlIndex;

/// 多读者共享的索引句柄：重建 + 原子切换
///
/// ## 契约
/// - AvlIndex 本身是单写者结构，这里从不原地修改已发布的树。
/// - 重建在写者门闩下串行进行；新树完整构建后才 `store`，读者只会看到完整的树。
/// - `load()` 拿到的 `Arc<AvlIndex>` 是快照，后续重建不影响它。
pub struct SharedIndex {
    current: ArcSwap<AvlIndex>,
    rebuild_gate: Mutex<()>,
}

impl SharedIndex {
    pub fn new(index: AvlIndex) -> Self {
        Self {
            current: ArcSwap::from_pointee(index),
            rebuild_gate: Mutex::new(()),
        }
    }

    pub fn empty(key: SortKey) -> Self {
        Self::new(AvlIndex::new(key))
    }

    /// 读者快照
    pub fn load(&self) -> Arc<AvlIndex> {
        self.current.load_full()
    }

    /// 用给定记录和排序键重建，完成后原子发布
    pub fn rebuild(&self, key: SortKey, records: impl IntoIterator<Item = Record>) -> Arc<AvlIndex> {
        let _gate = self.rebuild_gate.lock();
        let started = Instant::now();

        let next = Arc::new(AvlIndex::from_records(key, records));
        self.current.store(next.clone());

        tracing::info!(
            "Index rebuilt by {}: {} records, height {}, {} duplicates rejected ({:?})",
            key,
            next.len(),
            next.height(),
            next.rejected(),
            started.elapsed()
        );
        next
    }

    /// 换排序键：从当前快照取出记录重建
    pub fn rekey(&self, key: SortKey) -> Arc<AvlIndex> {
        let snapshot = self.load();
        if snapshot.key() == key {
            return snapshot;
        }
        let records: Vec<Record> = snapshot.pre_order().into_iter().cloned().collect();
        self.rebuild(key, records)
    }
}
