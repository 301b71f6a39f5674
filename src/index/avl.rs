use std::cmp::Ordering;

use crate::core::{Record, SortKey};

/// 遍历顺序
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Traversal {
    /// 左 → 自身 → 右（按排序键升序）
    #[default]
    #[value(name = "in")]
    InOrder,
    /// 自身 → 左 → 右
    #[value(name = "pre")]
    PreOrder,
    /// 左 → 右 → 自身
    #[value(name = "post")]
    PostOrder,
}

struct Node {
    record: Record,
    height: u32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(record: Record) -> Box<Self> {
        Box::new(Self {
            record,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance(&self) -> i64 {
        height(&self.left) as i64 - height(&self.right) as i64
    }
}

fn height(node: &Option<Box<Node>>) -> u32 {
    node.as_ref().map_or(0, |n| n.height)
}

/// 右旋：y 的左孩子 x 上提为子树根，x 的右子树挂到 y 左侧。
/// 只重算 y、x 两个节点的高度，祖先链由递归回溯负责。
fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// 左旋：与右旋镜像
fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// 递归插入，返回（新的子树根，是否真正插入）
///
/// `probe` 是新记录的排序字段，记录本身在落到叶子时被移走，
/// 回溯阶段用它判定 LL / LR / RR / RL 四种失衡形态。
fn insert_at(
    slot: Option<Box<Node>>,
    record: Record,
    probe: &str,
    key: SortKey,
) -> (Box<Node>, bool) {
    let mut node = match slot {
        Some(node) => node,
        None => return (Node::leaf(record), true),
    };

    let inserted = match key.compare_value(probe, &node.record) {
        Ordering::Less => {
            let (child, inserted) = insert_at(node.left.take(), record, probe, key);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert_at(node.right.take(), record, probe, key);
            node.right = Some(child);
            inserted
        }
        // 重复键：保留先到者，新记录直接丢弃
        Ordering::Equal => return (node, false),
    };

    if !inserted {
        return (node, false);
    }

    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        let dir = node
            .left
            .as_ref()
            .map(|l| key.compare_value(probe, &l.record));
        match dir {
            // Left-Left
            Some(Ordering::Less) => return (rotate_right(node), true),
            // Left-Right
            Some(Ordering::Greater) => {
                node.left = node.left.take().map(rotate_left);
                return (rotate_right(node), true);
            }
            _ => {}
        }
    } else if balance < -1 {
        let dir = node
            .right
            .as_ref()
            .map(|r| key.compare_value(probe, &r.record));
        match dir {
            // Right-Right
            Some(Ordering::Greater) => return (rotate_left(node), true),
            // Right-Left
            Some(Ordering::Less) => {
                node.right = node.right.take().map(rotate_right);
                return (rotate_left(node), true);
            }
            _ => {}
        }
    }

    (node, true)
}

fn collect<'a>(node: &'a Option<Box<Node>>, order: Traversal, out: &mut Vec<&'a Record>) {
    let Some(n) = node else {
        return;
    };
    match order {
        Traversal::InOrder => {
            collect(&n.left, order, out);
            out.push(&n.record);
            collect(&n.right, order, out);
        }
        Traversal::PreOrder => {
            out.push(&n.record);
            collect(&n.left, order, out);
            collect(&n.right, order, out);
        }
        Traversal::PostOrder => {
            collect(&n.left, order, out);
            collect(&n.right, order, out);
            out.push(&n.record);
        }
    }
}

/// 校验子树：返回（真实高度，违规节点数）
fn audit(node: &Option<Box<Node>>) -> (u32, usize) {
    let Some(n) = node else {
        return (0, 0);
    };
    let (lh, lbad) = audit(&n.left);
    let (rh, rbad) = audit(&n.right);
    let h = 1 + lh.max(rh);
    let balance = lh as i64 - rh as i64;
    let bad = usize::from(n.height != h || !(-1..=1).contains(&balance));
    (h, lbad + rbad + bad)
}

/// AVL 高度上界：⌈1.44·log2(n+2)⌉
pub fn height_bound(n: usize) -> u32 {
    (1.44 * ((n + 2) as f64).log2()).ceil() as u32
}

/// AVL 平衡索引
///
/// ## 契约
/// - 排序键在构造时固定；换键 = 重建整棵树（见 [`AvlIndex::rebuild_with`]）。
/// - 同键重复插入被静默丢弃，先到者保留。
/// - 没有删除操作：索引只增不减。
pub struct AvlIndex {
    root: Option<Box<Node>>,
    key: SortKey,
    len: usize,
    rejected: usize,
}

impl AvlIndex {
    pub fn new(key: SortKey) -> Self {
        Self {
            root: None,
            key,
            len: 0,
            rejected: 0,
        }
    }

    pub fn from_records(key: SortKey, records: impl IntoIterator<Item = Record>) -> Self {
        let mut index = Self::new(key);
        index.extend(records);
        index
    }

    /// 插入一条记录；返回 false 表示同键已存在，新记录被丢弃
    pub fn insert(&mut self, record: Record) -> bool {
        let probe = self.key.field(&record).to_owned();
        let (root, inserted) = insert_at(self.root.take(), record, &probe, self.key);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        } else {
            self.rejected += 1;
            tracing::trace!("duplicate {} {:?} rejected", self.key, probe);
        }
        inserted
    }

    pub fn key(&self) -> SortKey {
        self.key
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// 被拒绝的重复插入次数
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    pub fn root(&self) -> Option<&Record> {
        self.root.as_ref().map(|n| &n.record)
    }

    /// 物化遍历结果（快照：长度恒等于 len）
    pub fn traverse(&self, order: Traversal) -> Vec<&Record> {
        let mut out = Vec::with_capacity(self.len);
        collect(&self.root, order, &mut out);
        out
    }

    pub fn in_order(&self) -> Vec<&Record> {
        self.traverse(Traversal::InOrder)
    }

    pub fn pre_order(&self) -> Vec<&Record> {
        self.traverse(Traversal::PreOrder)
    }

    pub fn post_order(&self) -> Vec<&Record> {
        self.traverse(Traversal::PostOrder)
    }

    /// 按 identifier 精确查找
    ///
    /// id 键树走 O(log n) 下探；name 键树的顺序与 identifier 无关，退化为线性扫描。
    pub fn search_exact(&self, identifier: &str) -> Option<&Record> {
        match self.key {
            SortKey::Id => self.descend(identifier),
            SortKey::Name => self
                .in_order()
                .into_iter()
                .find(|r| r.identifier() == identifier),
        }
    }

    /// 按 name 查找，返回全部匹配
    ///
    /// name 键树中 name 唯一，下探至多命中一条；id 键树中 name 可能重复，
    /// 全量扫描并按 identifier 升序返回。
    pub fn search_by_name(&self, name: &str) -> Vec<&Record> {
        match self.key {
            SortKey::Name => self.descend(name).into_iter().collect(),
            SortKey::Id => self
                .in_order()
                .into_iter()
                .filter(|r| r.name() == name)
                .collect(),
        }
    }

    /// 沿本树排序键做二叉下探
    fn descend(&self, value: &str) -> Option<&Record> {
        let mut cur = self.root.as_ref();
        while let Some(node) = cur {
            cur = match self.key.compare_value(value, &node.record) {
                Ordering::Less => node.left.as_ref(),
                Ordering::Greater => node.right.as_ref(),
                Ordering::Equal => return Some(&node.record),
            };
        }
        None
    }

    /// 用另一个排序键重建（原树不变）
    pub fn rebuild_with(&self, key: SortKey) -> AvlIndex {
        Self::from_records(key, self.pre_order().into_iter().cloned())
    }

    /// 高度记账错误或平衡因子越界的节点数；正常应恒为 0
    pub fn balance_violations(&self) -> usize {
        audit(&self.root).1
    }
}

impl Default for AvlIndex {
    fn default() -> Self {
        Self::new(SortKey::default())
    }
}

impl Extend<Record> for AvlIndex {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}
