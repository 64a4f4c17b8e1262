//! B+ Tree implementation / B+ 树实现
//!
//! Nodes live in an arena and never move, so a `NodeId` stays valid for the
//! life of the tree. Leaves form a doubly linked bucket chain in key order.
//! 节点存放于内存池且不会移动，叶子按键序组成双向桶链。

use crate::{
  Bucket, Buckets, Conf, Error, ParsedConf, Result,
  node::{Internal, Leaf, Node, NodeId},
};

/// B+ Tree / B+ 树
#[derive(Debug, Clone)]
pub struct BTree<K, V> {
  nodes: Vec<Node<K, V>>,
  root: NodeId,
  first: NodeId,
  len: usize,
  height: usize,
  conf: ParsedConf,
}

impl<K: Ord + Clone, V> Default for BTree<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K: Ord + Clone, V> BTree<K, V> {
  /// Create empty tree with default capacity / 使用默认容量创建空树
  pub fn new() -> Self {
    Self::with_conf(&[])
  }

  /// Create empty tree with custom capacity / 使用自定义容量创建空树
  pub fn with_conf(conf: &[Conf]) -> Self {
    Self {
      nodes: vec![Node::Leaf(Leaf::default())],
      root: 0,
      first: 0,
      len: 0,
      height: 1,
      conf: ParsedConf::new(conf),
    }
  }

  /// Capacity in effect / 生效的容量配置
  #[inline]
  pub fn conf(&self) -> ParsedConf {
    self.conf
  }

  /// Entry count / 条目数
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Levels from root to leaves, a lone root leaf is height 1
  /// 从根到叶子的层数，仅有根叶子时为 1
  #[inline]
  pub fn height(&self) -> usize {
    self.height
  }

  /// Root node id / 根节点 ID
  #[inline]
  pub fn root(&self) -> NodeId {
    self.root
  }

  /// Total node slots, ids are `0..node_count()` / 节点总数
  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Read node by id / 按 ID 读取节点
  pub fn node(&self, id: NodeId) -> Result<&Node<K, V>> {
    self.nodes.get(id as usize).ok_or(Error::NoNode(id))
  }

  /// Read leaf by id / 按 ID 读取叶子
  pub fn leaf(&self, id: NodeId) -> Result<&Leaf<K, V>> {
    match self.node(id)? {
      Node::Leaf(n) => Ok(n),
      Node::Internal(_) => Err(Error::NotLeaf(id)),
    }
  }

  /// Get value for key / 获取 key 对应的值
  pub fn get(&self, key: &K) -> Option<&V> {
    let mut id = self.root;
    loop {
      match &self.nodes[id as usize] {
        Node::Internal(n) => id = n.children[n.find_child(key)],
        Node::Leaf(n) => {
          return n.keys.binary_search(key).ok().map(|i| &n.vals[i]);
        }
      }
    }
  }

  /// Insert key-value, return old value on overwrite
  /// 插入键值，覆盖时返回旧值
  pub fn put(&mut self, key: K, val: V) -> Option<V> {
    // Descend, remembering (node, child index) / 下降并记录路径
    let mut path: Vec<(NodeId, usize)> = Vec::with_capacity(self.height);
    let mut id = self.root;
    while let Node::Internal(n) = &self.nodes[id as usize] {
      let idx = n.find_child(&key);
      path.push((id, idx));
      id = n.children[idx];
    }

    let max_leaf = self.conf.max_leaf;
    let leaf = self.leaf_mut(id);
    if let Some(old) = leaf.insert(key, val) {
      return Some(old);
    }
    let full = leaf.size() > max_leaf;
    self.len += 1;
    if !full {
      return None;
    }

    // Split leaf and relink chain / 分裂叶子并重连桶链
    let right_id = self.nodes.len() as NodeId;
    let leaf = self.leaf_mut(id);
    let (mut up_key, mut right) = leaf.split();
    leaf.next = Some(right_id);
    right.prev = Some(id);
    let after = right.next;
    self.nodes.push(Node::Leaf(right));
    if let Some(after) = after {
      self.leaf_mut(after).prev = Some(right_id);
    }

    // Propagate upward / 向上传播
    let max_internal = self.conf.max_internal;
    let mut new_child = right_id;
    while let Some((parent, idx)) = path.pop() {
      let n = self.internal_mut(parent);
      n.keys.insert(idx, up_key);
      n.children.insert(idx + 1, new_child);
      if n.children.len() <= max_internal {
        return None;
      }
      let (key, right) = n.split();
      up_key = key;
      new_child = self.alloc(Node::Internal(right));
    }

    // Root split / 根分裂
    let old_root = self.root;
    self.root = self.alloc(Node::Internal(Internal {
      keys: vec![up_key],
      children: vec![old_root, new_child],
    }));
    self.height += 1;
    None
  }

  /// Bulk update, return count of new keys
  /// 批量更新，返回新增键数
  pub fn update<I: IntoIterator<Item = (K, V)>>(&mut self, items: I) -> usize {
    let before = self.len;
    for (k, v) in items {
      self.put(k, v);
    }
    self.len - before
  }

  /// Ordered iteration over the bucket chain / 沿桶链有序遍历
  pub fn iter(&self) -> Iter<'_, K, V> {
    Iter {
      tree: self,
      leaf: Some(self.first),
      pos: 0,
    }
  }

  /// Leftmost bucket / 最左侧的桶
  pub fn first_bucket(&self) -> Bucket<'_, K, V> {
    Bucket::new(self, self.first)
  }

  /// All buckets in key order / 按键序的所有桶
  pub fn buckets(&self) -> Buckets<'_, K, V> {
    Buckets::new(self.first_bucket())
  }

  /// Number of leaf buckets / 叶子桶数量
  pub fn bucket_count(&self) -> usize {
    self.buckets().count()
  }

  pub(crate) fn leaf_at(&self, id: NodeId) -> &Leaf<K, V> {
    match &self.nodes[id as usize] {
      Node::Leaf(n) => n,
      Node::Internal(_) => unreachable!("bucket chain points at internal node {id}"),
    }
  }

  fn leaf_mut(&mut self, id: NodeId) -> &mut Leaf<K, V> {
    match &mut self.nodes[id as usize] {
      Node::Leaf(n) => n,
      Node::Internal(_) => unreachable!("descent ended at internal node {id}"),
    }
  }

  fn internal_mut(&mut self, id: NodeId) -> &mut Internal<K> {
    match &mut self.nodes[id as usize] {
      Node::Internal(n) => n,
      Node::Leaf(_) => unreachable!("path holds leaf {id}"),
    }
  }

  fn alloc(&mut self, node: Node<K, V>) -> NodeId {
    let id = self.nodes.len() as NodeId;
    self.nodes.push(node);
    id
  }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for BTree<K, V> {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut tree = Self::new();
    tree.update(iter);
    tree
  }
}

/// Ordered iterator / 有序迭代器
pub struct Iter<'a, K, V> {
  tree: &'a BTree<K, V>,
  leaf: Option<NodeId>,
  pos: usize,
}

impl<'a, K: Ord + Clone, V> Iterator for Iter<'a, K, V> {
  type Item = (&'a K, &'a V);

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let id = self.leaf?;
      let tree = self.tree;
      let leaf = tree.leaf_at(id);
      if self.pos < leaf.keys.len() {
        let i = self.pos;
        self.pos += 1;
        return Some((&leaf.keys[i], &leaf.vals[i]));
      }
      self.leaf = leaf.next;
      self.pos = 0;
    }
  }
}

impl<'a, K: Ord + Clone, V> IntoIterator for &'a BTree<K, V> {
  type Item = (&'a K, &'a V);
  type IntoIter = Iter<'a, K, V>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
