//! Leaf bucket chain view / 叶子桶链视图

use crate::{BTree, NodeId};

/// Borrowed view of one leaf bucket
/// 单个叶子桶的借用视图
pub struct Bucket<'a, K, V> {
  tree: &'a BTree<K, V>,
  id: NodeId,
}

impl<K, V> Clone for Bucket<'_, K, V> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<K, V> Copy for Bucket<'_, K, V> {}

impl<'a, K: Ord + Clone, V> Bucket<'a, K, V> {
  pub(crate) fn new(tree: &'a BTree<K, V>, id: NodeId) -> Self {
    Self { tree, id }
  }

  #[inline]
  pub fn id(&self) -> NodeId {
    self.id
  }

  /// Entry count / 条目数
  #[inline]
  pub fn size(&self) -> usize {
    self.tree.leaf_at(self.id).keys.len()
  }

  #[inline]
  pub fn keys(&self) -> &'a [K] {
    &self.tree.leaf_at(self.id).keys
  }

  #[inline]
  pub fn vals(&self) -> &'a [V] {
    &self.tree.leaf_at(self.id).vals
  }

  /// Next bucket in key order, `None` at the end of the chain
  /// 键序中的下一个桶，链尾返回 `None`
  #[inline]
  pub fn next(&self) -> Option<Self> {
    self
      .tree
      .leaf_at(self.id)
      .next
      .map(|id| Self::new(self.tree, id))
  }

  /// Previous bucket / 上一个桶
  #[inline]
  pub fn prev(&self) -> Option<Self> {
    self
      .tree
      .leaf_at(self.id)
      .prev
      .map(|id| Self::new(self.tree, id))
  }
}

/// Iterator over the bucket chain / 桶链迭代器
pub struct Buckets<'a, K, V> {
  cur: Option<Bucket<'a, K, V>>,
}

impl<'a, K, V> Buckets<'a, K, V> {
  pub(crate) fn new(first: Bucket<'a, K, V>) -> Self {
    Self { cur: Some(first) }
  }
}

impl<'a, K: Ord + Clone, V> Iterator for Buckets<'a, K, V> {
  type Item = Bucket<'a, K, V>;

  fn next(&mut self) -> Option<Self::Item> {
    let cur = self.cur?;
    self.cur = cur.next();
    Some(cur)
  }
}
