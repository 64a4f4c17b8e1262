// Index annotated with experiment metadata
// 带实验元数据的索引

use bts_bench_data::GenMethod;
use bts_tree::BTree;
use serde::{Deserialize, Serialize};

/// Experiment metadata of a built index / 已构建索引的实验元数据
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexMeta {
  pub id: u64,
  pub method: Option<GenMethod>,
  pub skew: Option<f64>,
  pub domain: Option<usize>,
  /// Derived from the tree / 由树推导
  pub len: usize,
  pub height: usize,
  pub buckets: usize,
  pub max_leaf: usize,
}

/// B+ tree plus its metadata / B+ 树及其元数据
#[derive(Debug, Clone)]
pub struct Index<K, V> {
  tree: BTree<K, V>,
  meta: IndexMeta,
}

impl<K: Ord + Clone, V> Index<K, V> {
  pub(crate) fn new(
    tree: BTree<K, V>,
    id: u64,
    method: Option<GenMethod>,
    skew: Option<f64>,
    domain: Option<usize>,
  ) -> Self {
    let meta = IndexMeta {
      id,
      method,
      skew,
      domain,
      len: tree.len(),
      height: tree.height(),
      buckets: tree.bucket_count(),
      max_leaf: tree.conf().max_leaf,
    };
    Self { tree, meta }
  }

  #[inline]
  pub fn tree(&self) -> &BTree<K, V> {
    &self.tree
  }

  #[inline]
  pub fn meta(&self) -> &IndexMeta {
    &self.meta
  }

  #[inline]
  pub fn id(&self) -> u64 {
    self.meta.id
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.tree.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.tree.is_empty()
  }

  #[inline]
  pub fn height(&self) -> usize {
    self.tree.height()
  }

  /// Clamp a requested sample size to the population
  /// 将请求的样本量截断到总体大小
  #[inline]
  pub fn clamp(&self, k: usize) -> usize {
    k.min(self.tree.len())
  }

  pub fn into_tree(self) -> BTree<K, V> {
    self.tree
  }
}
