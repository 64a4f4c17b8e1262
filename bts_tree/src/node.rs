//! B+ Tree node types / B+ 树节点类型

/// Node slot in the tree arena / 树内存池中的节点槽位
pub type NodeId = u32;

/// Internal node, `children.len() == keys.len() + 1`
/// 内部节点
#[derive(Debug, Clone)]
pub struct Internal<K> {
  pub keys: Vec<K>,
  pub children: Vec<NodeId>,
}

/// Leaf bucket, linked to its neighbours
/// 叶子桶，与相邻叶子链接
#[derive(Debug, Clone)]
pub struct Leaf<K, V> {
  pub keys: Vec<K>,
  pub vals: Vec<V>,
  pub prev: Option<NodeId>,
  pub next: Option<NodeId>,
}

/// Node enum / 节点枚举
#[derive(Debug, Clone)]
pub enum Node<K, V> {
  Internal(Internal<K>),
  Leaf(Leaf<K, V>),
}

impl<K: Ord + Clone> Internal<K> {
  /// Find child index for key / 查找 key 对应的子节点索引
  pub fn find_child(&self, key: &K) -> usize {
    match self.keys.binary_search(key) {
      Ok(i) => i + 1,
      Err(i) => i,
    }
  }

  /// Split in half, return (up_key, right) / 对半分裂，返回 (上移键, 右节点)
  pub(crate) fn split(&mut self) -> (K, Internal<K>) {
    let mid = self.keys.len() / 2;
    let right = Internal {
      keys: self.keys.drain(mid + 1..).collect(),
      children: self.children.drain(mid + 1..).collect(),
    };
    // keys[mid] moves up / keys[mid] 上移
    let up = self.keys.pop();
    match up {
      Some(up) => (up, right),
      None => unreachable!("split of internal node without keys"),
    }
  }
}

impl<K, V> Default for Leaf<K, V> {
  fn default() -> Self {
    Self {
      keys: Vec::new(),
      vals: Vec::new(),
      prev: None,
      next: None,
    }
  }
}

impl<K: Ord + Clone, V> Leaf<K, V> {
  /// Entry count / 条目数
  #[inline]
  pub fn size(&self) -> usize {
    self.keys.len()
  }

  /// Insert or overwrite, return old value / 插入或覆盖，返回旧值
  pub(crate) fn insert(&mut self, key: K, val: V) -> Option<V> {
    match self.keys.binary_search(&key) {
      Ok(i) => Some(std::mem::replace(&mut self.vals[i], val)),
      Err(i) => {
        self.keys.insert(i, key);
        self.vals.insert(i, val);
        None
      }
    }
  }

  /// Split in half, return (split_key, right). Links are fixed by the tree.
  /// 对半分裂，返回 (分裂键, 右叶子)，链接由树负责
  pub(crate) fn split(&mut self) -> (K, Leaf<K, V>) {
    let mid = self.keys.len() / 2;
    let keys: Vec<K> = self.keys.drain(mid..).collect();
    let vals: Vec<V> = self.vals.drain(mid..).collect();
    let split_key = keys[0].clone();
    (
      split_key,
      Leaf {
        keys,
        vals,
        prev: None,
        next: self.next,
      },
    )
  }
}

impl<K, V> Node<K, V> {
  /// Fan-out: children for internal nodes, entries for leaves
  /// 扇出：内部节点为子节点数，叶子为条目数
  #[inline]
  pub fn fanout(&self) -> usize {
    match self {
      Node::Internal(n) => n.children.len(),
      Node::Leaf(n) => n.keys.len(),
    }
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self, Node::Leaf(_))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn leaf_split_keeps_order() {
    let mut leaf = Leaf::default();
    for i in [5, 1, 4, 2, 3] {
      assert!(leaf.insert(i, i * 10).is_none());
    }
    assert_eq!(leaf.insert(3, 33), Some(30));

    let (key, right) = leaf.split();
    assert_eq!(key, 3);
    assert_eq!(leaf.keys, vec![1, 2]);
    assert_eq!(right.keys, vec![3, 4, 5]);
    assert_eq!(right.vals, vec![33, 40, 50]);
  }

  #[test]
  fn internal_split_moves_mid_up() {
    let mut n = Internal {
      keys: vec![10, 20, 30, 40],
      children: vec![0, 1, 2, 3, 4],
    };
    let (up, right) = n.split();
    assert_eq!(up, 30);
    assert_eq!(n.keys, vec![10, 20]);
    assert_eq!(n.children, vec![0, 1, 2]);
    assert_eq!(right.keys, vec![40]);
    assert_eq!(right.children, vec![3, 4]);
  }
}
