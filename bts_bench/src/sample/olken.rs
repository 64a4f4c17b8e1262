use bts_tree::{BTree, Node};

use super::{OLKEN_EARLY_ABORT, Sampler};
use crate::Result;

/// Olken acceptance/rejection walk with early abort.
///
/// Each level draws a slot in `0..max_fanout`; a slot past the node's real
/// fan-out rejects the walk right there. An entry is reached with probability
/// `1 / (max_internal^(h-1) * max_leaf)` whatever the path, so accepted draws
/// are uniform (with replacement).
/// Olken 接受/拒绝随机游走（提前中止），接受的样本是均匀的（有放回）。
pub struct OlkenEarlyAbort;

impl OlkenEarlyAbort {
  fn walk<K: Ord + Clone, V: Clone>(
    tree: &BTree<K, V>,
    rng: &mut fastrand::Rng,
  ) -> Result<Option<(K, V)>> {
    let conf = tree.conf();
    let mut id = tree.root();
    loop {
      match tree.node(id)? {
        Node::Internal(n) => {
          let slot = rng.usize(..conf.max_internal);
          match n.children.get(slot) {
            Some(&child) => id = child,
            None => return Ok(None),
          }
        }
        Node::Leaf(n) => {
          let slot = rng.usize(..conf.max_leaf);
          return Ok(
            n.keys
              .get(slot)
              .map(|k| (k.clone(), n.vals[slot].clone())),
          );
        }
      }
    }
  }
}

impl<K: Ord + Clone, V: Clone> Sampler<K, V> for OlkenEarlyAbort {
  fn name(&self) -> &'static str {
    OLKEN_EARLY_ABORT
  }

  fn sample(&self, tree: &BTree<K, V>, k: usize, rng: &mut fastrand::Rng) -> Result<Vec<(K, V)>> {
    let mut out = Vec::with_capacity(k);
    if tree.is_empty() {
      return Ok(out);
    }
    while out.len() < k {
      if let Some(kv) = Self::walk(tree, rng)? {
        out.push(kv);
      }
    }
    Ok(out)
  }
}
