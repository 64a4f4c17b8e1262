use bts_tree::{BTree, Node};

use super::{NAIVE_RANDOM_WALK, Sampler};
use crate::Result;

/// Uniform child at every level, uniform entry in the leaf.
/// Entries in sparse subtrees are over-represented.
/// 每层均匀选子节点、叶内均匀选条目；稀疏子树中的条目会被过度采样。
pub struct NaiveRandomWalk;

impl<K: Ord + Clone, V: Clone> Sampler<K, V> for NaiveRandomWalk {
  fn name(&self) -> &'static str {
    NAIVE_RANDOM_WALK
  }

  fn sample(&self, tree: &BTree<K, V>, k: usize, rng: &mut fastrand::Rng) -> Result<Vec<(K, V)>> {
    let mut out = Vec::with_capacity(k);
    if tree.is_empty() {
      return Ok(out);
    }
    for _ in 0..k {
      let mut id = tree.root();
      loop {
        match tree.node(id)? {
          Node::Internal(n) => id = n.children[rng.usize(..n.children.len())],
          Node::Leaf(n) => {
            // Leaves of a non-empty tree are never empty / 非空树的叶子不为空
            let i = rng.usize(..n.keys.len());
            out.push((n.keys[i].clone(), n.vals[i].clone()));
            break;
          }
        }
      }
    }
    Ok(out)
  }
}
