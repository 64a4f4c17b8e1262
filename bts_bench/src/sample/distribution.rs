use bts_tree::{BTree, Node, NodeId};

use super::Sampler;
use crate::{Error, Result};

/// Distribution-oriented sampling for a tree of one fixed height.
///
/// Subtree sizes are counted once per call; each draw then descends exactly
/// `height - 1` internal levels, choosing a child with probability
/// proportional to its subtree size, so every entry is equally likely.
/// 面向分布的定高采样：每次调用先统计子树大小，再按子树大小比例逐层下降，
/// 每个条目被选中的概率相同。
pub struct DistributionOriented {
  name: &'static str,
  height: usize,
}

impl DistributionOriented {
  pub fn new(name: &'static str, height: usize) -> Self {
    Self { name, height }
  }

  fn mismatch(&self, actual: usize) -> Error {
    Error::HeightMismatch {
      method: self.name,
      need: self.height,
      actual,
    }
  }
}

/// Entries under each node, indexed by node id / 每个节点下的条目数
fn subtree_sizes<K: Ord + Clone, V>(
  tree: &BTree<K, V>,
  id: NodeId,
  sizes: &mut [usize],
) -> Result<usize> {
  let n = match tree.node(id)? {
    Node::Internal(n) => {
      let mut sum = 0;
      for &child in &n.children {
        sum += subtree_sizes(tree, child, sizes)?;
      }
      sum
    }
    Node::Leaf(n) => n.keys.len(),
  };
  sizes[id as usize] = n;
  Ok(n)
}

impl<K: Ord + Clone, V: Clone> Sampler<K, V> for DistributionOriented {
  fn name(&self) -> &'static str {
    self.name
  }

  fn height(&self) -> Option<usize> {
    Some(self.height)
  }

  fn sample(&self, tree: &BTree<K, V>, k: usize, rng: &mut fastrand::Rng) -> Result<Vec<(K, V)>> {
    if tree.height() != self.height {
      return Err(self.mismatch(tree.height()));
    }

    let mut out = Vec::with_capacity(k);
    if tree.is_empty() || k == 0 {
      return Ok(out);
    }

    let mut sizes = vec![0usize; tree.node_count()];
    subtree_sizes(tree, tree.root(), &mut sizes)?;

    for _ in 0..k {
      let mut id = tree.root();
      for _ in 1..self.height {
        let Node::Internal(n) = tree.node(id)? else {
          return Err(self.mismatch(tree.height()));
        };
        let mut r = rng.usize(..sizes[id as usize]);
        for &child in &n.children {
          let size = sizes[child as usize];
          if r < size {
            id = child;
            break;
          }
          r -= size;
        }
      }
      let leaf = tree.leaf(id)?;
      let i = rng.usize(..leaf.keys.len());
      out.push((leaf.keys[i].clone(), leaf.vals[i].clone()));
    }
    Ok(out)
  }
}
