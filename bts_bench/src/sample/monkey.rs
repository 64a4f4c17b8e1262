use bts_tree::BTree;

use super::{MONKEY, Sampler};
use crate::Result;

/// Baseline: first k entries in key order. Not uniform.
/// 基线：按键序取前 k 个条目，非均匀
pub struct Monkey;

impl<K: Ord + Clone, V: Clone> Sampler<K, V> for Monkey {
  fn name(&self) -> &'static str {
    MONKEY
  }

  fn sample(&self, tree: &BTree<K, V>, k: usize, _: &mut fastrand::Rng) -> Result<Vec<(K, V)>> {
    Ok(
      tree
        .iter()
        .take(k)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect(),
    )
  }
}
