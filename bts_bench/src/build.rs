// Index builder
// 索引构建器

use bts_bench_data::Dataset;
use bts_tree::{BTree, Conf};
use log::{error, info};

use crate::{Error, Index, Result};

/// Keys inserted per batch / 每批插入的键数
pub const BATCH: usize = 10_000;

const PROGRESS: usize = 150_000;

/// Bulk-load dataset in batches, creating a tree if none is given.
/// Batch size only bounds memory and paces progress logs.
/// 分批导入数据集，未提供树时新建；批大小仅影响内存与进度日志。
pub fn build<K: Ord + Clone, V>(
  dataset: Dataset<K, V>,
  tree: Option<BTree<K, V>>,
  rng: &mut fastrand::Rng,
) -> Index<K, V> {
  let method = dataset.method();
  let skew = dataset.skew();
  let domain = dataset.domain();
  let total = dataset.len();
  let mut tree = tree.unwrap_or_default();

  info!("build start: {total} values, method={method}");
  let mut items = dataset.into_data().into_iter();
  let mut done = 0;
  while done < total {
    let take = BATCH.min(total - done);
    tree.update(items.by_ref().take(take));
    done += take;
    if done % PROGRESS == 0 {
      info!("done inserting {done} values");
    }
  }

  let index = Index::new(tree, rng.u64(..), Some(method), skew, domain);
  let meta = index.meta();
  info!(
    "build finish: id={} keys={} height={} buckets={}",
    meta.id, meta.len, meta.height, meta.buckets
  );
  index
}

/// Build a fresh tree whose leaves hold at most `max_leaf` entries, then
/// verify the bucket chain honours the cap.
/// 构建叶子最多 `max_leaf` 条的新树，并校验桶链满足上限。
pub fn build_with_shape<K: Ord + Clone, V>(
  dataset: Dataset<K, V>,
  max_leaf: usize,
  rng: &mut fastrand::Rng,
) -> Result<Index<K, V>> {
  let tree = BTree::with_conf(&[Conf::MaxLeaf(max_leaf)]);
  let index = build(dataset, Some(tree), rng);
  validate_shape(index.tree(), max_leaf)?;
  Ok(index)
}

/// Walk from the first bucket and check every size against the cap
/// 从首个桶开始遍历，检查每个桶的大小
pub fn validate_shape<K: Ord + Clone, V>(tree: &BTree<K, V>, max_leaf: usize) -> Result<()> {
  let mut bucket = Some(tree.first_bucket());
  while let Some(b) = bucket {
    if b.size() > max_leaf {
      error!(
        "leaf cap not honoured: bucket {} holds {} > {max_leaf}",
        b.id(),
        b.size()
      );
      return Err(Error::Shape {
        bucket: b.id(),
        size: b.size(),
        max: max_leaf,
      });
    }
    bucket = b.next();
  }
  Ok(())
}
