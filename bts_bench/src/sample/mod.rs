//! Pluggable sampling strategies, their registry and the timing harness
//! 可插拔采样策略、注册表与计时框架

mod distribution;
mod monkey;
mod olken;
mod walk;

use std::{
  collections::BTreeMap,
  time::{Instant, SystemTime, UNIX_EPOCH},
};

use bts_tree::BTree;
pub use distribution::DistributionOriented;
pub use monkey::Monkey;
pub use olken::OlkenEarlyAbort;
use serde::Serialize;
pub use walk::NaiveRandomWalk;

use crate::{Error, Index, Result, SampleStat, StatSink};

pub const MONKEY: &str = "monkey";
pub const OLKEN_EARLY_ABORT: &str = "sample_olken_early_abort";
pub const DISTRIBUTION_HEIGHT_THREE: &str = "sample_distribution_oriented_height_three";
pub const DISTRIBUTION_HEIGHT_FOUR: &str = "sample_distribution_oriented_height_four";
pub const NAIVE_RANDOM_WALK: &str = "sample_naive_random_walk";

/// Sampling strategy over a built tree
/// 作用于已构建树的采样策略
pub trait Sampler<K, V> {
  fn name(&self) -> &'static str;

  /// Tree height this strategy is specialized to, if any
  /// 策略专用的树高（若有）
  fn height(&self) -> Option<usize> {
    None
  }

  /// Return `k` entries, `k` is already clamped to the tree size
  /// 返回 `k` 个条目，`k` 已截断到树大小
  fn sample(&self, tree: &BTree<K, V>, k: usize, rng: &mut fastrand::Rng) -> Result<Vec<(K, V)>>;
}

/// Strategy name -> implementation / 策略名 -> 实现
pub struct Registry<K, V> {
  map: BTreeMap<&'static str, Box<dyn Sampler<K, V>>>,
}

impl<K: Ord + Clone + 'static, V: Clone + 'static> Default for Registry<K, V> {
  fn default() -> Self {
    let mut r = Self::empty();
    r.register(Box::new(Monkey));
    r.register(Box::new(OlkenEarlyAbort));
    r.register(Box::new(DistributionOriented::new(
      DISTRIBUTION_HEIGHT_THREE,
      3,
    )));
    r.register(Box::new(DistributionOriented::new(
      DISTRIBUTION_HEIGHT_FOUR,
      4,
    )));
    r.register(Box::new(NaiveRandomWalk));
    r
  }
}

impl<K, V> Registry<K, V> {
  pub fn empty() -> Self {
    Self {
      map: BTreeMap::new(),
    }
  }

  /// Add or replace by name / 按名称添加或替换
  pub fn register(&mut self, sampler: Box<dyn Sampler<K, V>>) {
    self.map.insert(sampler.name(), sampler);
  }

  pub fn get(&self, name: &str) -> Result<&dyn Sampler<K, V>> {
    self
      .map
      .get(name)
      .map(|s| s.as_ref())
      .ok_or_else(|| Error::UnknownMethod(name.to_owned()))
  }

  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.map.keys().copied()
  }
}

fn now_ms() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_millis() as u64)
    .unwrap_or(0)
}

/// Clamp k, time one call, persist its record
/// 截断 k，计时一次调用并持久化记录
pub fn measure<K, V, S>(
  sampler: &dyn Sampler<K, V>,
  index: &Index<K, V>,
  k: usize,
  iteration: usize,
  rng: &mut fastrand::Rng,
  sink: &mut S,
) -> Result<(Vec<(K, V)>, SampleStat<V>)>
where
  K: Ord + Clone,
  V: Clone + Serialize,
  S: StatSink,
{
  let size = index.clamp(k);
  let start_ms = now_ms();
  let start = Instant::now();
  let samples = sampler.sample(index.tree(), size, rng)?;
  let elapsed_ns = start.elapsed().as_nanos() as u64;

  let stat = SampleStat {
    method: sampler.name().to_owned(),
    index_id: index.id(),
    requested: k,
    sample_size: size,
    start_ms,
    elapsed_ns,
    iteration,
    values: samples.iter().map(|(_, v)| v.clone()).collect(),
  };
  sink.persist(&stat)?;
  Ok((samples, stat))
}

/// First k entries of ordered iteration, timed and persisted
/// 有序遍历的前 k 个条目，计时并持久化
pub fn sample_monkey<K, V, S>(
  index: &Index<K, V>,
  k: usize,
  sink: &mut S,
) -> Result<(Vec<(K, V)>, SampleStat<V>)>
where
  K: Ord + Clone,
  V: Clone + Serialize,
  S: StatSink,
{
  // Monkey is deterministic, the rng is never drawn from
  // Monkey 是确定性的，不会使用随机数
  let mut rng = fastrand::Rng::with_seed(0);
  measure(&Monkey, index, k, 0, &mut rng, sink)
}
