// Benchmark orchestration and configuration
// 基准测试编排与配置

use bts_bench_data::{Order, clustered, zipf};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Index, IndexMeta, LatencyHistogram, LatencyStats, Registry, Result, StatSink, build,
  build_with_shape, measure,
  sample::{
    DISTRIBUTION_HEIGHT_FOUR, DISTRIBUTION_HEIGHT_THREE, NAIVE_RANDOM_WALK, OLKEN_EARLY_ABORT,
  },
};

/// Strategies run when none are configured / 未配置时运行的策略
pub const DEFAULT_METHODS: [&str; 4] = [
  OLKEN_EARLY_ABORT,
  DISTRIBUTION_HEIGHT_FOUR,
  DISTRIBUTION_HEIGHT_THREE,
  NAIVE_RANDOM_WALK,
];

/// Default configuration values
/// 默认配置值
pub mod default {
  /// Sample sizes as fractions of the value count / 样本量占数据量的比例
  pub const FRACTIONS: [f64; 4] = [0.005, 0.01, 0.05, 0.1];
  pub const ITERATIONS: usize = 3;
  pub const SEED: u64 = 42;
}

/// Run configuration
/// 运行配置
#[derive(Debug, Clone)]
pub enum Conf {
  /// Explicit sample sizes, overrides `Fractions`
  /// 显式样本量，优先于 `Fractions`
  Sizes(Vec<usize>),
  /// Sample sizes as fractions of the value count
  /// 样本量占数据量的比例
  Fractions(Vec<f64>),
  /// Repetitions per (method, size)
  /// 每个 (方法, 样本量) 的重复次数
  Iterations(usize),
  /// Strategy names
  /// 策略名称
  Methods(Vec<String>),
  /// Cap leaf buckets at this size
  /// 叶子桶容量上限
  LeafSize(usize),
  /// Random seed
  /// 随机种子
  Seed(u64),
}

/// Parsed configuration
/// 解析后的配置
#[derive(Debug, Clone)]
pub struct ParsedConf {
  pub sizes: Option<Vec<usize>>,
  pub fractions: Vec<f64>,
  pub iterations: usize,
  pub methods: Vec<String>,
  pub leaf_size: Option<usize>,
  pub seed: u64,
}

impl Default for ParsedConf {
  fn default() -> Self {
    Self {
      sizes: None,
      fractions: default::FRACTIONS.to_vec(),
      iterations: default::ITERATIONS,
      methods: DEFAULT_METHODS.iter().map(|m| m.to_string()).collect(),
      leaf_size: None,
      seed: default::SEED,
    }
  }
}

impl ParsedConf {
  pub fn new(conf: &[Conf]) -> Self {
    let mut c = Self::default();
    for item in conf {
      match item {
        Conf::Sizes(v) => c.sizes = Some(v.clone()),
        Conf::Fractions(v) => c.fractions = v.clone(),
        Conf::Iterations(v) => c.iterations = *v,
        Conf::Methods(v) => c.methods = v.clone(),
        Conf::LeafSize(v) => c.leaf_size = Some((*v).max(1)),
        Conf::Seed(v) => c.seed = *v,
      }
    }
    c
  }

  /// Sample sizes for a dataset of `n` values / `n` 条数据对应的样本量
  pub fn sizes_for(&self, n: usize) -> Vec<usize> {
    match &self.sizes {
      Some(sizes) => sizes.clone(),
      None => self
        .fractions
        .iter()
        .map(|f| (n as f64 * f) as usize)
        .collect(),
    }
  }
}

/// Timing summary of one (method, k)
/// 单个 (方法, k) 的耗时摘要
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodReport {
  pub method: String,
  pub requested: usize,
  pub sample_size: usize,
  pub latency: LatencyStats,
}

/// Outcome of an end-to-end run
/// 端到端运行结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
  pub index: IndexMeta,
  pub methods: Vec<String>,
  pub sizes: Vec<usize>,
  pub reports: Vec<MethodReport>,
}

/// Drop strategies specialized to another tree height; unknown names fail
/// 移除专用于其他树高的策略，未知名称返回错误
pub fn select_methods<K, V>(
  registry: &Registry<K, V>,
  methods: &[String],
  height: usize,
) -> Result<Vec<String>> {
  let mut out = Vec::with_capacity(methods.len());
  for name in methods {
    let sampler = registry.get(name)?;
    if let Some(need) = sampler.height()
      && need != height
    {
      warn!("skip {name}: specialized to height {need}, index height is {height}");
      continue;
    }
    out.push(name.clone());
  }
  Ok(out)
}

/// Above height 2 at most one height-specialized strategy may run
/// 树高大于 2 时最多运行一个定高策略
pub fn check_exclusive<K, V>(
  registry: &Registry<K, V>,
  methods: &[String],
  height: usize,
) -> Result<()> {
  if height <= 2 {
    return Ok(());
  }
  let mut specialized = Vec::new();
  for name in methods {
    if registry.get(name)?.height().is_some() {
      specialized.push(name.clone());
    }
  }
  if specialized.len() > 1 {
    return Err(Error::ExclusiveHeights(specialized));
  }
  Ok(())
}

/// Run every method x size x iteration once, persisting one record per call
/// 对每个 方法 x 样本量 x 迭代 各运行一次，每次调用持久化一条记录
pub fn run_sample_methods<K, V, S>(
  index: &Index<K, V>,
  sizes: &[usize],
  iterations: usize,
  methods: &[String],
  registry: &Registry<K, V>,
  sink: &mut S,
  rng: &mut fastrand::Rng,
) -> Result<Vec<MethodReport>>
where
  K: Ord + Clone,
  V: Clone + Serialize,
  S: StatSink,
{
  let samplers = methods
    .iter()
    .map(|name| registry.get(name))
    .collect::<Result<Vec<_>>>()?;
  check_exclusive(registry, methods, index.height())?;
  info!("sampling methods: {methods:?}, sizes: {sizes:?}, iterations: {iterations}");

  let mut reports = Vec::with_capacity(samplers.len() * sizes.len());
  for sampler in samplers {
    for &k in sizes {
      let mut hist = LatencyHistogram::new()?;
      for iteration in 0..iterations {
        let (_, stat) = measure(sampler, index, k, iteration, rng, sink)?;
        hist.record_saturating(stat.elapsed_ns);
      }
      let latency = LatencyStats::from(&hist);
      info!(
        "{}: k={k} p50={}ns max={}ns",
        sampler.name(),
        latency.p50,
        latency.max
      );
      reports.push(MethodReport {
        method: sampler.name().to_owned(),
        requested: k,
        sample_size: index.clamp(k),
        latency,
      });
    }
  }
  Ok(reports)
}

fn run_index<K, V, S>(
  index: Index<K, V>,
  n: usize,
  conf: &ParsedConf,
  sink: &mut S,
  rng: &mut fastrand::Rng,
) -> Result<RunReport>
where
  K: Ord + Clone + 'static,
  V: Clone + Serialize + 'static,
  S: StatSink,
{
  let registry = Registry::default();
  let methods = select_methods(&registry, &conf.methods, index.height())?;
  let sizes = conf.sizes_for(n);
  let reports = run_sample_methods(
    &index,
    &sizes,
    conf.iterations,
    &methods,
    &registry,
    sink,
    rng,
  )?;
  Ok(RunReport {
    index: index.meta().clone(),
    methods,
    sizes,
    reports,
  })
}

/// Shuffled zipf data -> index -> sampling
/// 打乱的 Zipf 数据 -> 索引 -> 采样
pub fn zipf_run<S: StatSink>(
  num_values: usize,
  domain: usize,
  skew: f64,
  conf: &[Conf],
  sink: &mut S,
) -> Result<RunReport> {
  let conf = ParsedConf::new(conf);
  let mut rng = fastrand::Rng::with_seed(conf.seed);
  info!("running with num_of_values={num_values} domain_size={domain} skew_factor={skew}");

  let ds = zipf(domain, num_values, skew, Order::Shuffle, &mut rng)?;
  let index = match conf.leaf_size {
    Some(max_leaf) => build_with_shape(ds, max_leaf, &mut rng)?,
    None => build(ds, None, &mut rng),
  };
  run_index(index, num_values, &conf, sink, &mut rng)
}

/// Prefix-clustered data -> index -> sampling
/// 前缀聚簇数据 -> 索引 -> 采样
pub fn clustered_run<P: AsRef<str>, S: StatSink>(
  num_values: usize,
  shares: &[(P, f64)],
  conf: &[Conf],
  sink: &mut S,
) -> Result<RunReport> {
  let conf = ParsedConf::new(conf);
  let mut rng = fastrand::Rng::with_seed(conf.seed);
  info!("running with num_of_values={num_values}");

  let ds = clustered(num_values, shares, &mut rng)?;
  let index = match conf.leaf_size {
    Some(max_leaf) => build_with_shape(ds, max_leaf, &mut rng)?,
    None => build(ds, None, &mut rng),
  };
  info!("generated btree with id {}", index.id());
  run_index(index, num_values, &conf, sink, &mut rng)
}
