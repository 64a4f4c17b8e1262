// Zipf frequency table and dataset generator
// Zipf 频率表与数据集生成器

use log::{info, warn};

use crate::{Dataset, Error, GenMethod, KeyCoder, Result};

/// Zipf frequency table over ranks 1..=domain
/// rank 1..=domain 上的 Zipf 频率表
#[derive(Debug, Clone)]
pub struct ZipfFreq {
  /// freqs[i] is the expected count of rank i + 1 / freqs[i] 为 rank i + 1 的期望次数
  freqs: Vec<f64>,
  denominator: f64,
}

impl ZipfFreq {
  /// freq(i) = total * i^-s / sum(j^-s for j in 1..=domain)
  pub fn new(domain: usize, total: usize, s: f64) -> Result<Self> {
    if domain == 0 {
      return Err(Error::EmptyDomain);
    }
    if !s.is_finite() || s < 0.0 {
      return Err(Error::Skew(s));
    }

    let weights: Vec<f64> = (1..=domain).map(|i| 1.0 / (i as f64).powf(s)).collect();
    let denominator: f64 = weights.iter().sum();
    let total = total as f64;
    let freqs = weights.iter().map(|w| total * w / denominator).collect();
    Ok(Self { freqs, denominator })
  }

  #[inline]
  pub fn domain(&self) -> usize {
    self.freqs.len()
  }

  /// Generalized harmonic number H(domain, s) / 广义调和数
  #[inline]
  pub fn denominator(&self) -> f64 {
    self.denominator
  }

  /// Expected count of 1-based rank / 1 起始 rank 的期望次数
  #[inline]
  pub fn freq(&self, rank: usize) -> Option<f64> {
    rank.checked_sub(1).and_then(|i| self.freqs.get(i).copied())
  }

  #[inline]
  pub fn freqs(&self) -> &[f64] {
    &self.freqs
  }

  /// Rounded count per rank / 每个 rank 的取整次数
  pub fn counts(&self) -> Vec<usize> {
    self.freqs.iter().map(|f| f.round() as usize).collect()
  }

  /// Realized total, may differ from the requested total
  /// 实际总数，可能与请求总数不同
  pub fn realized(&self) -> usize {
    self.counts().iter().sum()
  }
}

/// Insertion order of a generated zipf dataset
/// Zipf 数据集的插入顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
  /// Ascending rank / 按 rank 升序
  #[default]
  Rank,
  /// Shuffled so tree layout does not follow rank / 打乱，使树布局与 rank 无关
  Shuffle,
}

/// Generate zipf dataset: key = encoded rank, value = rank
/// 生成 Zipf 数据集：键为编码后的 rank，值为 rank
///
/// Every occurrence gets its own key, so a rank repeated n times yields n
/// adjacent keys in the index.
/// 每次出现都有独立的键，重复 n 次的 rank 在索引中对应 n 个相邻键。
pub fn zipf(
  domain: usize,
  n: usize,
  s: f64,
  order: Order,
  rng: &mut fastrand::Rng,
) -> Result<Dataset<u128, u64>> {
  info!("zipf start: domain={domain} n={n} skew={s} order={order:?}");
  let freq = ZipfFreq::new(domain, n, s)?;

  let mut data = Vec::with_capacity(freq.realized());
  {
    let mut coder = KeyCoder::new(&mut *rng);
    for (i, count) in freq.counts().into_iter().enumerate() {
      let rank = (i + 1) as u64;
      for _ in 0..count {
        data.push((coder.encode(rank)?, rank));
      }
    }
    if coder.retries() > 0 {
      warn!("zipf: {} key collisions redrawn", coder.retries());
    }
  }

  let method = match order {
    Order::Rank => GenMethod::Zipf,
    Order::Shuffle => {
      rng.shuffle(&mut data);
      GenMethod::ZipfRandomOrder
    }
  };

  info!("zipf finish: {} values (requested {n})", data.len());
  Ok(
    Dataset::new(data, method)
      .with_skew(s)
      .with_domain(domain),
  )
}
