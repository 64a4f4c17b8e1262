// Generated dataset with experiment metadata
// 带实验元数据的生成数据集

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the data was generated / 数据生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenMethod {
  Zipf,
  ZipfRandomOrder,
  PrefixClusters,
}

impl GenMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      GenMethod::Zipf => "zipf",
      GenMethod::ZipfRandomOrder => "zipf_random_order",
      GenMethod::PrefixClusters => "prefix_clusters",
    }
  }
}

impl fmt::Display for GenMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Key-value pairs in insertion order plus generation metadata
/// 按插入顺序排列的键值对及生成元数据
#[derive(Debug, Clone)]
pub struct Dataset<K, V> {
  data: Vec<(K, V)>,
  method: GenMethod,
  skew: Option<f64>,
  domain: Option<usize>,
}

impl<K, V> Dataset<K, V> {
  pub fn new(data: Vec<(K, V)>, method: GenMethod) -> Self {
    Self {
      data,
      method,
      skew: None,
      domain: None,
    }
  }

  pub fn with_skew(mut self, skew: f64) -> Self {
    self.skew = Some(skew);
    self
  }

  pub fn with_domain(mut self, domain: usize) -> Self {
    self.domain = Some(domain);
    self
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  #[inline]
  pub fn data(&self) -> &[(K, V)] {
    &self.data
  }

  #[inline]
  pub fn method(&self) -> GenMethod {
    self.method
  }

  #[inline]
  pub fn skew(&self) -> Option<f64> {
    self.skew
  }

  #[inline]
  pub fn domain(&self) -> Option<usize> {
    self.domain
  }

  pub fn into_data(self) -> Vec<(K, V)> {
    self.data
  }
}
