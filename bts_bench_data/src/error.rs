// Error types for bts_bench_data
// bts_bench_data 错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("rank {0} does not fit below the key offset")]
  RankOverflow(u64),

  #[error("key {0} was not produced by the key encoder")]
  InvalidKey(u128),

  #[error("domain size must be positive")]
  EmptyDomain,

  #[error("skew factor must be finite and non-negative, got {0}")]
  Skew(f64),

  #[error("share of prefix {prefix:?} must be finite and non-negative, got {share}")]
  Share { prefix: String, share: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
