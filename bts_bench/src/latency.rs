// Sampling latency histogram
// 采样延迟直方图

use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Max latency value: 1 hour in nanoseconds
/// 最大延迟值：1小时（纳秒）
const MAX_LATENCY_NS: u64 = 3_600_000_000_000;

/// Significant figures for histogram precision
/// 直方图精度的有效数字
const SIGFIG: u8 = 3;

/// Elapsed time of repeated calls of one (method, k)
/// 同一 (方法, k) 重复调用的耗时
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
  inner: Histogram<u64>,
}

impl LatencyHistogram {
  pub fn new() -> Result<Self> {
    let inner = Histogram::new_with_bounds(1, MAX_LATENCY_NS, SIGFIG)?;
    Ok(Self { inner })
  }

  /// Record nanoseconds, clamped into [1, 1h]
  /// 记录纳秒值，截断到 [1, 1h]
  pub fn record_saturating(&mut self, latency_ns: u64) {
    let val = latency_ns.clamp(1, MAX_LATENCY_NS);
    let _ = self.inner.record(val);
  }

  pub fn p50(&self) -> u64 {
    self.inner.value_at_quantile(0.50)
  }

  pub fn p99(&self) -> u64 {
    self.inner.value_at_quantile(0.99)
  }

  pub fn mean(&self) -> f64 {
    self.inner.mean()
  }

  pub fn min(&self) -> u64 {
    self.inner.min()
  }

  pub fn max(&self) -> u64 {
    self.inner.max()
  }

  pub fn count(&self) -> u64 {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }
}

/// Serializable latency summary / 可序列化的延迟摘要
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatencyStats {
  pub min: u64,
  pub max: u64,
  pub mean: f64,
  pub p50: u64,
  pub p99: u64,
  pub count: u64,
}

impl From<&LatencyHistogram> for LatencyStats {
  fn from(h: &LatencyHistogram) -> Self {
    if h.is_empty() {
      return Self {
        min: 0,
        max: 0,
        mean: 0.0,
        p50: 0,
        p99: 0,
        count: 0,
      };
    }
    Self {
      min: h.min(),
      max: h.max(),
      mean: h.mean(),
      p50: h.p50(),
      p99: h.p99(),
      count: h.count(),
    }
  }
}
