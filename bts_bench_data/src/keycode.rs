// Order-preserving numeric key encoding
// 保序数值键编码
//
// key = (BASE_OFFSET + rank) * 10^SUFFIX_LEN + suffix
//
// The suffix is always exactly SUFFIX_LEN digits, so the decimal form is the
// shifted rank followed by the suffix and keys of smaller ranks sort first.
// 后缀固定 SUFFIX_LEN 位，十进制形式即平移后的 rank 拼接后缀，rank 小的键排序在前。

use std::collections::HashSet;

use crate::{Error, Result};

/// Rank shift, also the exclusive upper bound of encodable ranks
/// rank 偏移量，同时是可编码 rank 的上界（不含）
pub const BASE_OFFSET: u64 = 10_000_000_000;

/// Random suffix digits / 随机后缀位数
pub const SUFFIX_LEN: u32 = 10;

const SCALE: u128 = 10u128.pow(SUFFIX_LEN);
const SUFFIX_MIN: u64 = 1_000_000_000;
const SUFFIX_MAX: u64 = 9_999_999_999;

#[inline]
fn join(rank: u64, suffix: u64) -> u128 {
  (BASE_OFFSET + rank) as u128 * SCALE + suffix as u128
}

/// Encode rank with a random 10-digit suffix
/// 使用 10 位随机后缀编码 rank
pub fn encode(rank: u64, rng: &mut fastrand::Rng) -> Result<u128> {
  if rank >= BASE_OFFSET {
    return Err(Error::RankOverflow(rank));
  }
  Ok(join(rank, rng.u64(SUFFIX_MIN..=SUFFIX_MAX)))
}

/// Recover rank. Keys not produced by [`encode`] are rejected.
/// 还原 rank，非 [`encode`] 生成的键返回错误
pub fn decode(key: u128) -> Result<u64> {
  let head = key / SCALE;
  let suffix = key % SCALE;
  let base = BASE_OFFSET as u128;
  if head < base || head >= 2 * base || suffix < SUFFIX_MIN as u128 {
    return Err(Error::InvalidKey(key));
  }
  Ok((head - base) as u64)
}

/// Encoder that never hands out the same key twice
/// 不会重复发放同一键的编码器
pub struct KeyCoder<'a> {
  rng: &'a mut fastrand::Rng,
  issued: HashSet<u128>,
  retries: usize,
}

impl<'a> KeyCoder<'a> {
  pub fn new(rng: &'a mut fastrand::Rng) -> Self {
    Self {
      rng,
      issued: HashSet::new(),
      retries: 0,
    }
  }

  /// Encode rank, redrawing the suffix on collision
  /// 编码 rank，冲突时重新抽取后缀
  pub fn encode(&mut self, rank: u64) -> Result<u128> {
    loop {
      let key = encode(rank, &mut *self.rng)?;
      if self.issued.insert(key) {
        return Ok(key);
      }
      self.retries += 1;
    }
  }

  /// Suffix redraws so far / 目前为止的后缀重抽次数
  #[inline]
  pub fn retries(&self) -> usize {
    self.retries
  }

  /// Keys issued so far / 已发放的键数
  #[inline]
  pub fn issued(&self) -> usize {
    self.issued.len()
  }
}
