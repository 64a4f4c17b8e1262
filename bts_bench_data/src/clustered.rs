// Prefix-clustered string keys
// 前缀聚簇字符串键

use log::info;

use crate::{Dataset, Error, GenMethod, Result};

/// Keys generated per chunk / 每批生成的键数
pub const CHUNK: usize = 10_000;

/// Random characters after the prefix / 前缀后的随机字符数
pub const KEY_LEN: usize = 8;

pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const PROGRESS: usize = 150_000;

fn random_key(prefix: &str, rng: &mut fastrand::Rng) -> String {
  let mut key = String::with_capacity(prefix.len() + KEY_LEN);
  key.push_str(prefix);
  for _ in 0..KEY_LEN {
    key.push(ALPHABET[rng.usize(..ALPHABET.len())] as char);
  }
  key
}

/// Generate floor(n * share) keys per prefix, value = prefix.
/// Shares are used as given, the caller normalizes.
/// 每个前缀生成 floor(n * share) 个键，值为前缀；份额按原样使用，由调用方归一化。
pub fn clustered<P: AsRef<str>>(
  n: usize,
  shares: &[(P, f64)],
  rng: &mut fastrand::Rng,
) -> Result<Dataset<String, String>> {
  for (prefix, share) in shares {
    if !share.is_finite() || *share < 0.0 {
      return Err(Error::Share {
        prefix: prefix.as_ref().to_owned(),
        share: *share,
      });
    }
  }

  info!("prefix clusters start: n={n} prefixes={}", shares.len());
  let mut data = Vec::new();
  for (prefix, share) in shares {
    let prefix = prefix.as_ref();
    let amount = (n as f64 * share).floor() as usize;
    let chunk = CHUNK.min(amount);
    info!("generating {amount} values, chunk of {chunk}, with prefix={prefix:?}");

    data.reserve(amount);
    let mut done = 0;
    while done < amount {
      let take = chunk.min(amount - done);
      data.extend((0..take).map(|_| (random_key(prefix, rng), prefix.to_owned())));
      done += take;
      if done % PROGRESS == 0 {
        info!("done generating {done} values");
      }
    }
  }

  info!("prefix clusters finish: {} values", data.len());
  Ok(Dataset::new(data, GenMethod::PrefixClusters))
}
