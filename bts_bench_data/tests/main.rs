use aok::{OK, Void};
use bts_bench_data::{
  ALPHABET, BASE_OFFSET, Error, GenMethod, KEY_LEN, KeyCoder, Order, ZipfFreq, clustered, decode,
  encode, zipf,
};
use log::info;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

#[test]
fn test_uniform_when_no_skew() -> Void {
  let freq = ZipfFreq::new(100, 1000, 0.0)?;
  let first = freq.freqs()[0];
  assert!(freq.freqs().iter().all(|&f| f == first));
  assert_eq!(first, 10.0);
  assert_eq!(freq.realized(), 1000);
  OK
}

#[test]
fn test_skewed_strictly_decreasing() -> Void {
  let freq = ZipfFreq::new(100, 1000, 1.0)?;
  for w in freq.freqs().windows(2) {
    assert!(w[0] > w[1], "{} > {}", w[0], w[1]);
  }
  // freq(1) = N / H(100) / freq(1) = N / H(100)
  let h: f64 = (1..=100).map(|i| 1.0 / i as f64).sum();
  assert!((freq.freq(1).unwrap_or(0.0) - 1000.0 / h).abs() < 1e-9);
  assert!(freq.freq(0).is_none());
  assert!(freq.freq(101).is_none());
  info!("realized {} of 1000", freq.realized());
  OK
}

#[test]
fn test_bad_params() -> Void {
  assert!(matches!(ZipfFreq::new(0, 10, 1.0), Err(Error::EmptyDomain)));
  assert!(matches!(ZipfFreq::new(10, 10, -1.0), Err(Error::Skew(_))));
  assert!(matches!(ZipfFreq::new(10, 10, f64::NAN), Err(Error::Skew(_))));

  let mut rng = fastrand::Rng::with_seed(3);
  let r = clustered(10, &[("x", -0.5)], &mut rng);
  assert!(matches!(r, Err(Error::Share { .. })));
  OK
}

#[test]
fn test_round_trip() -> Void {
  let mut rng = fastrand::Rng::with_seed(42);
  for rank in (0..10_000u64).chain([BASE_OFFSET - 1]) {
    let key = encode(rank, &mut rng)?;
    assert_eq!(decode(key)?, rank);
  }
  OK
}

#[test]
fn test_rank_order_preserved() -> Void {
  let mut rng = fastrand::Rng::with_seed(9);
  let mut coder = KeyCoder::new(&mut rng);
  let mut prev = 0u128;
  for rank in 1..1000u64 {
    let key = coder.encode(rank)?;
    assert!(key > prev);
    prev = key;
  }
  assert_eq!(coder.issued(), 999);
  OK
}

#[test]
fn test_zipf_dataset() -> Void {
  let mut rng = fastrand::Rng::with_seed(1);
  let ds = zipf(100, 1000, 1.0, Order::Rank, &mut rng)?;
  assert_eq!(ds.method(), GenMethod::Zipf);
  assert_eq!(ds.skew(), Some(1.0));
  assert_eq!(ds.domain(), Some(100));

  let expect = ZipfFreq::new(100, 1000, 1.0)?.counts();
  let mut counts = vec![0usize; 100];
  for (key, rank) in ds.data() {
    assert_eq!(decode(*key)?, *rank);
    counts[*rank as usize - 1] += 1;
  }
  assert_eq!(counts, expect);

  // Every occurrence is a distinct key / 每次出现都是不同的键
  let mut keys: Vec<u128> = ds.data().iter().map(|(k, _)| *k).collect();
  keys.sort_unstable();
  keys.dedup();
  assert_eq!(keys.len(), ds.len());

  // Smallest key belongs to rank 1 / 最小键属于 rank 1
  assert_eq!(decode(keys[0])?, 1);
  OK
}

#[test]
fn test_zipf_shuffled() -> Void {
  let mut rng = fastrand::Rng::with_seed(5);
  let ds = zipf(50, 2000, 1.2, Order::Shuffle, &mut rng)?;
  assert_eq!(ds.method(), GenMethod::ZipfRandomOrder);
  let ranks: Vec<u64> = ds.data().iter().map(|(_, r)| *r).collect();
  assert!(ranks.windows(2).any(|w| w[0] > w[1]));
  OK
}

#[test]
fn test_clustered() -> Void {
  let mut rng = fastrand::Rng::with_seed(7);
  let ds = clustered(100, &[("aa", 0.3), ("bb", 0.7)], &mut rng)?;
  assert_eq!(ds.method(), GenMethod::PrefixClusters);
  assert_eq!(ds.len(), 100);

  let aa = ds.data().iter().filter(|(k, _)| k.starts_with("aa")).count();
  let bb = ds.data().iter().filter(|(k, _)| k.starts_with("bb")).count();
  assert_eq!((aa, bb), (30, 70));

  for (key, val) in ds.data() {
    assert_eq!(key.len(), val.len() + KEY_LEN);
    assert!(key.starts_with(val.as_str()));
    assert!(key[val.len()..].bytes().all(|b| ALPHABET.contains(&b)));
  }
  OK
}

#[test]
fn test_clustered_unnormalized() -> Void {
  let mut rng = fastrand::Rng::with_seed(8);
  // Shares are not normalized / 份额不做归一化
  let ds = clustered(25_000, &[("p", 1.0), ("q", 0.5)], &mut rng)?;
  assert_eq!(ds.len(), 37_500);
  OK
}
