use aok::{OK, Void};
use bts_bench::{
  BATCH, Conf, Error, JsonlSink, MemSink, SampleStat, build, build_with_shape, clustered_run,
  sample_monkey, validate_shape, zipf_run,
};
use bts_bench_data::{Dataset, GenMethod, Order, clustered, decode, zipf};
use bts_tree::BTree;
use log::info;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

#[test]
fn test_build_coverage() -> Void {
  let mut rng = fastrand::Rng::with_seed(11);
  let ds = zipf(1000, 25_000, 0.8, Order::Shuffle, &mut rng)?;
  assert!(ds.len() > BATCH, "spans several batches");
  let mut expect: Vec<u128> = ds.data().iter().map(|(k, _)| *k).collect();
  expect.sort_unstable();

  let index = build(ds, None, &mut rng);
  let meta = index.meta();
  assert_eq!(meta.method, Some(GenMethod::ZipfRandomOrder));
  assert_eq!(meta.skew, Some(0.8));
  assert_eq!(meta.domain, Some(1000));
  assert_eq!(meta.len, expect.len());
  assert_eq!(meta.height, index.height());

  let got: Vec<u128> = index.tree().iter().map(|(k, _)| *k).collect();
  assert_eq!(got, expect);
  assert!(got.windows(2).all(|w| w[0] < w[1]));
  OK
}

#[test]
fn test_build_into_existing_last_write_wins() -> Void {
  let mut rng = fastrand::Rng::with_seed(12);
  let mut tree = BTree::new();
  tree.put("aa".to_owned(), "old".to_owned());
  tree.put("zz".to_owned(), "keep".to_owned());

  let ds = Dataset::new(
    vec![
      ("aa".to_owned(), "new".to_owned()),
      ("mm".to_owned(), "mid".to_owned()),
    ],
    GenMethod::PrefixClusters,
  );
  let index = build(ds, Some(tree), &mut rng);
  let tree = index.tree();
  assert_eq!(tree.len(), 3);
  assert_eq!(tree.get(&"aa".to_owned()).map(String::as_str), Some("new"));
  assert_eq!(tree.get(&"zz".to_owned()).map(String::as_str), Some("keep"));
  OK
}

#[test]
fn test_shape() -> Void {
  let mut rng = fastrand::Rng::with_seed(13);
  for max_leaf in [1, 2, 7, 30, 64] {
    let ds = clustered(3000, &[("a", 0.5), ("b", 0.5)], &mut rng)?;
    let index = build_with_shape(ds, max_leaf, &mut rng)?;
    assert_eq!(index.meta().max_leaf, max_leaf);
    assert!(index.tree().buckets().all(|b| b.size() <= max_leaf));
    info!("leaf {max_leaf}: height {}", index.height());
  }
  OK
}

#[test]
fn test_shape_violation_detected() -> Void {
  let tree: BTree<u32, u32> = (0..500).map(|i| (i, i)).collect();
  match validate_shape(&tree, 3) {
    Err(Error::Shape { size, max, .. }) => {
      assert!(size > 3);
      assert_eq!(max, 3);
    }
    other => panic!("expected shape error, got {other:?}"),
  }
  validate_shape(&tree, tree.conf().max_leaf)?;
  OK
}

#[test]
fn test_monkey_clamp() -> Void {
  let mut rng = fastrand::Rng::with_seed(14);
  let ds = zipf(100, 1000, 1.0, Order::Shuffle, &mut rng)?;
  let index = build(ds, None, &mut rng);
  let mut sink = MemSink::new();

  let (samples, stat) = sample_monkey(&index, 10, &mut sink)?;
  let first: Vec<(u128, u64)> = index.tree().iter().take(10).map(|(k, v)| (*k, *v)).collect();
  assert_eq!(samples, first);
  assert_eq!(stat.method, "monkey");
  assert_eq!(stat.sample_size, 10);
  // Smallest keys carry the most frequent rank / 最小的键对应频率最高的 rank
  assert_eq!(decode(samples[0].0)?, 1);
  assert!(samples.iter().all(|(_, rank)| *rank == 1));

  let n = index.len();
  let (all, stat) = sample_monkey(&index, n + 500, &mut sink)?;
  assert_eq!(all.len(), n);
  assert_eq!(stat.requested, n + 500);
  assert_eq!(stat.sample_size, n);

  assert_eq!(sink.len(), 2);
  let records: Vec<SampleStat<u64>> = sink.records()?;
  assert_eq!(records[0].values, vec![1; 10]);
  assert_eq!(records[0].index_id, index.id());
  OK
}

#[test]
fn test_zipf_run() -> Void {
  let mut sink = MemSink::new();
  let report = zipf_run(
    20_000,
    500,
    1.0,
    &[Conf::LeafSize(8), Conf::Iterations(2), Conf::Seed(7)],
    &mut sink,
  )?;
  assert_eq!(report.index.max_leaf, 8);
  assert_eq!(report.sizes, vec![100, 200, 1000, 2000]);

  // Only one height-specialized method survives / 仅保留一个定高方法
  let specialized = report
    .methods
    .iter()
    .filter(|m| m.contains("distribution_oriented"))
    .count();
  assert!(specialized <= 1);
  assert_eq!(report.reports.len(), report.methods.len() * report.sizes.len());
  assert_eq!(sink.len(), report.reports.len() * 2);
  assert!(report.reports.iter().all(|r| r.latency.count == 2));
  info!("zipf run: height {} methods {:?}", report.index.height, report.methods);
  OK
}

#[test]
fn test_clustered_run_jsonl() -> Void {
  let dir = std::env::temp_dir().join(format!("bts_bench_test_{}", fastrand::u64(..)));
  let mut sink = JsonlSink::create(&dir, "clustered")?;
  let report = clustered_run(
    4000,
    &[("aa", 0.3), ("bb", 0.7)],
    &[
      Conf::Sizes(vec![5, 50, 10_000]),
      Conf::Iterations(1),
      Conf::Methods(vec!["monkey".to_owned(), "sample_naive_random_walk".to_owned()]),
    ],
    &mut sink,
  )?;
  assert_eq!(report.index.method, Some(GenMethod::PrefixClusters));
  assert_eq!(sink.count(), 6);

  let text = std::fs::read_to_string(sink.path())?;
  let lines: Vec<&str> = text.lines().collect();
  assert_eq!(lines.len(), 6);
  let last: SampleStat<String> = sonic_rs::from_str(lines[5])?;
  assert_eq!(last.method, "sample_naive_random_walk");
  assert_eq!(last.requested, 10_000);
  assert_eq!(last.sample_size, report.index.len);
  assert!(last.values.iter().all(|v| v == "aa" || v == "bb"));

  let _ = std::fs::remove_dir_all(&dir);
  OK
}
