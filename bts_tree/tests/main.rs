//! B+ Tree tests / B+ 树测试

use aok::{OK, Void};
use bts_tree::{BTree, Conf, Error, Node};
use log::info;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

#[test]
fn basic_crud() -> Void {
  let mut tree = BTree::new();

  assert!(tree.put(b"key1".to_vec(), 100).is_none());
  assert!(tree.put(b"key2".to_vec(), 200).is_none());
  assert!(tree.put(b"key3".to_vec(), 300).is_none());

  assert_eq!(tree.get(&b"key1".to_vec()), Some(&100));
  assert_eq!(tree.get(&b"key2".to_vec()), Some(&200));
  assert_eq!(tree.get(&b"key3".to_vec()), Some(&300));
  assert!(tree.get(&b"key4".to_vec()).is_none());

  // Update / 更新
  assert_eq!(tree.put(b"key2".to_vec(), 250), Some(200));
  assert_eq!(tree.get(&b"key2".to_vec()), Some(&250));
  assert_eq!(tree.len(), 3);
  assert_eq!(tree.height(), 1);
  OK
}

#[test]
fn many_inserts() -> Void {
  let mut tree = BTree::with_conf(&[Conf::MaxLeaf(4), Conf::MaxInternal(4)]);

  // Reverse order to split on the left side / 逆序插入触发左侧分裂
  for i in (0..500u64).rev() {
    tree.put(format!("key:{i:05}"), i);
  }

  for i in 0..500u64 {
    let key = format!("key:{i:05}");
    assert_eq!(tree.get(&key), Some(&i), "key={key}");
  }
  assert_eq!(tree.len(), 500);
  assert!(tree.height() >= 4, "height={}", tree.height());
  info!("500 keys -> height {}, {} buckets", tree.height(), tree.bucket_count());
  OK
}

#[test]
fn iter_sorted() -> Void {
  let mut rng = fastrand::Rng::with_seed(7);
  let mut tree = BTree::with_conf(&[Conf::MaxLeaf(3)]);
  let mut expect = Vec::new();
  for _ in 0..2000 {
    let k = rng.u32(..10_000);
    tree.put(k, k as u64 * 2);
    expect.push(k);
  }
  expect.sort_unstable();
  expect.dedup();

  let got: Vec<u32> = tree.iter().map(|(k, _)| *k).collect();
  assert_eq!(got, expect);
  assert!(tree.iter().all(|(k, v)| *v == *k as u64 * 2));
  OK
}

#[test]
fn bucket_chain_links() -> Void {
  let tree: BTree<u32, ()> = BTree::with_conf(&[Conf::MaxLeaf(5)]);
  assert_eq!(tree.first_bucket().size(), 0);
  assert!(tree.first_bucket().next().is_none());

  let mut tree = tree;
  tree.update((0..100u32).map(|i| (i, ())));

  let mut bucket = tree.first_bucket();
  assert!(bucket.prev().is_none());
  let mut seen = bucket.size();
  while let Some(next) = bucket.next() {
    assert_eq!(next.prev().map(|b| b.id()), Some(bucket.id()));
    assert!(bucket.keys().last() < next.keys().first());
    seen += next.size();
    bucket = next;
  }
  assert_eq!(seen, 100);
  assert!(tree.buckets().all(|b| b.size() <= 5));
  OK
}

#[test]
fn node_access() -> Void {
  let mut tree = BTree::with_conf(&[Conf::MaxLeaf(2)]);
  tree.update([(1, 'a'), (2, 'b'), (3, 'c')]);
  assert_eq!(tree.height(), 2);

  match tree.node(tree.root())? {
    Node::Internal(n) => assert_eq!(n.children.len(), 2),
    Node::Leaf(_) => panic!("root should be internal"),
  }
  assert!(matches!(tree.leaf(tree.root()), Err(Error::NotLeaf(_))));
  assert!(matches!(tree.node(999), Err(Error::NoNode(999))));

  let first = tree.first_bucket();
  assert_eq!(tree.leaf(first.id())?.vals, vec!['a']);
  OK
}

#[test]
fn update_counts_new_keys() -> Void {
  let mut tree = BTree::new();
  assert_eq!(tree.update([(1, 1), (2, 2), (3, 3)]), 3);
  // Last write wins / 后写覆盖
  assert_eq!(tree.update([(2, 20), (4, 4)]), 1);
  assert_eq!(tree.get(&2), Some(&20));
  assert_eq!(tree.len(), 4);

  let collected: BTree<i32, i32> = (0..10).map(|i| (i, i)).collect();
  assert_eq!(collected.len(), 10);
  OK
}
