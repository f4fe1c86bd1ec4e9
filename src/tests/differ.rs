use super::Differ;
use crate::diff::EditOp;
use crate::node::Node;
use crate::support::{item, keys, Item};
use std::time::Duration;
use tokio::runtime::Handle;

fn items(names: &[&str]) -> Vec<Item> {
    names.iter().map(|k| item(k)).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_first_submission_inserts_everything() {
    let mut differ = Differ::new(Handle::current());
    differ.submit(items(&["a", "b"]));
    assert!(differ.is_pending());

    let script = differ.next().await.expect("script delivered");
    assert_eq!(script.structural_len(), 2);
    assert!(script
        .ops()
        .iter()
        .all(|op| matches!(op, EditOp::Insert { .. })));
    assert!(!differ.is_pending());
    assert_eq!(keys(differ.delivered()), vec!["a", "b"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_next_without_submission_returns_none() {
    let mut differ: Differ<Item> = Differ::new(Handle::current());
    assert!(differ.next().await.is_none());
    assert!(differ.try_next().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_superseded_submission_is_never_delivered() {
    let mut differ = Differ::new(Handle::current());
    let first = differ.submit(items(&["a", "b", "c"]));
    let second = differ.submit(items(&["x", "y"]));
    assert!(second > first);

    let script = differ.next().await.expect("newest script delivered");
    let mut rendered = Vec::new();
    script.apply(&mut rendered);
    assert_eq!(keys(&rendered), vec!["x", "y"]);

    // Give any straggling computation time to land; it must be dropped.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(differ.try_next().is_none());
    assert!(!differ.is_pending());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scripts_compose_from_last_delivery() {
    let mut differ = Differ::new(Handle::current());
    let mut rendered: Vec<Item> = Vec::new();

    differ.submit(items(&["a", "b", "c"]));
    differ.next().await.expect("first").apply(&mut rendered);

    differ.submit(items(&["c", "a", "d"]));
    differ.next().await.expect("second").apply(&mut rendered);

    assert_eq!(keys(&rendered), vec!["c", "a", "d"]);
    assert_eq!(keys(differ.delivered()), keys(&rendered));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_try_next_picks_up_finished_work() {
    let mut differ = Differ::new(Handle::current());
    differ.submit(items(&["a"]));

    let mut script = None;
    for _ in 0..100 {
        script = differ.try_next();
        if script.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(script.map(|s| s.structural_len()), Some(1));
}

/// Item whose content comparison blows up, standing in for a diff that never finishes.
#[derive(Clone, Debug)]
struct Fragile {
    key: String,
    explode: bool,
}

impl Node for Fragile {
    fn key(&self) -> &str {
        &self.key
    }

    fn content_eq(&self, other: &Self) -> bool {
        assert!(!self.explode && !other.explode, "content comparison failed");
        true
    }
}

fn fragile(key: &str, explode: bool) -> Fragile {
    Fragile {
        key: key.to_string(),
        explode,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_worker_does_not_hang_next() {
    let mut differ = Differ::new(Handle::current());
    differ.submit(vec![fragile("a", false)]);
    assert!(differ.next().await.is_some());

    differ.submit(vec![fragile("a", true)]);
    let outcome = tokio::time::timeout(Duration::from_secs(5), differ.next()).await;
    assert!(matches!(outcome, Ok(None)));
    assert!(differ.is_pending());

    // The next submission recovers.
    differ.submit(vec![fragile("b", false)]);
    let script = differ.next().await.expect("script after recovery");
    assert_eq!(script.structural_len(), 2);
    assert_eq!(keys(differ.delivered()), vec!["b"]);
}
