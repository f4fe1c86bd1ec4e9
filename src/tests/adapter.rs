use super::{SectionAdapter, ViewLayer};
use crate::config::Config;
use crate::diff::EditOp;
use crate::error::{Error, Mode};
use crate::flatten::{Boundary, BoundaryRange};
use crate::node::{Entry, ItemKind, Section};
use crate::support::{item, keys, section, Item};
use crate::swipe::{SwipeDirection, SwipeOutcome};
use tokio::runtime::Handle;

type View = Vec<Entry<Item, Item>>;

fn adapter(config: Config) -> SectionAdapter<Item, Item> {
    SectionAdapter::new(config, Handle::current())
}

/// Apply scripts until the newest submission has reached the view.
async fn settle(adapter: &mut SectionAdapter<Item, Item>, view: &mut View) -> usize {
    let mut applied = 0;
    while let Some(script) = adapter.next_edit_script().await {
        view.apply_edit_script(&script);
        applied += 1;
    }
    applied
}

#[tokio::test(flavor = "multi_thread")]
async fn test_view_follows_submissions() {
    let mut adapter = adapter(Config::default());
    let mut view = View::new();

    adapter
        .submit_sections(vec![section("a", 2), section("b", 1)])
        .unwrap();
    assert!(adapter.is_pending());
    assert_eq!(settle(&mut adapter, &mut view).await, 1);
    assert_eq!(keys(&view), vec!["a", "a.0", "a.1", "b", "b.0"]);

    adapter
        .submit_sections(vec![section("b", 2), section("a", 1)])
        .unwrap();
    settle(&mut adapter, &mut view).await;
    assert_eq!(keys(&view), keys(adapter.entries()));
    assert_eq!(keys(adapter.rendered()), keys(&view));
    assert!(!adapter.is_pending());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rapid_submissions_deliver_only_the_latest() {
    let mut adapter = adapter(Config::default());
    let mut view = View::new();

    adapter.submit_nodes(vec![item("a"), item("b")]).unwrap();
    adapter.submit_nodes(vec![item("c")]).unwrap();
    adapter.submit_nodes(vec![item("d"), item("e")]).unwrap();

    assert_eq!(settle(&mut adapter, &mut view).await, 1);
    assert_eq!(keys(&view), vec!["d", "e"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mode_is_fixed_by_first_submission() {
    let mut adapter = adapter(Config::default());
    assert_eq!(adapter.mode(), None);

    adapter.submit_sections(vec![section("a", 1)]).unwrap();
    assert_eq!(adapter.mode(), Some(Mode::Sections));
    assert_eq!(
        adapter.submit_nodes(vec![item("x")]),
        Err(Error::ModeMismatch {
            established: Mode::Sections,
            attempted: Mode::Nodes
        })
    );
    assert_eq!(keys(adapter.entries()), vec!["a", "a.0"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_keys_leave_state_untouched() {
    let mut adapter = adapter(Config::default());
    let mut view = View::new();
    adapter.submit_sections(vec![section("a", 1)]).unwrap();
    settle(&mut adapter, &mut view).await;

    let colliding = vec![
        section("a", 1),
        Section::new(item("b"), vec![item("a")]),
    ];
    assert_eq!(
        adapter.submit_sections(colliding),
        Err(Error::DuplicateKey {
            key: "a".to_string()
        })
    );
    assert!(!adapter.is_pending());
    assert_eq!(keys(adapter.entries()), vec!["a", "a.0"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_toggle_produces_one_script() {
    let mut adapter = adapter(Config::default());
    let mut view = View::new();
    adapter
        .submit_sections(vec![section("a", 2).collapsible(true), section("b", 1)])
        .unwrap();
    settle(&mut adapter, &mut view).await;

    assert_eq!(adapter.toggle_collapse("a"), Ok(true));
    let script = adapter.next_edit_script().await.unwrap();
    assert_eq!(script.structural_len(), 2);
    assert!(script.ops().iter().any(|op| matches!(
        op,
        EditOp::Update {
            position: 0,
            item: Entry::Section {
                collapsed: true,
                ..
            }
        }
    )));
    view.apply_edit_script(&script);
    assert_eq!(keys(&view), vec!["a", "b", "b.0"]);
    assert!(adapter.next_edit_script().await.is_none());

    assert_eq!(adapter.toggle_collapse("a"), Ok(true));
    settle(&mut adapter, &mut view).await;
    assert_eq!(keys(&view), vec!["a", "a.0", "a.1", "b", "b.0"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_toggle_rules() {
    let mut adapter = adapter(Config::default());
    adapter.submit_sections(vec![section("a", 1)]).unwrap();

    assert_eq!(adapter.toggle_collapse("a"), Ok(false));
    assert_eq!(
        adapter.toggle_collapse("zzz"),
        Err(Error::UnknownSection {
            key: "zzz".to_string()
        })
    );

    adapter.set_collapsible("a", true).unwrap();
    assert_eq!(adapter.toggle_collapse("a"), Ok(true));
    assert_eq!(adapter.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_collapse_state_survives_resubmission() {
    let mut adapter = adapter(Config::default());
    adapter
        .submit_sections(vec![section("a", 2).collapsible(true)])
        .unwrap();
    adapter.toggle_collapse("a").unwrap();

    adapter
        .submit_sections(vec![
            section("a", 3).collapsible(true),
            section("b", 1).collapsible(true).collapsed_by_default(true),
        ])
        .unwrap();
    assert_eq!(keys(adapter.entries()), vec!["a", "b"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_drag_reaches_the_view() {
    let mut adapter = adapter(Config {
        movable_nodes: true,
        ..Config::default()
    });
    let mut view = View::new();
    adapter
        .submit_sections(vec![section("a", 3), section("b", 1)])
        .unwrap();
    settle(&mut adapter, &mut view).await;

    assert!(adapter.can_be_moved(1));
    assert!(!adapter.can_be_moved(0));
    assert!(adapter.request_move(1, 2));
    assert!(adapter.is_dragging());
    assert!(adapter.request_move(2, 3));
    assert!(!adapter.request_move(3, 5));

    settle(&mut adapter, &mut view).await;
    assert_eq!(keys(&view), vec!["a", "a.1", "a.2", "a.0", "b", "b.0"]);

    let moved = adapter.end_drag().unwrap();
    assert_eq!((moved.from, moved.to), (1, 3));
    assert!(!adapter.is_dragging());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_swipe_policy_and_settle() {
    let mut adapter = adapter(Config {
        swipeable_nodes: true,
        ..Config::default()
    });
    adapter
        .submit_sections(vec![section("a", 1), section("b", 1)])
        .unwrap();

    assert_eq!(
        adapter.request_swipe(0, 0.0, 50.0, 10.0),
        SwipeOutcome::NotAllowed
    );
    assert_eq!(
        adapter.request_swipe(1, 0.0, 50.0, 10.0),
        SwipeOutcome::Dismiss {
            direction: SwipeDirection::TowardEnd,
            swipe_back: false
        }
    );
    assert_eq!(
        adapter.settle_direction(50.0),
        Some(SwipeDirection::TowardEnd)
    );

    assert_eq!(
        adapter.request_swipe(3, 0.0, 5.0, 10.0),
        SwipeOutcome::Cancelled
    );
    assert_eq!(adapter.settle_direction(5.0), None);

    adapter.config_mut().swipe_back = true;
    assert!(adapter.swipe_back(3));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dataset_queries() {
    let mut adapter = adapter(Config::default());
    assert!(adapter.is_empty());
    adapter
        .submit_sections(vec![section("a", 2), section("b", 0)])
        .unwrap();

    assert_eq!(adapter.len(), 4);
    assert_eq!(adapter.item_kind(0), Some(ItemKind::Section));
    assert_eq!(adapter.item_kind(1), Some(ItemKind::Node));
    assert_eq!(adapter.item_kind(9), None);
    assert_eq!(
        adapter.boundary(1),
        Boundary::Bounded(BoundaryRange { start: 0, end: 2 })
    );
    assert_eq!(
        adapter.boundary(3),
        Boundary::Bounded(BoundaryRange { start: 3, end: 3 })
    );
    assert_eq!(adapter.sections().map(<[_]>::len), Some(2));
    assert!(adapter.nodes().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dispatch_applies_ready_scripts() {
    let mut adapter = adapter(Config::default());
    let mut view = View::new();
    adapter.submit_nodes(vec![item("a"), item("b")]).unwrap();

    let mut applied = 0;
    for _ in 0..100 {
        applied += adapter.dispatch(&mut view);
        if !adapter.is_pending() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(applied, 1);
    assert_eq!(keys(&view), vec!["a", "b"]);
    assert_eq!(adapter.boundary(0), Boundary::Unbounded);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resubmission_abandons_drag() {
    let mut adapter = adapter(Config {
        movable_nodes: true,
        ..Config::default()
    });
    adapter
        .submit_sections(vec![section("a", 3), section("b", 1)])
        .unwrap();
    assert!(adapter.request_move(1, 2));

    adapter
        .submit_sections(vec![section("b", 1), section("a", 3)])
        .unwrap();
    assert!(!adapter.is_dragging());
    assert_eq!(adapter.end_drag(), None);

    // A fresh gesture anchors on the new layout.
    assert!(adapter.request_move(3, 4));
    assert_eq!(adapter.end_drag().map(|m| (m.from, m.to)), Some((3, 4)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_toggle_abandons_drag() {
    let mut adapter = adapter(Config {
        movable_nodes: true,
        ..Config::default()
    });
    adapter
        .submit_sections(vec![section("a", 2).collapsible(true), section("b", 2)])
        .unwrap();
    assert!(adapter.request_move(4, 5));

    assert_eq!(adapter.toggle_collapse("a"), Ok(true));
    assert!(!adapter.is_dragging());
    assert_eq!(adapter.end_drag(), None);
}
