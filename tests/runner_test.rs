mod common;

use std::collections::BTreeSet;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use common::MockPip;
use pip_purge::types::{Progress, ProtectedSet, RunPhase, TaskEvent};
use pip_purge::ui::tasks::{spawn_uninstall_all, UninstallTask};
use proptest::prelude::*;

fn run_with(pm: MockPip) -> (Arc<MockPip>, Vec<TaskEvent>) {
    let pm = Arc::new(pm);
    let (tx, rx) = mpsc::channel();
    let task = UninstallTask::new(pm.clone(), ProtectedSet::default());
    assert_eq!(task.phase(), RunPhase::Idle);
    let phase = task.run(&tx);
    assert_eq!(phase, RunPhase::Completed);
    drop(tx);
    (pm, rx.iter().collect())
}

fn completion(events: &[TaskEvent]) -> (bool, String) {
    let completed: Vec<&TaskEvent> = events.iter().filter(|e| e.is_completed()).collect();
    assert_eq!(completed.len(), 1, "exactly one Completed per run: {:?}", events);
    assert!(events.last().unwrap().is_completed(), "Completed must be last");
    match events.last().unwrap() {
        TaskEvent::Completed { success, summary } => (*success, summary.clone()),
        _ => unreachable!(),
    }
}

fn outputs(events: &[TaskEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            TaskEvent::Output(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn progress(events: &[TaskEvent]) -> Vec<Progress> {
    events
        .iter()
        .filter_map(|e| match e {
            TaskEvent::Progress(p) => Some(*p),
            _ => None,
        })
        .collect()
}

#[test]
fn test_all_packages_removed() {
    let (pm, events) = run_with(MockPip::with_freeze(&["foo==1.0", "bar==2.1", "pip==23.0"]));
    let (success, summary) = completion(&events);
    assert!(success);
    assert_eq!(summary, "Successfully uninstalled 2 packages!");
    assert_eq!(pm.uninstall_calls(), vec!["foo", "bar"]);
}

#[test]
fn test_one_failure_is_reported_and_loop_continues() {
    let pm = MockPip::with_freeze(&["foo==1.0", "bar==2.1", "pip==23.0"])
        .failing("bar", "ERROR: Cannot uninstall bar, RECORD file not found.");
    let (pm, events) = run_with(pm);

    let out = outputs(&events);
    assert!(out.iter().any(|l| l.contains("foo") && l.contains("✓")));
    assert!(out
        .iter()
        .any(|l| l.contains("bar") && l.contains("✗") && l.contains("RECORD file not found")));

    let p = progress(&events);
    assert_eq!(p.first(), Some(&Progress::Indeterminate));
    assert!(p.contains(&Progress::Determinate { current: 1, total: 2 }));
    assert!(p.contains(&Progress::Determinate { current: 2, total: 2 }));
    let one = p.iter().position(|x| *x == Progress::Determinate { current: 1, total: 2 });
    let two = p.iter().position(|x| *x == Progress::Determinate { current: 2, total: 2 });
    assert!(one < two);

    let (success, summary) = completion(&events);
    assert!(!success);
    assert!(summary.contains("bar"));
    assert!(!summary.contains("foo"));
    assert_eq!(pm.uninstall_calls(), vec!["foo", "bar"]);
}

#[test]
fn test_progress_precedes_each_uninstall_line() {
    let (_, events) = run_with(MockPip::with_freeze(&["a==1", "b==1", "c==1"]));
    for (i, name) in ["a", "b", "c"].iter().enumerate() {
        let start = format!("[{}/3] Uninstalling {}...", i + 1, name);
        let line_at = events
            .iter()
            .position(|e| *e == TaskEvent::Output(start.clone()))
            .expect("starting line");
        let progress_at = events
            .iter()
            .position(|e| {
                *e == TaskEvent::Progress(Progress::Determinate {
                    current: i + 1,
                    total: 3,
                })
            })
            .expect("progress event");
        assert!(progress_at < line_at);
    }
}

#[test]
fn test_empty_list_never_removes() {
    let (pm, events) = run_with(MockPip::with_freeze(&["pip==23.0", "setuptools==69.0", "wheel==0.42.0"]));
    let (success, summary) = completion(&events);
    assert!(success);
    assert_eq!(summary, "No packages to uninstall");
    assert!(pm.uninstall_calls().is_empty());
    assert_eq!(pm.list_calls(), 1);
    assert!(!progress(&events)
        .iter()
        .any(|p| matches!(p, Progress::Determinate { .. })));
}

#[test]
fn test_list_failure_stops_run() {
    let pm = MockPip {
        list_fails_with: Some("pip: broken environment".into()),
        ..Default::default()
    };
    let (pm, events) = run_with(pm);
    let (success, summary) = completion(&events);
    assert!(!success);
    assert_eq!(summary, "Failed to get package list");
    assert!(pm.uninstall_calls().is_empty());
    assert!(outputs(&events)
        .iter()
        .any(|l| l.contains("Failed to get package list") && l.contains("broken environment")));
}

#[test]
fn test_list_launch_failure_becomes_completion() {
    let pm = MockPip {
        list_launch_error: true,
        ..Default::default()
    };
    let (pm, events) = run_with(pm);
    let (success, summary) = completion(&events);
    assert!(!success);
    assert!(summary.starts_with("Error:"));
    assert!(summary.contains("python not found"));
    assert!(pm.uninstall_calls().is_empty());
}

#[test]
fn test_uninstall_launch_failure_becomes_completion() {
    let pm = MockPip {
        launch_error_on: Some("b".into()),
        ..MockPip::with_freeze(&["a==1", "b==1", "c==1"])
    };
    let (pm, events) = run_with(pm);
    let (success, summary) = completion(&events);
    assert!(!success);
    assert!(summary.starts_with("Error:"));
    assert!(summary.contains("b"));
    assert_eq!(pm.uninstall_calls(), vec!["a", "b"]);
}

#[test]
fn test_backend_panic_still_completes_once() {
    let pm = MockPip {
        panic_on: Some("boom".into()),
        ..MockPip::with_freeze(&["ok==1", "boom==1", "later==1"])
    };
    let (pm, events) = run_with(pm);
    let (success, summary) = completion(&events);
    assert!(!success);
    assert!(summary.contains("backend exploded on boom"));
    assert_eq!(pm.uninstall_calls(), vec!["ok", "boom"]);
}

#[test]
fn test_spawned_run_delivers_events_in_order() {
    let pm = Arc::new(MockPip::with_freeze(&["foo==1.0", "bar==2.1"]));
    let (tx, rx) = mpsc::channel();
    spawn_uninstall_all(pm.clone(), ProtectedSet::default(), tx);

    let mut events = Vec::new();
    loop {
        let event = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("runner should finish");
        let done = event.is_completed();
        events.push(event);
        if done {
            break;
        }
    }
    // channel closes once the worker is gone
    assert!(rx.recv_timeout(Duration::from_secs(10)).is_err());

    let (success, _) = completion(&events);
    assert!(success);
    assert_eq!(
        progress(&events),
        vec![
            Progress::Indeterminate,
            Progress::Determinate { current: 0, total: 2 },
            Progress::Determinate { current: 1, total: 2 },
            Progress::Determinate { current: 2, total: 2 },
        ]
    );
}

fn failure_case() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::btree_set("[a-z]{3,8}", 0..8).prop_flat_map(|names| {
        let names: Vec<String> = names
            .into_iter()
            .filter(|n| !ProtectedSet::default().contains(n))
            .collect();
        let n = names.len();
        (Just(names), prop::collection::vec(any::<bool>(), n))
            .prop_map(|(names, fails)| names.into_iter().zip(fails).collect::<Vec<(String, bool)>>())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_summary_names_exactly_the_failures(case in failure_case()) {
        let freeze: Vec<String> = case.iter().map(|(n, _)| format!("{}==1.0", n)).collect();
        let mut pm = MockPip {
            freeze: freeze.join("\n"),
            ..Default::default()
        };
        for (name, fails) in &case {
            if *fails {
                pm = pm.failing(name, "ERROR: nope");
            }
        }
        let (pm, events) = run_with(pm);
        let (success, summary) = completion(&events);

        let failed: BTreeSet<&str> = case.iter().filter(|(_, f)| *f).map(|(n, _)| n.as_str()).collect();
        prop_assert_eq!(success, failed.is_empty());
        prop_assert_eq!(pm.uninstall_calls().len(), case.len());

        if case.is_empty() {
            prop_assert_eq!(summary, "No packages to uninstall");
        } else if failed.is_empty() {
            prop_assert_eq!(summary, format!("Successfully uninstalled {} packages!", case.len()));
        } else {
            let (head, list) = summary.split_once(": ").unwrap();
            prop_assert_eq!(head, format!("Failed to uninstall {} packages", failed.len()));
            let named: BTreeSet<&str> = list.split(", ").collect();
            prop_assert_eq!(named, failed);
        }
    }
}
