//! Many concurrent downloads with random outcomes.
//!
//! Invariants checked:
//! - every submission gets its own item and id
//! - every item settles as completed or error, never stuck downloading
//! - progress never exceeds 100 and completed items sit at 100

mod common;

use common::ScriptedBackend;
use quickrip::backend::Backend;
use quickrip::queue::{execute, DownloadQueue, DownloadStatus, QueueUpdate};
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_downloads_all_settle() {
    let scripted = Arc::new(ScriptedBackend {
        delay: Some(Duration::from_millis(2)),
        ..ScriptedBackend::default()
    });
    let backend: Arc<dyn Backend> = scripted.clone();

    let mut queue = DownloadQueue::new();
    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();
    let mut handles = Vec::new();
    let mut expected_failures = 0;

    let mut rng = rand::thread_rng();
    for n in 0..50 {
        let fails = rng.gen_bool(0.3);
        if fails {
            expected_failures += 1;
        }
        let url = if fails {
            format!("https://example.com/fail/{}", n)
        } else {
            format!("https://example.com/watch/{}", n)
        };

        let (id, request) = queue
            .submit(&url)
            .unwrap()
            .into_request(Default::default());
        handles.push(tokio::spawn(execute(
            Arc::clone(&backend),
            id,
            request,
            updates_tx.clone(),
        )));
    }
    drop(updates_tx);

    let ids: HashSet<_> = queue.items().iter().map(|item| item.id.clone()).collect();
    assert_eq!(ids.len(), 50);

    let mut finished = Vec::new();
    for handle in handles {
        finished.push(handle.await.unwrap());
    }
    while let Some(update) = updates_rx.recv().await {
        queue.apply(update);
    }

    let mut failure_notices = 0;
    for update in finished {
        assert!(matches!(update, QueueUpdate::Finished { .. }));
        if queue.apply(update).is_some_and(|notice| notice.is_error()) {
            failure_notices += 1;
        }
    }

    assert_eq!(failure_notices, expected_failures);
    assert_eq!(scripted.download_calls(), 50);
    for item in queue.items() {
        assert_ne!(item.status, DownloadStatus::Downloading);
        assert!(item.progress <= 100.0);
        if item.status == DownloadStatus::Completed {
            assert_eq!(item.progress, 100.0);
        }
    }
}

#[test]
fn test_download_on_current_thread_runtime() {
    let backend: Arc<dyn Backend> = Arc::new(ScriptedBackend::new());
    let mut queue = DownloadQueue::new();

    let result = tokio_test::block_on(queue.download(
        backend,
        "https://example.com/watch/1",
        Default::default(),
    ));

    let (id, _) = result.unwrap();
    assert_eq!(queue.get(&id).unwrap().status, DownloadStatus::Completed);
}
