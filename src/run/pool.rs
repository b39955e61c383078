//! Bounded worker pool with index-addressed output.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use futures::FutureExt;

/// Runs `work` over every item with at most `concurrency` items in flight.
///
/// Workers are spawned as Tokio tasks and claim the next index from a shared
/// cursor until the list is exhausted. Output slot `i` always belongs to
/// `items[i]`, whatever order the work completes in. A slot is `None` only if
/// the work for that item panicked.
///
/// A `concurrency` of 0 is treated as 1.
pub async fn map_with_concurrency<T, R, F, Fut>(
    items: Vec<T>,
    concurrency: usize,
    work: F,
) -> Vec<Option<R>>
where
    T: Send + Sync + 'static,
    R: Send + 'static,
    F: Fn(usize, &T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let total = items.len();
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();
    if total == 0 {
        return slots;
    }

    let items = Arc::new(items);
    let work = Arc::new(work);
    let cursor = Arc::new(AtomicUsize::new(0));
    let worker_count = concurrency.max(1).min(total);

    let workers = (0..worker_count).map(|_| {
        let items = Arc::clone(&items);
        let work = Arc::clone(&work);
        let cursor = Arc::clone(&cursor);
        tokio::spawn(async move {
            let mut done = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::SeqCst);
                let Some(item) = items.get(index) else {
                    break;
                };
                match AssertUnwindSafe((*work)(index, item)).catch_unwind().await {
                    Ok(result) => done.push((index, result)),
                    Err(_) => log::warn!("Work for item {} panicked", index),
                }
            }
            done
        })
    });

    for joined in join_all(workers).await {
        match joined {
            Ok(done) => {
                for (index, result) in done {
                    slots[index] = Some(result);
                }
            }
            Err(join_error) => log::warn!("Worker task failed: {:?}", join_error),
        }
    }

    slots
}
