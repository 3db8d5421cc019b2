use std::future::Future;
use std::pin::Pin;

use log::{debug, error};
use tokio::sync::mpsc;
use tokio::task::JoinError;

pub type PinFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// Runs every future on its own task and collects the results in the order
/// the futures were given, whatever order they complete in.
///
/// The first error aborts the tasks still running and is returned as is.
pub async fn await_futures<T, E>(futures: Vec<PinFuture<T, E>>) -> Result<Vec<T>, E>
where
    T: Send + 'static,
    E: From<JoinError> + Send + 'static,
{
    let futures_len = futures.len();
    let (tx, mut rx) = mpsc::channel::<(usize, Result<T, E>)>(futures_len.max(1));

    let mut threads: Vec<tokio::task::JoinHandle<()>> = vec![];

    for (slot, future) in futures.into_iter().enumerate() {
        let tx = tx.clone();
        let thread = tokio::spawn(async move {
            let awaited = future.await;

            if tx.send((slot, awaited)).await.is_err() {
                error!("result for slot {} arrived after the receiver went away", slot);
            }
        });

        threads.push(thread);
    }
    drop(tx);

    let mut slots: Vec<Option<T>> = (0..futures_len).map(|_| None).collect();
    let mut filled = 0;

    while filled < futures_len {
        match rx.recv().await {
            Some((slot, Ok(value))) => {
                debug!("slot {} resolved", slot);
                slots[slot] = Some(value);
                filled += 1;
            }
            Some((slot, Err(err))) => {
                debug!("slot {} failed, aborting the rest", slot);
                for thread in threads {
                    thread.abort();
                }
                return Err(err);
            }
            // every sender is gone, so some task died before reporting
            None => break,
        }
    }

    for thread in threads {
        thread.await?;
    }

    Ok(slots.into_iter().flatten().collect())
}
