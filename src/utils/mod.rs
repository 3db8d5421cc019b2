use async_trait::async_trait;
use tokio::task::JoinError;

mod await_futures;

pub use await_futures::{await_futures, PinFuture};

#[async_trait]
pub trait FutureUtil {
    type Item;
    type Error;

    async fn await_futures(self) -> Result<Vec<Self::Item>, Self::Error>;
}

#[async_trait]
impl<T, E> FutureUtil for Vec<PinFuture<T, E>>
where
    T: Send + 'static,
    E: From<JoinError> + Send + 'static,
{
    type Item = T;
    type Error = E;

    async fn await_futures(self) -> Result<Vec<Self::Item>, Self::Error> {
        await_futures(self).await
    }
}
