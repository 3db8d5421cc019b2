use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{Book, BookId, Comment, CommentId, Draft, Genre};

mod catalog;
mod comments;

pub use catalog::BooksCatalog;
pub use comments::CommentsClient;

/// Volume search by subject.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Books filed under a single subject. Never called with [`Genre::All`];
    /// the catalog view fans that out itself.
    async fn search(&self, genre: Genre) -> Result<Vec<Book>, ApiError>;
}

/// Remote store holding the reviews attached to books.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn list(&self, book_id: &BookId) -> Result<Vec<Comment>, ApiError>;

    async fn create(&self, draft: &Draft) -> Result<(), ApiError>;

    async fn delete(&self, comment_id: &CommentId) -> Result<(), ApiError>;
}

/// Turns a non-2xx response into [`ApiError::Status`].
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::status(status.as_u16(), response.url().as_str()))
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let url = response.url().to_string();
    let body = check_status(response)?.text().await?;

    debug!("{} answered {} bytes", url, body.len());

    serde_json::from_str::<T>(&body).map_err(|source| ApiError::Decode { url, source })
}
