use async_trait::async_trait;
use log::{debug, trace};

use super::{check_status, read_json, CommentStore};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{BookId, Comment, CommentId, Draft};

/// Client for the comment store.
pub struct CommentsClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl CommentsClient {
    pub fn new(cfg: &Config) -> Result<CommentsClient, ApiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(CommentsClient {
            client,
            base_url: cfg.comments_base_url.clone(),
            token: cfg.comments_token.clone(),
        })
    }

    pub fn list_url(&self, book_id: &BookId) -> String {
        format!("{}/books/{}/comments/", self.base_url, book_id)
    }

    pub fn create_url(&self) -> String {
        format!("{}/comments", self.base_url)
    }

    pub fn delete_url(&self, comment_id: &CommentId) -> String {
        format!("{}/comments/{}", self.base_url, comment_id)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl CommentStore for CommentsClient {
    async fn list(&self, book_id: &BookId) -> Result<Vec<Comment>, ApiError> {
        trace!("CommentsClient::list({})", book_id);
        let url = self.list_url(book_id);

        debug!("GET {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;

        read_json(response).await
    }

    async fn create(&self, draft: &Draft) -> Result<(), ApiError> {
        trace!("CommentsClient::create({})", draft.book_id);
        let url = self.create_url();

        debug!("POST {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .json(draft)
            .send()
            .await?;

        check_status(response)?;

        Ok(())
    }

    async fn delete(&self, comment_id: &CommentId) -> Result<(), ApiError> {
        trace!("CommentsClient::delete({})", comment_id);
        let url = self.delete_url(comment_id);

        debug!("DELETE {}", url);

        let response = self.authorize(self.client.delete(&url)).send().await?;

        check_status(response)?;

        Ok(())
    }
}
