use log::{debug, info};

use crate::api::CommentStore;
use crate::error::{ApiError, Failure};
use crate::models::{BookId, Comment, CommentId, Draft, Rating};
use crate::stage::{self, PanelStage};

/// Things the owner of a panel has to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// A fresh comment list for the book was read from the store.
    CommentsLoaded { book_id: BookId, count: usize },
    /// A review for the book was accepted by the store.
    ReviewSubmitted(BookId),
}

/// Review lifecycle of one expanded book: its comments, the draft form and
/// the status banners.
#[derive(Debug)]
pub struct ReviewPanel {
    book_id: BookId,
    comments: Vec<Comment>,
    draft: Draft,
    error: Option<String>,
    success: Option<String>,
    stage: PanelStage,
}

impl ReviewPanel {
    pub fn new(book_id: BookId) -> ReviewPanel {
        ReviewPanel {
            draft: Draft::empty(book_id.clone()),
            book_id,
            comments: vec![],
            error: None,
            success: None,
            stage: PanelStage::Idle,
        }
    }

    /// Creates the panel and loads its comments right away.
    pub async fn open(book_id: BookId, store: &dyn CommentStore) -> (ReviewPanel, Option<PanelEvent>) {
        let mut panel = ReviewPanel::new(book_id);
        let event = panel.load(store).await;
        (panel, event)
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn stage(&self) -> PanelStage {
        self.stage
    }

    pub fn set_text(&mut self, body: impl Into<String>) {
        self.draft.body = body.into();
    }

    pub fn set_rating(&mut self, value: u8) -> anyhow::Result<Rating> {
        let rating = Rating::try_from(value)?;
        self.draft.rating = rating;
        Ok(rating)
    }

    /// Points the panel at another book: comments and draft are dropped and
    /// reloaded for the new id.
    pub async fn retarget(&mut self, book_id: BookId, store: &dyn CommentStore) -> Option<PanelEvent> {
        if book_id == self.book_id {
            return None;
        }

        *self = ReviewPanel::new(book_id);
        self.load(store).await
    }

    /// Replaces the comment list with the store's current one. On failure
    /// the previous list stays and the load banner is raised.
    pub async fn load(&mut self, store: &dyn CommentStore) -> Option<PanelEvent> {
        self.transition(PanelStage::Loading);

        match store.list(&self.book_id).await {
            Ok(comments) => {
                debug!("{} comments for {}", comments.len(), self.book_id);
                let count = comments.len();
                self.comments = comments;
                self.transition(PanelStage::Loaded);

                Some(PanelEvent::CommentsLoaded {
                    book_id: self.book_id.clone(),
                    count,
                })
            }
            Err(err) => {
                self.report(Failure::LoadFailed, Some(&err));
                self.transition(PanelStage::LoadFailed);
                None
            }
        }
    }

    /// Sends the draft. On success the list is reloaded, the draft reset and
    /// a [`PanelEvent::ReviewSubmitted`] handed back; on failure the draft is
    /// kept for another try.
    pub async fn submit(&mut self, store: &dyn CommentStore) -> Vec<PanelEvent> {
        let mut events = vec![];

        if self.draft.is_blank() {
            self.report(Failure::EmptyReview, None);
            return events;
        }

        let resting = self.resting();
        self.transition(PanelStage::Submitting);

        match store.create(&self.draft).await {
            Ok(()) => {
                info!("review for {} sent", self.book_id);
                self.draft = Draft::empty(self.book_id.clone());
                self.announce("Review sent successfully.");
                events.extend(self.load(store).await);
                events.push(PanelEvent::ReviewSubmitted(self.book_id.clone()));
            }
            Err(err) => {
                self.report(Failure::SubmitFailed, Some(&err));
                self.transition(resting);
            }
        }

        events
    }

    /// Deletes a comment and reloads. Nothing is removed locally before the
    /// store confirms.
    pub async fn delete(&mut self, comment_id: &CommentId, store: &dyn CommentStore) -> Option<PanelEvent> {
        let resting = self.resting();
        self.transition(PanelStage::Deleting);

        match store.delete(comment_id).await {
            Ok(()) => {
                info!("comment {} on {} deleted", comment_id, self.book_id);
                self.announce("Comment deleted.");
                self.load(store).await
            }
            Err(err) => {
                self.report(Failure::DeleteFailed, Some(&err));
                self.transition(resting);
                None
            }
        }
    }

    fn resting(&self) -> PanelStage {
        match self.stage {
            PanelStage::Idle => PanelStage::Idle,
            PanelStage::LoadFailed => PanelStage::LoadFailed,
            _ => PanelStage::Loaded,
        }
    }

    fn transition(&mut self, next: PanelStage) {
        self.stage = next;
        stage::update(&self.book_id, next);
    }

    fn announce(&mut self, message: &str) {
        self.success = Some(message.to_string());
        self.error = None;
    }

    /// Single path for every failure, whether the request never got an
    /// answer or got a non-2xx one.
    fn report(&mut self, failure: Failure, err: Option<&ApiError>) {
        if let Some(err) = err {
            stage::fail(&self.book_id, failure, err);
        }
        self.error = Some(failure.message().to_string());
    }
}
