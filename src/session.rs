use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

use crate::api::{CatalogApi, CommentStore};
use crate::catalog::{fetch_books, Applied, CatalogView, FetchTicket, Origin, Toggle};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Book, BookId, CommentId, Genre};
use crate::review::{PanelEvent, ReviewPanel};

/// A finished catalog fetch, on its way back to the session.
#[derive(Debug)]
pub struct CatalogReply {
    pub ticket: FetchTicket,
    pub result: Result<Vec<Book>, ApiError>,
}

/// Owns the catalog view and the review panel of the expanded book, and
/// routes what the panel reports back into the catalog.
pub struct Session {
    catalog: CatalogView,
    panel: Option<ReviewPanel>,
    catalog_api: Arc<dyn CatalogApi>,
    store: Arc<dyn CommentStore>,
    replies: mpsc::UnboundedSender<CatalogReply>,
}

impl Session {
    pub fn new(
        cfg: &Config,
        catalog_api: Arc<dyn CatalogApi>,
        store: Arc<dyn CommentStore>,
    ) -> (Session, mpsc::UnboundedReceiver<CatalogReply>) {
        let (replies, rx) = mpsc::unbounded_channel();

        let session = Session {
            catalog: CatalogView::new(cfg.count_max_age),
            panel: None,
            catalog_api,
            store,
            replies,
        };

        (session, rx)
    }

    pub fn catalog(&self) -> &CatalogView {
        &self.catalog
    }

    pub fn panel(&self) -> Option<&ReviewPanel> {
        self.panel.as_ref()
    }

    /// Starts fetching `genre` in the background. The reply arrives on the
    /// receiver handed out by [`Session::new`] and must be passed to
    /// [`Session::on_catalog_reply`]; replies for older selections are
    /// discarded there.
    pub fn select_genre(&mut self, genre: Genre) -> FetchTicket {
        let ticket = self.catalog.begin_select(genre);
        let api = self.catalog_api.clone();
        let replies = self.replies.clone();

        tokio::spawn(async move {
            let result = fetch_books(api, genre).await;

            if replies.send(CatalogReply { ticket, result }).is_err() {
                debug!("session gone before {} results arrived", genre);
            }
        });

        ticket
    }

    pub fn on_catalog_reply(&mut self, reply: CatalogReply) -> Applied {
        let applied = self.catalog.apply(reply.ticket, reply.result);

        if self.catalog.expanded().is_none() && self.panel.is_some() {
            debug!("expanded book left the list, closing its panel");
            self.panel = None;
        }

        applied
    }

    /// Flips the expanded book and opens or closes the review panel to match.
    pub async fn toggle(&mut self, id: &BookId, origin: Origin) -> Toggle {
        let toggle = self.catalog.toggle_expansion(id, origin);

        match toggle {
            Toggle::Expanded => {
                let store = self.store.clone();
                let event = if let Some(panel) = self.panel.as_mut() {
                    panel.retarget(id.clone(), &*store).await
                } else {
                    let (panel, event) = ReviewPanel::open(id.clone(), &*store).await;
                    self.panel = Some(panel);
                    event
                };
                self.dispatch(event);
            }
            Toggle::Collapsed => self.panel = None,
            Toggle::Suppressed | Toggle::Unknown => {}
        }

        toggle
    }

    pub fn set_draft_text(&mut self, body: impl Into<String>) -> anyhow::Result<()> {
        self.panel_mut()?.set_text(body);
        Ok(())
    }

    pub fn set_draft_rating(&mut self, value: u8) -> anyhow::Result<()> {
        self.panel_mut()?.set_rating(value)?;
        Ok(())
    }

    pub async fn submit(&mut self) -> anyhow::Result<()> {
        let store = self.store.clone();
        let events = self.panel_mut()?.submit(&*store).await;

        for event in events {
            self.dispatch(Some(event));
        }

        Ok(())
    }

    pub async fn delete(&mut self, comment_id: &CommentId) -> anyhow::Result<()> {
        let store = self.store.clone();
        let event = self.panel_mut()?.delete(comment_id, &*store).await;

        self.dispatch(event);

        Ok(())
    }

    fn panel_mut(&mut self) -> anyhow::Result<&mut ReviewPanel> {
        self.panel
            .as_mut()
            .ok_or_else(|| anyhow::Error::msg("no book is open for review"))
    }

    fn dispatch(&mut self, event: Option<PanelEvent>) {
        match event {
            Some(PanelEvent::ReviewSubmitted(book_id)) => {
                let n = self.catalog.record_review_submitted(&book_id);
                debug!("{} reviews sent for {} this session", n, book_id);
            }
            Some(PanelEvent::CommentsLoaded { book_id, count }) => {
                self.catalog.refresh_review_count(&book_id, count);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::Session;
    use crate::api::{CatalogApi, CommentStore};
    use crate::catalog::{Applied, Origin, Toggle};
    use crate::config::Config;
    use crate::error::ApiError;
    use crate::models::{Book, BookId, Comment, CommentId, Draft, Genre};

    fn book(id: &str) -> Book {
        Book {
            id: BookId::new(id),
            title: format!("Title {}", id),
            authors: vec![],
            thumbnail: None,
        }
    }

    struct SlowCatalog;

    #[async_trait]
    impl CatalogApi for SlowCatalog {
        async fn search(&self, genre: Genre) -> Result<Vec<Book>, ApiError> {
            match genre {
                Genre::Sports => {
                    tokio::time::sleep(Duration::from_millis(80)).await;
                    Ok(vec![book("b1")])
                }
                Genre::Fiction => Ok(vec![book("f1"), book("f2")]),
                _ => Ok(vec![]),
            }
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        comments: Mutex<Vec<Comment>>,
    }

    #[async_trait]
    impl CommentStore for MemoryStore {
        async fn list(&self, book_id: &BookId) -> Result<Vec<Comment>, ApiError> {
            Ok(self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.book_id.as_ref() == Some(book_id))
                .cloned()
                .collect())
        }

        async fn create(&self, draft: &Draft) -> Result<(), ApiError> {
            let mut comments = self.comments.lock().unwrap();
            let id = CommentId::new(format!("c{}", comments.len() + 1));
            comments.push(Comment {
                id,
                comment: draft.body.clone(),
                rate: Some(i64::from(draft.rating.get())),
                book_id: Some(draft.book_id.clone()),
            });
            Ok(())
        }

        async fn delete(&self, comment_id: &CommentId) -> Result<(), ApiError> {
            self.comments.lock().unwrap().retain(|c| &c.id != comment_id);
            Ok(())
        }
    }

    fn session() -> (Session, tokio::sync::mpsc::UnboundedReceiver<super::CatalogReply>) {
        Session::new(
            &Config::default(),
            Arc::new(SlowCatalog),
            Arc::new(MemoryStore::default()),
        )
    }

    #[tokio::test]
    async fn late_sports_reply_does_not_override_fiction() -> anyhow::Result<()> {
        let (mut session, mut rx) = session();

        session.select_genre(Genre::Sports);
        session.select_genre(Genre::Fiction);

        let first = rx.recv().await.unwrap();
        assert_eq!(Genre::Fiction, first.ticket.genre());
        assert_eq!(Applied::Replaced(2), session.on_catalog_reply(first));

        let second = rx.recv().await.unwrap();
        assert_eq!(Genre::Sports, second.ticket.genre());
        assert_eq!(Applied::Stale, session.on_catalog_reply(second));

        let ids: Vec<&str> = session.catalog().books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(vec!["f1", "f2"], ids);

        Ok(())
    }

    #[tokio::test]
    async fn submit_bumps_counter_and_delete_does_not() -> anyhow::Result<()> {
        let (mut session, mut rx) = session();
        let f1 = BookId::new("f1");

        session.select_genre(Genre::Fiction);
        let reply = rx.recv().await.unwrap();
        session.on_catalog_reply(reply);

        assert_eq!(Toggle::Expanded, session.toggle(&f1, Origin::Card).await);
        session.set_draft_text("Great read")?;
        session.set_draft_rating(5)?;
        session.submit().await?;

        assert_eq!(1, session.catalog().review_count(&f1));
        assert_eq!(Some(1), session.catalog().tally().observed(&f1));

        let panel = session.panel().unwrap();
        assert_eq!(1, panel.comments().len());
        assert!(panel.draft().body.is_empty());
        assert_eq!(1, panel.draft().rating.get());

        let comment_id = panel.comments()[0].id.clone();
        session.delete(&comment_id).await?;

        assert_eq!(1, session.catalog().review_count(&f1));
        assert_eq!(Some(0), session.catalog().tally().observed(&f1));

        Ok(())
    }

    #[tokio::test]
    async fn switching_books_moves_the_panel() -> anyhow::Result<()> {
        let (mut session, mut rx) = session();
        let f1 = BookId::new("f1");
        let f2 = BookId::new("f2");

        session.select_genre(Genre::Fiction);
        let reply = rx.recv().await.unwrap();
        session.on_catalog_reply(reply);

        session.toggle(&f1, Origin::Card).await;
        session.toggle(&f2, Origin::Card).await;
        assert_eq!(&f2, session.panel().unwrap().book_id());

        assert_eq!(Toggle::Suppressed, session.toggle(&f2, Origin::TextInput).await);
        assert!(session.panel().is_some());

        assert_eq!(Toggle::Collapsed, session.toggle(&f2, Origin::Card).await);
        assert!(session.panel().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn unlisted_book_gets_no_panel() -> anyhow::Result<()> {
        let (mut session, mut rx) = session();
        let ghost = BookId::new("not-listed");

        session.select_genre(Genre::Fiction);
        let reply = rx.recv().await.unwrap();
        session.on_catalog_reply(reply);

        assert_eq!(Toggle::Unknown, session.toggle(&ghost, Origin::Card).await);
        assert!(session.panel().is_none());
        assert_eq!(None, session.catalog().expanded());

        assert!(session.set_draft_text("phantom review").is_err());
        assert!(session.submit().await.is_err());
        assert_eq!(0, session.catalog().review_count(&ghost));
        assert!(!session.catalog().tally().contains(&ghost));

        Ok(())
    }

    #[tokio::test]
    async fn draft_edits_need_an_open_panel() -> anyhow::Result<()> {
        let (mut session, _rx) = session();

        assert!(session.set_draft_text("orphan").is_err());
        assert!(session.submit().await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn panel_closes_when_book_leaves_the_list() -> anyhow::Result<()> {
        let (mut session, mut rx) = session();

        session.select_genre(Genre::Fiction);
        let reply = rx.recv().await.unwrap();
        session.on_catalog_reply(reply);
        session.toggle(&BookId::new("f1"), Origin::Card).await;

        session.select_genre(Genre::Thriller);
        let reply = rx.recv().await.unwrap();
        session.on_catalog_reply(reply);

        assert!(session.panel().is_none());
        assert_eq!(None, session.catalog().expanded());

        Ok(())
    }
}
