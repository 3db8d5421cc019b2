use std::fmt::Write;

use crate::catalog::CatalogView;
use crate::models::{Book, Genre};
use crate::review::ReviewPanel;
use crate::session::Session;

pub fn render_genre_bar(active: Genre) -> String {
    Genre::MENU
        .iter()
        .map(|g| {
            if *g == active {
                format!("[{}]", g.label())
            } else {
                g.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn render_card(book: &Book, catalog: &CatalogView) -> String {
    let mut out = String::new();
    let expanded = catalog.expanded() == Some(&book.id);
    let marker = if expanded { "v" } else { ">" };

    let _ = writeln!(out, "{} {} ({})", marker, book.title, book.id);
    if !book.authors.is_empty() {
        let _ = writeln!(out, "    by {}", book.authors_line());
    }
    if let Some(ref thumbnail) = book.thumbnail {
        let _ = writeln!(out, "    cover: {}", thumbnail);
    }

    let sent = catalog.review_count(&book.id);
    match catalog.tally().observed(&book.id) {
        Some(stored) => {
            let _ = writeln!(out, "    Reviews sent: {} ({} stored)", sent, stored);
        }
        None => {
            let _ = writeln!(out, "    Reviews sent: {}", sent);
        }
    }

    out
}

pub fn render_panel(panel: &ReviewPanel) -> String {
    let mut out = String::new();

    if let Some(error) = panel.error() {
        let _ = writeln!(out, "    !! {}", error);
    }
    if let Some(success) = panel.success() {
        let _ = writeln!(out, "    ok {}", success);
    }

    let draft = panel.draft();
    let _ = writeln!(out, "    draft ({} stars): {}", draft.rating, draft.body);

    if panel.comments().is_empty() {
        let _ = writeln!(out, "    no reviews yet [{}]", panel.stage());
    }
    for comment in panel.comments() {
        let _ = writeln!(
            out,
            "    - {} stars - {} [{}]",
            comment.rate_label(),
            comment.comment,
            comment.id
        );
    }

    out
}

pub fn render(session: &Session) -> String {
    render_catalog(session.catalog(), session.panel())
}

/// The panel goes under the first card of its book only; a book listed under
/// two subjects still gets one form.
pub fn render_catalog(catalog: &CatalogView, panel: Option<&ReviewPanel>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", render_genre_bar(catalog.genre()));
    let _ = writeln!(out);

    if catalog.books().is_empty() {
        let _ = writeln!(out, "(no books)");
    }

    let mut panel = panel;
    for book in catalog.books() {
        out.push_str(&render_card(book, catalog));

        if let Some(open) = panel.filter(|p| p.book_id() == &book.id) {
            out.push_str(&render_panel(open));
            panel = None;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{render_card, render_catalog, render_genre_bar, render_panel};
    use crate::catalog::{CatalogView, Origin};
    use crate::models::{Book, BookId, Genre};
    use crate::review::ReviewPanel;

    fn dune() -> Book {
        Book {
            id: BookId::new("b1"),
            title: "Dune".to_string(),
            authors: vec!["Frank Herbert".to_string()],
            thumbnail: Some("http://img/dune.jpg".to_string()),
        }
    }

    #[test]
    fn genre_bar_marks_active() {
        assert_eq!(
            "All genres | Sports | [Fiction] | Thriller | Fantasy",
            render_genre_bar(Genre::Fiction)
        );
    }

    #[test]
    fn card_shows_counter_and_expansion() {
        let mut catalog = CatalogView::new(Duration::from_secs(60));
        let ticket = catalog.begin_select(Genre::Fiction);
        catalog.apply(ticket, Ok(vec![dune()]));
        catalog.record_review_submitted(&BookId::new("b1"));
        catalog.toggle_expansion(&BookId::new("b1"), Origin::Card);

        let card = render_card(&dune(), &catalog);

        assert!(card.starts_with("v Dune (b1)"));
        assert!(card.contains("by Frank Herbert"));
        assert!(card.contains("cover: http://img/dune.jpg"));
        assert!(card.contains("Reviews sent: 1"));
    }

    #[test]
    fn empty_panel() {
        let panel = ReviewPanel::new(BookId::new("b1"));

        let rendered = render_panel(&panel);

        assert!(rendered.contains("draft (1 stars): "));
        assert!(rendered.contains("no reviews yet [Idle]"));
    }

    #[test]
    fn panel_shown_once_for_duplicated_book() {
        let mut catalog = CatalogView::new(Duration::from_secs(60));
        let ticket = catalog.begin_select(Genre::All);
        catalog.apply(ticket, Ok(vec![dune(), dune()]));
        catalog.toggle_expansion(&BookId::new("b1"), Origin::Card);
        let panel = ReviewPanel::new(BookId::new("b1"));

        let rendered = render_catalog(&catalog, Some(&panel));

        assert_eq!(2, rendered.matches("v Dune (b1)").count());
        assert_eq!(1, rendered.matches("draft (1 stars)").count());
    }
}
