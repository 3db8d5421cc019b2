use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> BookId {
        BookId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        BookId::new(s)
    }
}

/// One catalog entry, as returned by the volumes search.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
}

impl Book {
    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookId};

    #[test]
    fn authors_line_joins_with_comma() {
        let book = Book {
            id: BookId::new("b1"),
            title: String::from("Dune"),
            authors: vec!["Frank Herbert".to_string(), "Brian Herbert".to_string()],
            thumbnail: None,
        };

        assert_eq!("Frank Herbert, Brian Herbert", book.authors_line());
    }

    #[test]
    fn authors_line_empty() {
        let book = Book {
            id: BookId::new("b2"),
            title: String::from("Anonymous"),
            authors: vec![],
            thumbnail: None,
        };

        assert_eq!("", book.authors_line());
    }
}
