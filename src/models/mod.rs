mod book;
mod comment;
mod genre;

pub use book::{Book, BookId};
pub use comment::{Comment, CommentId, Draft, Rating};
pub use genre::Genre;
