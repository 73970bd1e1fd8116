pub mod book;
pub mod book_genres;
pub mod genre;

pub use book::Book;
