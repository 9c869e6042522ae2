pub mod create_book;
pub mod delete_book;
pub mod fetch_books;
pub mod get_book;
pub mod update_book;
