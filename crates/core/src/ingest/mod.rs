pub mod news;
pub mod quote;
