pub mod article;
pub mod quote;
pub mod sentiment;
pub mod snapshot;
