pub mod item;
pub mod response;

pub use item::Item;
pub use response::{FeedData, FeedResponse};
