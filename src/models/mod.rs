//! Request and response payloads.
//!
//! `Product` is the only record with an external owner (the document store);
//! the item types are inert payloads held by in-process stores.

pub mod item;
pub mod model_name;
pub mod product;

pub use item::{EmbeddedItem, Item, ItemFake, ItemFakePatch, ItemsQuery};
pub use model_name::{ModelName, UnknownModel};
pub use product::Product;
