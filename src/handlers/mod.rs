pub mod api;
pub mod config;
pub mod page;

pub use api::*;
pub use config::*;
pub use page::*;
