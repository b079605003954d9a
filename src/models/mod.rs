pub mod api;
pub mod finding;
pub mod idea;

pub use api::*;
pub use finding::*;
pub use idea::*;
