pub mod parsing;
pub mod prompts;

pub use parsing::*;
pub use prompts::*;
