pub mod agent_service;
pub mod evaluation_service;
pub mod generation_service;
pub mod research_service;

pub use agent_service::*;
pub use evaluation_service::*;
pub use generation_service::*;
pub use research_service::*;
