pub mod dto;
mod games;
pub mod response;
mod router;

pub use router::{AppState, create_router};
