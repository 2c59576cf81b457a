pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod country;
    pub mod health;
    pub mod pages;
    pub mod ranking;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
