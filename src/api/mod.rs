// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod display_data {
    pub use crate::display_data::*;
}
