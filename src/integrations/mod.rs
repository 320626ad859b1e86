//! External service integrations.

pub mod predictor_client {
    pub use crate::predictor_client::*;
}

pub mod circuit_breaker {
    pub use crate::circuit_breaker::*;
}
