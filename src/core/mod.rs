// Domain-layer modules and shared errors/models
pub mod emission_model {
    pub use crate::emission_model::*;
}

pub mod estimator {
    pub use crate::estimator::*;
}

pub mod recommendations {
    pub use crate::recommendations::*;
}

pub mod orchestrator {
    pub use crate::orchestrator::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
