pub mod backend;
pub mod cli;
pub mod dataset;
pub mod device;
pub mod error;
pub mod inference;
pub mod loss;
pub mod model;
pub mod training;

pub mod prelude {
    pub use crate::backend::{MainAutoBackend, MainBackend, ModelRecorder, PlacementBackend};
    pub use crate::device::DevicePlacement;
    pub use crate::error::XorError;
    pub use crate::loss::LossMode;
    pub use crate::model::{XorModel, XorModelConfig};
    pub use crate::training::TrainingConfig;
}
