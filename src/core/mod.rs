pub mod sampler;
pub mod separability;
pub mod service;

pub use crate::domain::model::{
    ParameterPatch, ParameterRecord, PredictionPoint, SamplePoint, SeparabilityReport,
    SigmoidParameters, SyntheticPoint,
};
pub use crate::domain::ports::{ConfigProvider, ParameterStore};
pub use crate::utils::error::Result;
