//! Caller-side orchestration wiring the engine into the boundary stores.

pub mod obligation_service;

pub use obligation_service::ObligationService;

use thiserror::Error;

use crate::errors::EngineError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("Invalid: {0}")]
    Invalid(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
