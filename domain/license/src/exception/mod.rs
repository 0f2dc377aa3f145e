use std::fmt;

use thiserror::Error;

pub type LicenseResult<T> = Result<T, LicenseException>;

/// Status classification exposed to transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    NotFound,
    InvalidArgument,
    Internal,
    Unimplemented,
}

/// Hierarchy level of a processor-family metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyLevel {
    Start,
    Base,
    Aggregate,
    End,
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Base => "base",
            Self::Aggregate => "aggregate",
            Self::End => "end",
        })
    }
}

#[derive(Error, Debug)]
pub enum LicenseException {
    #[error("metric does not exist")]
    MetricNotFound,

    #[error("equipment does not exist")]
    EquipmentNotFound,

    #[error("equipment type does not exist")]
    EquipmentTypeNotFound,

    /// A metric configuration names an equipment type that is not in the scope's catalog.
    #[error("cannot find equipment type")]
    EquipmentTypeUnresolved,

    #[error("cannot find base level equipment type")]
    BaseTypeNotFound,

    #[error("cannot find {level} level equipment type in parent hierarchy")]
    LevelNotFound { level: HierarchyLevel },

    /// A processor-family metric references a core/cpu/core-factor attribute the
    /// base type does not carry.
    #[error("{attr} attribute doesnt exits")]
    AttributeMissing { attr: &'static str },

    /// An attribute-family metric names an attribute absent from its equipment type.
    #[error("attribute doesnt exists")]
    AttributeUnresolved,

    #[error("metric type is not supported")]
    MetricKindUnsupported,

    #[error("cannot simulate {kind} metric for types other than base type")]
    SimulationBaseTypeOnly { kind: &'static str },

    #[error("metric type not supported for simulation")]
    SimulationUnsupported,

    #[error("not implemented")]
    NotImplemented,

    #[error("license internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl LicenseException {
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::InternalError {
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MetricNotFound | Self::EquipmentNotFound | Self::EquipmentTypeNotFound => {
                StatusCode::NotFound
            }
            Self::EquipmentTypeUnresolved
            | Self::BaseTypeNotFound
            | Self::LevelNotFound { .. }
            | Self::AttributeMissing { .. }
            | Self::AttributeUnresolved
            | Self::SimulationBaseTypeOnly { .. } => StatusCode::InvalidArgument,
            Self::MetricKindUnsupported | Self::InternalError { .. } => StatusCode::Internal,
            Self::SimulationUnsupported | Self::NotImplemented => StatusCode::Unimplemented,
        }
    }
}

impl From<anyhow::Error> for LicenseException {
    fn from(e: anyhow::Error) -> Self {
        LicenseException::InternalError { source: e }
    }
}
