use crate::lifecycle::HeroState;

/// Why the animation could not start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    MissingDependency,
    Construction,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HeroError {
    #[error("required dependency unavailable: {0}")]
    MissingDependency(&'static str),
    #[error("failed to construct scene: {0}")]
    Construction(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: HeroState,
    },
}

impl HeroError {
    /// Failure bucket used by the lifecycle. A bad configuration is treated
    /// like any other construction error.
    pub fn kind(&self) -> FailureKind {
        match self {
            HeroError::MissingDependency(_) => FailureKind::MissingDependency,
            _ => FailureKind::Construction,
        }
    }
}
