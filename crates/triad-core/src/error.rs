use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Malformed input, rejected before any integration happens.
    InvalidArgument(String),
    /// The integrator produced a non-finite state.
    Integration { time: f64, message: String },
    /// Parameter file could not be parsed or rendered.
    Config(String),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidArgument(msg.into())
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            SimError::Integration { time, message } => {
                write!(f, "integration failed at t={time}: {message}")
            }
            SimError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<toml::de::Error> for SimError {
    fn from(e: toml::de::Error) -> Self {
        SimError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for SimError {
    fn from(e: toml::ser::Error) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
