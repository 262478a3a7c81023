use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used across the training core.
pub type Result<T> = std::result::Result<T, TrainErr>;

/// The training core's error type.
#[derive(Debug)]
pub enum TrainErr {
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyModel,
    NoWorkers,
    InvalidInit(String),
    InvalidConfig(String),
    WorkerPanicked {
        worker_id: usize,
        epoch: usize,
    },
    Io(io::Error),
}

impl Display for TrainErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "size mismatch between {a} and {b}: got {got}, expected {expected}"
            ),
            TrainErr::EmptyModel => f.write_str("a model needs at least one parameter"),
            TrainErr::NoWorkers => f.write_str("training needs at least one worker"),
            TrainErr::InvalidInit(msg) => write!(f, "invalid parameter initialization: {msg}"),
            TrainErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            TrainErr::WorkerPanicked { worker_id, epoch } => {
                write!(f, "worker {worker_id} panicked during epoch {epoch}")
            }
            TrainErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for TrainErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TrainErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TrainErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rand_distr::NormalError> for TrainErr {
    fn from(value: rand_distr::NormalError) -> Self {
        Self::InvalidInit(value.to_string())
    }
}

impl From<rand_distr::uniform::Error> for TrainErr {
    fn from(value: rand_distr::uniform::Error) -> Self {
        Self::InvalidInit(value.to_string())
    }
}

impl From<serde_json::Error> for TrainErr {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidConfig(value.to_string())
    }
}
