use core::fmt;

pub type PutResult = Result<(), PutError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutError {
    /// The event is already linked into the queue, nothing was changed
    AlreadyQueued,
}

impl fmt::Display for PutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutError::AlreadyQueued => write!(f, "event already queued"),
        }
    }
}

pub type RemoveResult = Result<(), RemoveError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveError {
    /// The event is not linked into the queue (or the queue is empty)
    NotQueued,
}

impl fmt::Display for RemoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveError::NotQueued => write!(f, "event not queued"),
        }
    }
}
