use std::fmt::{Debug, Display, Formatter};
use std::{fmt, io, result};

use crate::TermInt;

#[derive(Debug)]
pub enum ErrorType {
    Terminal(crossterm::ErrorKind),
    Io(io::Error),
    TerminalTooSmall { needed: (TermInt, TermInt), actual: (TermInt, TermInt) },
}

/// The second member contains a trace in reverse order
#[must_use]
pub struct Error(ErrorType, Vec<String>);

impl From<crossterm::ErrorKind> for Error {
    fn from(e: crossterm::ErrorKind) -> Self {
        Self(ErrorType::Terminal(e), vec![])
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self(ErrorType::Io(e), vec![])
    }
}

impl From<ErrorType> for Error {
    fn from(e: ErrorType) -> Self {
        Self(e, vec![])
    }
}

impl Error {
    pub fn kind(&self) -> &ErrorType {
        &self.0
    }

    pub fn with_trace_step<S: ToString>(mut self, s: S) -> Self {
        self.1.push(s.to_string());
        self
    }
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::Terminal(e) => write!(f, "terminal error: {:?}", e),
            ErrorType::Io(e) => write!(f, "I/O error: {}", e),
            ErrorType::TerminalTooSmall { needed, actual } => write!(
                f,
                "terminal is {}x{}, the game needs at least {}x{}",
                actual.0, actual.1, needed.0, needed.1
            ),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error:\n{}\nTrace:", self.0)?;
        for t in (self.1).iter().rev() {
            writeln!(f, " in {}", t)?;
        }
        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for Error {}

pub type Result<T = ()> = result::Result<T, Error>;

pub trait ErrorConversion {
    fn with_trace_step<S: ToString>(self, s: S) -> Self;
}

impl<T> ErrorConversion for Result<T> {
    fn with_trace_step<S: ToString>(self, s: S) -> Self {
        self.map_err(|e| e.with_trace_step(s.to_string()))
    }
}
