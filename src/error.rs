use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    None,
    UnknownUnit,
    CreateOutput(String),
    Signal(String),
    Request(String),
    Response(String),
    ResponseChunk(String),
    FileWrite,
    FileFlush,
}

pub type Result<T> = core::result::Result<T, SessionError>;

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::None => { write!(f, "None") }
            SessionError::UnknownUnit => { write!(f, "UnknownUnit") }
            SessionError::CreateOutput(message) => {
                write!(f, "Cannot create output file: {}", message)
            }
            SessionError::Signal(message) => {
                write!(f, "Cannot handle signal: {}", message)
            }
            SessionError::Request(message) => { write!(f, "Request {}", message) }
            SessionError::Response(message) => { write!(f, "Response {}", message) }
            SessionError::ResponseChunk(message) => {
                write!(f, "ResponseChunk {}", message)
            }
            SessionError::FileWrite => { write!(f, "FileWrite") }
            SessionError::FileFlush => { write!(f, "FileFlush") }
        }
    }
}
