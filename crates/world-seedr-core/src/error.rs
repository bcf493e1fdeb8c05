use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldSeedrError {
    #[error("missing settings: {0}")]
    MissingSettings(&'static str),

    #[error("unknown possibility '{title}'")]
    UnknownPossibility { title: String },

    #[error("possibility library is malformed: {0}")]
    MalformedLibrary(#[from] serde_json::Error),

    #[error("malformed schema: {0}")]
    MalformedSchema(String),

    #[error("possibility '{title}' needs a layout direction and none was given")]
    MissingDirection { title: String },

    #[error("generation exceeded the recursion ceiling ({limit}); a schema cycle is not consuming space")]
    DepthExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, WorldSeedrError>;
