pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The header source could not be read (unreachable URL, error status,
    /// missing file). `location` is the source identifier as given.
    #[error("could not read from source `{location}`")]
    Fetch {
        location: String,
        #[source]
        cause: BoxError,
    },
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
}

impl Error {
    pub fn fetch(location: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self::Fetch {
            location: location.into(),
            cause: cause.into(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
