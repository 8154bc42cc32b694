use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failure kinds surfaced by the player repository contract.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no player registered with tennisvlaanderen id {0}")]
    PlayerNotFound(i32),

    #[error("a player with tennisvlaanderen id {0} is already registered")]
    DuplicatePlayer(i32),

    #[error("no tournament with id {0}")]
    TournamentNotFound(i32),

    #[error("{context}")]
    Persistence {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RepositoryError {
    pub fn persistence<E>(context: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RepositoryError::Persistence {
            context: context.to_string(),
            source: Box::new(source),
        }
    }
}
