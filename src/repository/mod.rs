pub mod direct;
pub mod pooled;

pub use direct::DirectPlayerRepository;
pub use pooled::PooledPlayerRepository;

use crate::database::models::Player;
use crate::errors::{RepositoryError, RepositoryResult};

/// Read/write contract for the player registry. Two backends implement it
/// against the same store; callers program against the trait and never
/// against a particular database-access technique.
///
/// Every mutating operation either succeeds and is durably committed, or
/// fails with one of the [`RepositoryError`] kinds without partial effect.
pub trait PlayerRepository {
    /// Registers a new player. The tennisvlaanderen id is externally
    /// issued and must be free; registering a taken id fails with
    /// [`RepositoryError::DuplicatePlayer`] and leaves the stored row
    /// untouched. The insert is a single conditional statement, so two
    /// racing registrations cannot both slip past the check.
    fn register(&self, player: &Player) -> RepositoryResult<()>;

    /// Looks up the one player with the given tennisvlaanderen id, or
    /// fails with [`RepositoryError::PlayerNotFound`]. This is the
    /// authoritative existence check the other operations lean on.
    fn find_by_id(&self, tennisvlaanderen_id: i32) -> RepositoryResult<Player>;

    /// All registered players in storage order. An empty registry yields
    /// an empty vec, never an error.
    fn list_all(&self) -> RepositoryResult<Vec<Player>>;

    /// Overwrites name and points for an existing player. The id is never
    /// the subject of an update.
    fn update(&self, player: &Player) -> RepositoryResult<()>;

    /// Removes an existing player.
    fn delete(&self, tennisvlaanderen_id: i32) -> RepositoryResult<()>;

    /// Enters a player into a tournament. Both the player and the
    /// tournament must already exist; the checks run in that order and
    /// nothing is written when either fails.
    fn add_to_tournament(
        &self,
        tournament_id: i32,
        tennisvlaanderen_id: i32,
    ) -> RepositoryResult<()>;

    /// Withdraws a player from a tournament. Removing an entry that was
    /// never made is a silent no-op.
    fn remove_from_tournament(
        &self,
        tournament_id: i32,
        tennisvlaanderen_id: i32,
    ) -> RepositoryResult<()>;

    /// Describes the player's best recorded tournament result, or a
    /// neutral "no ranking found" message when no match with a round
    /// encoding exists. Absence of a result is a normal outcome here,
    /// not an error.
    fn highest_ranking(&self, tennisvlaanderen_id: i32) -> RepositoryResult<String>;
}

pub(crate) fn db_err<E>(context: &'static str) -> impl FnOnce(E) -> RepositoryError
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |source| RepositoryError::persistence(context, source)
}

/// A primary key violation on the registration insert means the id is
/// already taken; anything else is an ordinary statement failure.
pub(crate) fn classify_register_failure(
    tennisvlaanderen_id: i32,
    err: rusqlite::Error,
) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation => {
            RepositoryError::DuplicatePlayer(tennisvlaanderen_id)
        }
        other => RepositoryError::persistence("Failed to insert new player", other),
    }
}
