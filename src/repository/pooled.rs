use rusqlite::{OptionalExtension, named_params};

use super::{PlayerRepository, classify_register_failure, db_err};
use crate::database::connection::{DbConn, DbPool};
use crate::database::models::{self, Player, Tournament};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::ranking;

/// Backend over a connection pool. Every call checks its own connection
/// out of the pool, binds named parameters and goes through the
/// connection's prepared-statement cache; successful statements are
/// durable when they return.
pub struct PooledPlayerRepository {
    pool: DbPool,
}

impl PooledPlayerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn checkout(&self) -> RepositoryResult<DbConn> {
        self.pool
            .get()
            .map_err(db_err("Failed to get database connection from pool"))
    }

    fn find_tournament(&self, id: i32) -> RepositoryResult<Tournament> {
        let conn = self.checkout()?;
        let mut stmt = conn
            .prepare_cached("SELECT id, clubnaam FROM tornooi WHERE id = :id")
            .map_err(db_err("Failed to query tournament by id"))?;
        stmt.query_row(named_params! { ":id": id }, models::parse_tournament_row)
            .optional()
            .map_err(db_err("Failed to query tournament by id"))?
            .ok_or(RepositoryError::TournamentNotFound(id))
    }
}

impl PlayerRepository for PooledPlayerRepository {
    fn register(&self, player: &Player) -> RepositoryResult<()> {
        let conn = self.checkout()?;
        let mut stmt = conn
            .prepare_cached(
                "INSERT INTO speler (tennisvlaanderenid, naam, punten) \
                 VALUES (:id, :naam, :punten)",
            )
            .map_err(db_err("Failed to insert new player"))?;
        stmt.execute(named_params! {
            ":id": player.tennisvlaanderen_id,
            ":naam": player.name,
            ":punten": player.points,
        })
        .map_err(|e| classify_register_failure(player.tennisvlaanderen_id, e))?;

        Ok(())
    }

    fn find_by_id(&self, tennisvlaanderen_id: i32) -> RepositoryResult<Player> {
        let conn = self.checkout()?;
        let mut stmt = conn
            .prepare_cached(
                "SELECT tennisvlaanderenid, naam, punten FROM speler \
                 WHERE tennisvlaanderenid = :id",
            )
            .map_err(db_err("Failed to query player by tennisvlaanderen id"))?;
        stmt.query_row(
            named_params! { ":id": tennisvlaanderen_id },
            models::parse_player_row,
        )
        .optional()
        .map_err(db_err("Failed to query player by tennisvlaanderen id"))?
        .ok_or(RepositoryError::PlayerNotFound(tennisvlaanderen_id))
    }

    fn list_all(&self) -> RepositoryResult<Vec<Player>> {
        let conn = self.checkout()?;
        let mut stmt = conn
            .prepare_cached("SELECT tennisvlaanderenid, naam, punten FROM speler")
            .map_err(db_err("Failed to query all players"))?;
        let rows = stmt
            .query_map([], models::parse_player_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(db_err("Failed to query all players"))?;

        Ok(rows)
    }

    fn update(&self, player: &Player) -> RepositoryResult<()> {
        self.find_by_id(player.tennisvlaanderen_id)?;

        let conn = self.checkout()?;
        let mut stmt = conn
            .prepare_cached(
                "UPDATE speler SET naam = :naam, punten = :punten \
                 WHERE tennisvlaanderenid = :id",
            )
            .map_err(db_err("Failed to update player"))?;
        stmt.execute(named_params! {
            ":naam": player.name,
            ":punten": player.points,
            ":id": player.tennisvlaanderen_id,
        })
        .map_err(db_err("Failed to update player"))?;

        Ok(())
    }

    fn delete(&self, tennisvlaanderen_id: i32) -> RepositoryResult<()> {
        self.find_by_id(tennisvlaanderen_id)?;

        let conn = self.checkout()?;
        let mut stmt = conn
            .prepare_cached("DELETE FROM speler WHERE tennisvlaanderenid = :id")
            .map_err(db_err("Failed to delete player"))?;
        stmt.execute(named_params! { ":id": tennisvlaanderen_id })
            .map_err(db_err("Failed to delete player"))?;

        Ok(())
    }

    fn add_to_tournament(
        &self,
        tournament_id: i32,
        tennisvlaanderen_id: i32,
    ) -> RepositoryResult<()> {
        self.find_by_id(tennisvlaanderen_id)?;
        self.find_tournament(tournament_id)?;

        let conn = self.checkout()?;
        let mut stmt = conn
            .prepare_cached(
                "INSERT INTO speler_speelt_tornooi (tornooi, speler) \
                 VALUES (:tornooi, :speler)",
            )
            .map_err(db_err("Failed to add player to tournament"))?;
        stmt.execute(named_params! {
            ":tornooi": tournament_id,
            ":speler": tennisvlaanderen_id,
        })
        .map_err(db_err("Failed to add player to tournament"))?;

        Ok(())
    }

    fn remove_from_tournament(
        &self,
        tournament_id: i32,
        tennisvlaanderen_id: i32,
    ) -> RepositoryResult<()> {
        self.find_by_id(tennisvlaanderen_id)?;
        self.find_tournament(tournament_id)?;

        // Zero rows affected is fine: withdrawing an entry that was never
        // made is not an error.
        let conn = self.checkout()?;
        let mut stmt = conn
            .prepare_cached(
                "DELETE FROM speler_speelt_tornooi \
                 WHERE tornooi = :tornooi AND speler = :speler",
            )
            .map_err(db_err("Failed to remove player from tournament"))?;
        stmt.execute(named_params! {
            ":tornooi": tournament_id,
            ":speler": tennisvlaanderen_id,
        })
        .map_err(db_err("Failed to remove player from tournament"))?;

        Ok(())
    }

    fn highest_ranking(&self, tennisvlaanderen_id: i32) -> RepositoryResult<String> {
        self.find_by_id(tennisvlaanderen_id)?;

        let conn = self.checkout()?;
        let mut stmt = conn
            .prepare_cached(
                "SELECT t.clubnaam, w.finale, w.winnaar \
                 FROM wedstrijd w \
                 JOIN tornooi t ON w.tornooi = t.id \
                 WHERE (w.speler1 = :id OR w.speler2 = :id) AND w.finale IS NOT NULL \
                 ORDER BY w.finale ASC \
                 LIMIT 1",
            )
            .map_err(db_err("Failed to query highest ranking"))?;
        let best = stmt
            .query_row(
                named_params! { ":id": tennisvlaanderen_id },
                models::parse_ranking_row,
            )
            .optional()
            .map_err(db_err("Failed to query highest ranking"))?;

        Ok(match best {
            Some(row) => ranking::best_result_message(&row, tennisvlaanderen_id),
            None => ranking::no_result_message(tennisvlaanderen_id),
        })
    }
}
