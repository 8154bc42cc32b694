use rusqlite::{Connection, OptionalExtension, params};

use super::{PlayerRepository, classify_register_failure, db_err};
use crate::database::models::{self, Player, Tournament};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::ranking;

/// Backend over a single owned connection, injected at construction.
/// Statements are prepared per call with positional parameters, and every
/// mutation runs inside an explicit transaction that is committed right
/// after the statement.
pub struct DirectPlayerRepository {
    conn: Connection,
}

impl DirectPlayerRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    fn find_tournament(&self, id: i32) -> RepositoryResult<Tournament> {
        self.conn
            .query_row(
                "SELECT id, clubnaam FROM tornooi WHERE id = ?1",
                params![id],
                models::parse_tournament_row,
            )
            .optional()
            .map_err(db_err("Failed to query tournament by id"))?
            .ok_or(RepositoryError::TournamentNotFound(id))
    }
}

impl PlayerRepository for DirectPlayerRepository {
    fn register(&self, player: &Player) -> RepositoryResult<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(db_err("Failed to start transaction"))?;
        tx.execute(
            "INSERT INTO speler (tennisvlaanderenid, naam, punten) VALUES (?1, ?2, ?3)",
            params![player.tennisvlaanderen_id, player.name, player.points],
        )
        .map_err(|e| classify_register_failure(player.tennisvlaanderen_id, e))?;
        tx.commit().map_err(db_err("Failed to commit player insert"))
    }

    fn find_by_id(&self, tennisvlaanderen_id: i32) -> RepositoryResult<Player> {
        self.conn
            .query_row(
                "SELECT tennisvlaanderenid, naam, punten FROM speler WHERE tennisvlaanderenid = ?1",
                params![tennisvlaanderen_id],
                models::parse_player_row,
            )
            .optional()
            .map_err(db_err("Failed to query player by tennisvlaanderen id"))?
            .ok_or(RepositoryError::PlayerNotFound(tennisvlaanderen_id))
    }

    fn list_all(&self) -> RepositoryResult<Vec<Player>> {
        let mut stmt = self
            .conn
            .prepare("SELECT tennisvlaanderenid, naam, punten FROM speler")
            .map_err(db_err("Failed to query all players"))?;
        let rows = stmt
            .query_map([], models::parse_player_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(db_err("Failed to query all players"))?;

        Ok(rows)
    }

    fn update(&self, player: &Player) -> RepositoryResult<()> {
        self.find_by_id(player.tennisvlaanderen_id)?;

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(db_err("Failed to start transaction"))?;
        tx.execute(
            "UPDATE speler SET naam = ?1, punten = ?2 WHERE tennisvlaanderenid = ?3",
            params![player.name, player.points, player.tennisvlaanderen_id],
        )
        .map_err(db_err("Failed to update player"))?;
        tx.commit().map_err(db_err("Failed to commit player update"))
    }

    fn delete(&self, tennisvlaanderen_id: i32) -> RepositoryResult<()> {
        self.find_by_id(tennisvlaanderen_id)?;

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(db_err("Failed to start transaction"))?;
        tx.execute(
            "DELETE FROM speler WHERE tennisvlaanderenid = ?1",
            params![tennisvlaanderen_id],
        )
        .map_err(db_err("Failed to delete player"))?;
        tx.commit().map_err(db_err("Failed to commit player delete"))
    }

    fn add_to_tournament(
        &self,
        tournament_id: i32,
        tennisvlaanderen_id: i32,
    ) -> RepositoryResult<()> {
        self.find_by_id(tennisvlaanderen_id)?;
        self.find_tournament(tournament_id)?;

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(db_err("Failed to start transaction"))?;
        tx.execute(
            "INSERT INTO speler_speelt_tornooi (tornooi, speler) VALUES (?1, ?2)",
            params![tournament_id, tennisvlaanderen_id],
        )
        .map_err(db_err("Failed to add player to tournament"))?;
        tx.commit().map_err(db_err("Failed to commit tournament entry"))
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
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(db_err("Failed to start transaction"))?;
        tx.execute(
            "DELETE FROM speler_speelt_tornooi WHERE tornooi = ?1 AND speler = ?2",
            params![tournament_id, tennisvlaanderen_id],
        )
        .map_err(db_err("Failed to remove player from tournament"))?;
        tx.commit()
            .map_err(db_err("Failed to commit tournament withdrawal"))
    }

    fn highest_ranking(&self, tennisvlaanderen_id: i32) -> RepositoryResult<String> {
        self.find_by_id(tennisvlaanderen_id)?;

        let best = self
            .conn
            .query_row(
                "SELECT t.clubnaam, w.finale, w.winnaar \
                 FROM wedstrijd w \
                 JOIN tornooi t ON w.tornooi = t.id \
                 WHERE (w.speler1 = ?1 OR w.speler2 = ?1) AND w.finale IS NOT NULL \
                 ORDER BY w.finale ASC \
                 LIMIT 1",
                params![tennisvlaanderen_id],
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
