use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub tennisvlaanderen_id: i32,
    pub name: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: i32,
    pub club_name: String,
}

/// One joined match row as consumed by the ranking derivation: the hosting
/// club, the round encoding and the recorded winner (absent when the match
/// has no winner on file).
#[derive(Debug, Clone)]
pub struct RankingRow {
    pub club_name: String,
    pub round: i32,
    pub winner: Option<i32>,
}

// Row decoders shared by every query path. Each entity has exactly one, so
// the two backends cannot drift in how they read columns.

pub(crate) fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        tennisvlaanderen_id: row.get("tennisvlaanderenid")?,
        name: row.get("naam")?,
        points: row.get("punten")?,
    })
}

pub(crate) fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: row.get("id")?,
        club_name: row.get("clubnaam")?,
    })
}

pub(crate) fn parse_ranking_row(row: &rusqlite::Row) -> rusqlite::Result<RankingRow> {
    Ok(RankingRow {
        club_name: row.get("clubnaam")?,
        round: row.get("finale")?,
        winner: row.get("winnaar")?,
    })
}
