//! Turns the numeric round encoding stored on match rows into the
//! human-readable placement text. Lower codes mean later rounds, so the
//! best result a player has on file is the row with the smallest code.

use crate::database::models::RankingRow;

/// Placement label for a single match row, from the perspective of the
/// queried player. Round code 1 is the final: the recorded winner reads
/// as "win", the other finalist as "final".
pub fn placement_text(row: &RankingRow, player_id: i32) -> String {
    match row.round {
        1 if row.winner == Some(player_id) => "win".to_string(),
        1 => "final".to_string(),
        2 => "semifinal".to_string(),
        4 => "quarterfinal".to_string(),
        n => format!("placement {}", n),
    }
}

pub fn best_result_message(row: &RankingRow, player_id: i32) -> String {
    format!(
        "Highest placement is in the tournament of {} with placement in the {}",
        row.club_name,
        placement_text(row, player_id)
    )
}

pub fn no_result_message(player_id: i32) -> String {
    format!("No ranking found for player with id {}", player_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(round: i32, winner: Option<i32>) -> RankingRow {
        RankingRow {
            club_name: "TC Heverlee".to_string(),
            round,
            winner,
        }
    }

    #[test]
    fn won_final_reads_as_win() {
        assert_eq!(placement_text(&row(1, Some(41)), 41), "win");
    }

    #[test]
    fn lost_final_reads_as_final() {
        assert_eq!(placement_text(&row(1, Some(99)), 41), "final");
    }

    #[test]
    fn final_without_recorded_winner_reads_as_final() {
        assert_eq!(placement_text(&row(1, None), 41), "final");
    }

    #[test]
    fn semifinal_and_quarterfinal_labels() {
        assert_eq!(placement_text(&row(2, None), 41), "semifinal");
        assert_eq!(placement_text(&row(4, None), 41), "quarterfinal");
    }

    #[test]
    fn other_rounds_read_as_literal_placement() {
        assert_eq!(placement_text(&row(7, None), 41), "placement 7");
        assert_eq!(placement_text(&row(16, None), 41), "placement 16");
    }

    #[test]
    fn best_result_message_names_the_club() {
        let message = best_result_message(&row(2, None), 41);
        assert_eq!(
            message,
            "Highest placement is in the tournament of TC Heverlee with placement in the semifinal"
        );
    }

    #[test]
    fn no_result_message_names_the_player() {
        assert_eq!(no_result_message(41), "No ranking found for player with id 41");
    }
}
