use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use rusqlite::params;

use super::connection::DbConn;
use super::models::DbMatch;
use crate::domain::{self, MatchRecord, RoleStats};
use crate::rating::{PositionMetrics, RecentFormMetrics, Role};

const SELECT_COLUMNS: &str = "id, player_id, position, is_won, match_time, created_at";

pub fn insert_match(conn: &mut DbConn, record: &MatchRecord) -> Result<DbMatch> {
    let sql = format!(
        "INSERT INTO matches (player_id, position, is_won, match_time) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
        SELECT_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            record.player_id,
            record.position.as_str(),
            record.is_won,
            record.match_time
        ],
        parse_db_match_row,
    )
    .context("Failed to insert match")
}

fn parse_db_match_row(row: &rusqlite::Row) -> rusqlite::Result<DbMatch> {
    Ok(DbMatch {
        id: row.get(0)?,
        player_id: row.get(1)?,
        position: row.get(2)?,
        is_won: row.get(3)?,
        match_time: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// The player's most recent matches, newest first.
pub fn list_recent_for_player(conn: &mut DbConn, player_id: i64, limit: usize) -> Result<Vec<MatchRecord>> {
    let sql = format!(
        "SELECT {} FROM matches WHERE player_id = ?1 ORDER BY match_time DESC LIMIT ?2",
        SELECT_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id, limit as i64], parse_db_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter().map(to_record).collect()
}

pub fn list_for_player_since(
    conn: &mut DbConn,
    player_id: i64,
    since: NaiveDateTime,
) -> Result<Vec<MatchRecord>> {
    let sql = format!(
        "SELECT {} FROM matches WHERE player_id = ?1 AND match_time >= ?2 ORDER BY match_time ASC",
        SELECT_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id, since], parse_db_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter().map(to_record).collect()
}

/// Time of the newest match in the whole log.
pub fn latest_match_time(conn: &mut DbConn) -> Result<Option<NaiveDateTime>> {
    conn.query_row("SELECT MAX(match_time) FROM matches", [], |r| r.get(0))
        .context("Failed to get latest match time")
}

/// Role statistics over the player's last `limit` matches, or `None` when
/// the player has no matches on record.
pub fn position_stats(conn: &mut DbConn, player_id: i64, limit: usize) -> Result<Option<PositionMetrics>> {
    let recent = list_recent_for_player(conn, player_id, limit)?;
    if recent.is_empty() {
        return Ok(None);
    }

    let flank = RoleStats::tally(&recent, Role::Flank);
    let pocket = RoleStats::tally(&recent, Role::Pocket);
    Ok(Some(domain::calculate_position_multipliers(flank, pocket)))
}

/// Recent form over the `window_days` leading up to the newest match in the
/// log (not the current date, so a stale log still yields a window).
pub fn recent_form(conn: &mut DbConn, player_id: i64, window_days: i64) -> Result<RecentFormMetrics> {
    let Some(latest) = latest_match_time(conn)? else {
        return Ok(RecentFormMetrics::neutral());
    };

    let cutoff = latest - Duration::days(window_days);
    let matches = list_for_player_since(conn, player_id, cutoff)?;
    Ok(domain::calculate_recent_form(&matches))
}

fn to_record(row: DbMatch) -> Result<MatchRecord> {
    let position: Role = row
        .position
        .parse()
        .with_context(|| format!("Bad position in match {}", row.id))?;

    Ok(MatchRecord {
        player_id: row.player_id,
        position,
        is_won: row.is_won,
        match_time: row.match_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{self, setup};
    use chrono::NaiveDate;

    fn conn() -> DbConn {
        let pool = database::create_memory_pool().unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        setup::ensure_schema(&mut conn).unwrap();
        conn
    }

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
            + Duration::days(day as i64)
    }

    fn record(player_id: i64, position: Role, is_won: bool, day: u32) -> MatchRecord {
        MatchRecord {
            player_id,
            position,
            is_won,
            match_time: at(day),
        }
    }

    #[test]
    fn test_insert_and_list_recent() {
        let mut conn = conn();
        for day in 0..5 {
            insert_match(&mut conn, &record(1, Role::Flank, day % 2 == 0, day)).unwrap();
        }
        insert_match(&mut conn, &record(2, Role::Pocket, true, 10)).unwrap();

        let recent = list_recent_for_player(&mut conn, 1, 3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].match_time, at(4));
        assert_eq!(recent[2].match_time, at(2));
        assert!(recent.iter().all(|m| m.player_id == 1));

        assert_eq!(latest_match_time(&mut conn).unwrap(), Some(at(10)));
    }

    #[test]
    fn test_position_stats_uses_latest_sample() {
        let mut conn = conn();
        // an old pocket game that falls outside the sample of 4
        insert_match(&mut conn, &record(1, Role::Pocket, false, 0)).unwrap();
        for day in 1..=3 {
            insert_match(&mut conn, &record(1, Role::Flank, true, day)).unwrap();
        }
        insert_match(&mut conn, &record(1, Role::Pocket, true, 4)).unwrap();

        let stats = position_stats(&mut conn, 1, 4).unwrap().unwrap();
        assert_eq!(stats.flank_matches, 3);
        assert_eq!(stats.pocket_matches, 1);
        assert_eq!(stats.pocket_wins, 1);
        assert_eq!(stats.flank_winrate, 100.0);

        assert!(position_stats(&mut conn, 99, 60).unwrap().is_none());
    }

    #[test]
    fn test_recent_form_window_follows_latest_log_entry() {
        let mut conn = conn();
        insert_match(&mut conn, &record(1, Role::Flank, false, 0)).unwrap();
        insert_match(&mut conn, &record(1, Role::Flank, true, 80)).unwrap();
        insert_match(&mut conn, &record(2, Role::Pocket, true, 100)).unwrap();

        // window: day 40 .. day 100, so only the day-80 win counts
        let form = recent_form(&mut conn, 1, 60).unwrap();
        assert_eq!(form.total_matches, 1);
        assert_eq!(form.win_rate, 100.0);
        assert!(form.performance_multiplier > 1.0);

        let idle = recent_form(&mut conn, 3, 60).unwrap();
        assert_eq!(idle, RecentFormMetrics::neutral());
    }

    #[test]
    fn test_empty_log_is_neutral() {
        let mut conn = conn();
        assert_eq!(recent_form(&mut conn, 1, 60).unwrap(), RecentFormMetrics::neutral());
    }
}
