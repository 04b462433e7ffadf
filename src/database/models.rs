use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct DbMatch {
    pub id: i64,
    pub player_id: i64,
    pub position: String,
    pub is_won: bool,
    pub match_time: NaiveDateTime,
    pub created_at: Option<NaiveDateTime>,
}
