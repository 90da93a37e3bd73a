use serde::Deserialize;

use crate::domain::{Decision, MatchId, RefereeId};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBody {
    pub match_id: MatchId,
    pub referee_id: RefereeId,
    pub role: String,
    pub notes: Option<String>,
    pub assigned_by: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondBody {
    pub referee_id: RefereeId,
    pub decision: Decision,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityBody {
    /// ALWAYS, NEVER or SPECIFIC_WINDOW.
    pub kind: String,
    /// "HH:MM" bounds, required for SPECIFIC_WINDOW.
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRefereeBody {
    pub name: String,
    /// FIBA, PRIMERA, SEGUNDA or ASPIRANTE.
    pub rank: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatchBody {
    pub tournament_name: Option<String>,
    pub venue: String,
    pub home_team: String,
    pub away_team: String,
    /// "YYYY-MM-DD HH:MM" or RFC 3339 without offset.
    pub scheduled_at: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatusBody {
    pub status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffBody {
    pub rank: String,
    pub amount: i64,
}

#[derive(Deserialize)]
pub struct PeriodParams {
    /// Calendar dates, YYYY-MM-DD; end is expanded to end-of-day.
    pub start: String,
    pub end: String,
}
