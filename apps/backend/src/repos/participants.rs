//! Participant repository functions.
//!
//! Participants are loaded together with their user so callers work with
//! `RosterEntry` values that carry the public code and name.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;

use crate::adapters::participants_sea as participants_adapter;
use crate::domain::{ParticipantId, RosterEntry};
use crate::entities::{game_participants, users};
use crate::errors::domain::DomainError;

fn roster_entry(participant: game_participants::Model, user: users::Model) -> RosterEntry {
    RosterEntry {
        participant_id: participant.id,
        user_id: user.id,
        code: user.code,
        name: user.name,
        secret_word: participant.secret_word,
        is_wolf: participant.is_wolf,
        is_died: participant.is_died,
    }
}

pub async fn add_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<ParticipantId, DomainError> {
    let participant = participants_adapter::create_participant(
        conn,
        participants_adapter::ParticipantCreate::new(game_id, user_id),
    )
    .await?;
    Ok(participant.id)
}

pub async fn is_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<bool, DomainError> {
    let participant = participants_adapter::find_by_game_and_user(conn, game_id, user_id).await?;
    Ok(participant.is_some())
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(participants_adapter::count_by_game(conn, game_id).await?)
}

/// The game's participants in join order.
pub async fn load_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<RosterEntry>, DomainError> {
    let rows = participants_adapter::list_with_users(conn, &[game_id]).await?;
    Ok(rows
        .into_iter()
        .map(|(participant, user)| roster_entry(participant, user))
        .collect())
}

/// Rosters for several games at once, keyed by game id.
pub async fn load_rosters<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: &[i64],
) -> Result<HashMap<i64, Vec<RosterEntry>>, DomainError> {
    let rows = participants_adapter::list_with_users(conn, game_ids).await?;
    let mut rosters: HashMap<i64, Vec<RosterEntry>> = HashMap::new();
    for (participant, user) in rows {
        rosters
            .entry(participant.game_id)
            .or_default()
            .push(roster_entry(participant, user));
    }
    Ok(rosters)
}

pub async fn set_secret_word<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: ParticipantId,
    word: &str,
) -> Result<(), DomainError> {
    Ok(participants_adapter::set_secret_word(conn, participant_id, word).await?)
}

pub async fn mark_wolf<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: ParticipantId,
) -> Result<(), DomainError> {
    Ok(participants_adapter::mark_wolf(conn, participant_id).await?)
}

pub async fn mark_died<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: ParticipantId,
) -> Result<(), DomainError> {
    Ok(participants_adapter::mark_died(conn, participant_id).await?)
}
