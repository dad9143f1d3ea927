use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Code,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Name,
    Title,
    HostId,
    PasswordHash,
    MaxMembers,
    MaxTurns,
    DiscussionSeconds,
    FinallyReleasing,
    Status,
    Deadline,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum GameParticipants {
    Table,
    Id,
    GameId,
    UserId,
    SecretWord,
    IsWolf,
    IsDied,
    CreatedAt,
}

#[derive(Iden)]
enum GamePhases {
    Table,
    Id,
    GameId,
    Kind,
    Title,
    Message,
    Deadline,
    EliminatedParticipantId,
    FollowsPhaseId,
    CreatedAt,
}

#[derive(Iden)]
enum PhaseActions {
    Table,
    Id,
    PhaseId,
    ParticipantId,
    Completed,
    CompletedAt,
}

#[derive(Iden)]
enum Votes {
    Table,
    Id,
    PhaseId,
    ActionId,
    TargetParticipantId,
    CreatedAt,
}

#[derive(Iden)]
enum RunoffCandidates {
    Table,
    Id,
    PhaseId,
    ParticipantId,
}

fn pk(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk(Users::Id))
                    .col(ColumnDef::new(Users::Code).string_len(64).not_null())
                    .col(ColumnDef::new(Users::Name).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_code")
                    .table(Users::Table)
                    .col(Users::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // games; status is stored as text on every backend
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(pk(Games::Id))
                    .col(ColumnDef::new(Games::Name).string_len(16).not_null())
                    .col(ColumnDef::new(Games::Title).string_len(64).not_null())
                    .col(ColumnDef::new(Games::HostId).big_integer().not_null())
                    .col(ColumnDef::new(Games::PasswordHash).string_len(64).not_null())
                    .col(ColumnDef::new(Games::MaxMembers).integer().not_null())
                    .col(ColumnDef::new(Games::MaxTurns).integer().not_null())
                    .col(ColumnDef::new(Games::DiscussionSeconds).integer().not_null())
                    .col(
                        ColumnDef::new(Games::FinallyReleasing)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::Status)
                            .string_len(16)
                            .not_null()
                            .default("OPENED"),
                    )
                    .col(
                        ColumnDef::new(Games::Deadline)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_host_id")
                            .from(Games::Table, Games::HostId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_games_name")
                    .table(Games::Table)
                    .col(Games::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_host_status")
                    .table(Games::Table)
                    .col(Games::HostId)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        // game_participants
        manager
            .create_table(
                Table::create()
                    .table(GameParticipants::Table)
                    .if_not_exists()
                    .col(pk(GameParticipants::Id))
                    .col(ColumnDef::new(GameParticipants::GameId).big_integer().not_null())
                    .col(ColumnDef::new(GameParticipants::UserId).big_integer().not_null())
                    .col(ColumnDef::new(GameParticipants::SecretWord).string_len(64).null())
                    .col(
                        ColumnDef::new(GameParticipants::IsWolf)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameParticipants::IsDied)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameParticipants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_participants_game_id")
                            .from(GameParticipants::Table, GameParticipants::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_participants_user_id")
                            .from(GameParticipants::Table, GameParticipants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_participants_game_user")
                    .table(GameParticipants::Table)
                    .col(GameParticipants::GameId)
                    .col(GameParticipants::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_game_participants_user_id")
                    .table(GameParticipants::Table)
                    .col(GameParticipants::UserId)
                    .to_owned(),
            )
            .await?;

        // game_phases: append-only; the current phase is the highest id per game
        manager
            .create_table(
                Table::create()
                    .table(GamePhases::Table)
                    .if_not_exists()
                    .col(pk(GamePhases::Id))
                    .col(ColumnDef::new(GamePhases::GameId).big_integer().not_null())
                    .col(ColumnDef::new(GamePhases::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(GamePhases::Title).string_len(128).not_null())
                    .col(ColumnDef::new(GamePhases::Message).text().not_null())
                    .col(
                        ColumnDef::new(GamePhases::Deadline)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GamePhases::EliminatedParticipantId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(GamePhases::FollowsPhaseId).big_integer().null())
                    .col(
                        ColumnDef::new(GamePhases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_phases_game_id")
                            .from(GamePhases::Table, GamePhases::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_phases_eliminated")
                            .from(GamePhases::Table, GamePhases::EliminatedParticipantId)
                            .to(GameParticipants::Table, GameParticipants::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // at most one successor per phase
        manager
            .create_index(
                Index::create()
                    .name("ux_game_phases_follows")
                    .table(GamePhases::Table)
                    .col(GamePhases::FollowsPhaseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_game_phases_game_id")
                    .table(GamePhases::Table)
                    .col(GamePhases::GameId)
                    .col(GamePhases::Id)
                    .to_owned(),
            )
            .await?;

        // phase_actions
        manager
            .create_table(
                Table::create()
                    .table(PhaseActions::Table)
                    .if_not_exists()
                    .col(pk(PhaseActions::Id))
                    .col(ColumnDef::new(PhaseActions::PhaseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(PhaseActions::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PhaseActions::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PhaseActions::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_phase_actions_phase_id")
                            .from(PhaseActions::Table, PhaseActions::PhaseId)
                            .to(GamePhases::Table, GamePhases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_phase_actions_participant_id")
                            .from(PhaseActions::Table, PhaseActions::ParticipantId)
                            .to(GameParticipants::Table, GameParticipants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_phase_actions_phase_participant")
                    .table(PhaseActions::Table)
                    .col(PhaseActions::PhaseId)
                    .col(PhaseActions::ParticipantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // votes
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(pk(Votes::Id))
                    .col(ColumnDef::new(Votes::PhaseId).big_integer().not_null())
                    .col(ColumnDef::new(Votes::ActionId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Votes::TargetParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Votes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_phase_id")
                            .from(Votes::Table, Votes::PhaseId)
                            .to(GamePhases::Table, GamePhases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_action_id")
                            .from(Votes::Table, Votes::ActionId)
                            .to(PhaseActions::Table, PhaseActions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_target_participant_id")
                            .from(Votes::Table, Votes::TargetParticipantId)
                            .to(GameParticipants::Table, GameParticipants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_votes_action_id")
                    .table(Votes::Table)
                    .col(Votes::ActionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // runoff_candidates
        manager
            .create_table(
                Table::create()
                    .table(RunoffCandidates::Table)
                    .if_not_exists()
                    .col(pk(RunoffCandidates::Id))
                    .col(
                        ColumnDef::new(RunoffCandidates::PhaseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RunoffCandidates::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_runoff_candidates_phase_id")
                            .from(RunoffCandidates::Table, RunoffCandidates::PhaseId)
                            .to(GamePhases::Table, GamePhases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_runoff_candidates_participant_id")
                            .from(RunoffCandidates::Table, RunoffCandidates::ParticipantId)
                            .to(GameParticipants::Table, GameParticipants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_runoff_candidates_phase_participant")
                    .table(RunoffCandidates::Table)
                    .col(RunoffCandidates::PhaseId)
                    .col(RunoffCandidates::ParticipantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order; indexes go with their tables
        manager
            .drop_table(Table::drop().table(RunoffCandidates::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Votes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PhaseActions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GamePhases::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameParticipants::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
