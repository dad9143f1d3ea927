//! A created game with its players, plus shortcuts that drive it through
//! the phase chain.

use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use time::{Duration, OffsetDateTime};
use wordwolf::domain::random::RandomSource;
use wordwolf::domain::validation::GameSettings;
use wordwolf::domain::{PhaseKind, RosterEntry};
use wordwolf::entities::{game_phases, games as game_rows};
use wordwolf::error::AppError;
use wordwolf::repos::games::{self, Game};
use wordwolf::repos::phases::{self, Phase};
use wordwolf::repos::participants;
use wordwolf::repos::users::User;
use wordwolf::services::game_flow::GameFlowService;
use wordwolf::services::games::GameService;
use wordwolf::AppState;

use super::test_state::{in_memory_state, user};

pub const PASSWORD: &str = "wolfpack";

pub fn settings(member_count: i32, max_turns: i32) -> GameSettings {
    GameSettings {
        title: "Friday night".into(),
        password: PASSWORD.into(),
        member_count,
        max_turns,
        discussion_seconds: 60,
        finally_releasing: false,
    }
}

pub struct GameTable {
    pub state: AppState,
    pub host: User,
    pub guests: Vec<User>,
    pub name: String,
}

impl GameTable {
    /// Host plus `guests` joined players; nobody has started yet.
    pub async fn open(guests: usize, random: impl RandomSource + 'static) -> Self {
        let member_count = i32::try_from(guests + 1).unwrap_or(i32::MAX).max(3);
        Self::open_with(settings(member_count, 3), guests, random).await
    }

    pub async fn open_with(
        settings: GameSettings,
        guest_count: usize,
        random: impl RandomSource + 'static,
    ) -> Self {
        let state = in_memory_state(Arc::new(random)).await;
        let db = state.db().expect("state has a database").clone();

        let host = user(&db, "host").await;
        let created = GameService::from_state(&state)
            .create_game(&db, &host, settings)
            .await
            .expect("game should be created");

        let mut guests = Vec::with_capacity(guest_count);
        for i in 1..=guest_count {
            let guest = user(&db, &format!("guest{i}")).await;
            GameService::from_state(&state)
                .join_game(&db, &guest, &created.name, PASSWORD)
                .await
                .expect("guest should join");
            guests.push(guest);
        }

        Self {
            state,
            host,
            guests,
            name: created.name,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        self.state.db().expect("state has a database")
    }

    pub fn flow(&self) -> GameFlowService {
        GameFlowService::from_state(&self.state)
    }

    pub fn games(&self) -> GameService {
        GameService::from_state(&self.state)
    }

    /// Host first, then guests in join order.
    pub fn everyone(&self) -> Vec<&User> {
        std::iter::once(&self.host).chain(self.guests.iter()).collect()
    }

    pub fn guest(&self, n: usize) -> &User {
        &self.guests[n - 1]
    }

    pub fn word_of(user: &User) -> String {
        format!("{} likes tea", user.name)
    }

    pub async fn game(&self) -> Game {
        games::require_by_name(self.db(), &self.name).await.unwrap()
    }

    pub async fn phase(&self) -> Phase {
        let game = self.game().await;
        phases::require_current(self.db(), game.id).await.unwrap()
    }

    pub async fn phase_kinds(&self) -> Vec<PhaseKind> {
        let game = self.game().await;
        phases::list_by_game(self.db(), game.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.kind)
            .collect()
    }

    pub async fn roster(&self) -> Vec<RosterEntry> {
        let game = self.game().await;
        participants::load_roster(self.db(), game.id).await.unwrap()
    }

    pub async fn entry(&self, user: &User) -> RosterEntry {
        self.roster()
            .await
            .into_iter()
            .find(|p| p.user_id == user.id)
            .expect("user takes part in the game")
    }

    pub async fn start(&self) {
        self.flow()
            .start_game(self.db(), &self.name, self.host.id)
            .await
            .expect("game should start");
    }

    pub async fn submit_word(&self, user: &User) -> Result<(), AppError> {
        self.flow()
            .submit_word(self.db(), &self.name, user.id, &Self::word_of(user))
            .await
    }

    /// Start and have everyone enter a word, reaching DISCUSSION.
    pub async fn reach_discussion(&self) {
        self.start().await;
        for user in self.everyone() {
            self.submit_word(user).await.expect("word accepted");
        }
        assert_eq!(self.phase().await.kind, PhaseKind::Discussion);
    }

    /// Move the current phase's deadline into the past.
    pub async fn expire_phase(&self) {
        let phase = self.phase().await;
        game_phases::Entity::update_many()
            .col_expr(
                game_phases::Column::Deadline,
                Expr::value(OffsetDateTime::now_utc() - Duration::seconds(1)),
            )
            .filter(game_phases::Column::Id.eq(phase.id))
            .exec(self.db())
            .await
            .unwrap();
    }

    /// Move the whole game's deadline into the past.
    pub async fn expire_game(&self) {
        let game = self.game().await;
        game_rows::Entity::update_many()
            .col_expr(
                game_rows::Column::Deadline,
                Expr::value(OffsetDateTime::now_utc() - Duration::seconds(1)),
            )
            .filter(game_rows::Column::Id.eq(game.id))
            .exec(self.db())
            .await
            .unwrap();
    }

    /// End the discussion and let the host's poll open JUDGEMENT.
    pub async fn open_judgement(&self) {
        self.expire_phase().await;
        self.flow()
            .game_view(self.db(), &self.name, self.host.id)
            .await
            .expect("host view reconciles");
        assert_eq!(self.phase().await.kind, PhaseKind::Judgement);
    }

    pub async fn vote(&self, voter: &User, target: &User) -> Result<(), AppError> {
        self.flow()
            .submit_vote(self.db(), &self.name, voter.id, &target.code)
            .await
    }

    pub async fn acknowledge(&self, user: &User) -> Result<(), AppError> {
        self.flow()
            .acknowledge_execution(self.db(), &self.name, user.id)
            .await
    }

    /// Every survivor presses "next" on the current EXECUTION.
    pub async fn acknowledge_all(&self) {
        let phase = self.phase().await;
        let eliminated = phase.eliminated;
        let survivors: Vec<i64> = self
            .roster()
            .await
            .into_iter()
            .filter(|p| p.is_alive() && Some(p.participant_id) != eliminated)
            .map(|p| p.user_id)
            .collect();
        for user in self.everyone() {
            if survivors.contains(&user.id) {
                self.acknowledge(user).await.expect("acknowledged");
            }
        }
    }
}
