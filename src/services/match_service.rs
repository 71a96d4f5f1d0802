// src/services/match_service.rs
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::goal::{is_valid_minute, Goal};
use crate::models::matches::{Match, MatchDetails, MatchStatus};
use crate::models::pagination::{Page, Pagination};
use crate::repositories::{
    MatchRepository, PlayerRepository, ResultTransaction, TeamRepository, UnitOfWork,
};

#[derive(Debug, Clone)]
pub struct CreateMatchRequest {
    pub match_date: NaiveDate,
    pub match_time: String,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub status: Option<MatchStatus>,
}

/// Full replacement of a match's schedule; scores only change through results.
#[derive(Debug, Clone)]
pub struct UpdateMatchRequest {
    pub match_date: NaiveDate,
    pub match_time: String,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Clone)]
pub struct GoalInput {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub minute: i32,
    pub is_own_goal: bool,
}

#[derive(Debug, Clone)]
pub struct RecordResultRequest {
    pub home_score: i32,
    pub away_score: i32,
    pub goals: Vec<GoalInput>,
}

/// Listing filter; callers pick at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFilter {
    All,
    Team(Uuid),
    Status(MatchStatus),
    DateRange(NaiveDate, NaiveDate),
}

pub struct MatchService {
    matches: Arc<dyn MatchRepository>,
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

fn validate_match_time(match_time: &str) -> Result<()> {
    NaiveTime::parse_from_str(match_time, "%H:%M")
        .map(|_| ())
        .map_err(|_| AppError::invalid_data(format!("match time must be HH:MM, got '{}'", match_time)))
}

impl MatchService {
    pub fn new(
        matches: Arc<dyn MatchRepository>,
        teams: Arc<dyn TeamRepository>,
        players: Arc<dyn PlayerRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            matches,
            teams,
            players,
            unit_of_work,
        }
    }

    /// Same-team pairings fail before any lookup, so they never depend on
    /// whether the team exists.
    async fn check_teams(&self, home_team_id: Uuid, away_team_id: Uuid) -> Result<()> {
        if home_team_id == away_team_id {
            return Err(AppError::SameTeamMatch);
        }
        if !self.teams.exists(home_team_id).await? {
            return Err(AppError::TeamNotFound);
        }
        if !self.teams.exists(away_team_id).await? {
            return Err(AppError::TeamNotFound);
        }
        Ok(())
    }

    pub async fn create(&self, request: CreateMatchRequest) -> Result<Match> {
        self.check_teams(request.home_team_id, request.away_team_id).await?;
        validate_match_time(&request.match_time)?;

        let mut fixture = Match::new(
            request.match_date,
            request.match_time,
            request.home_team_id,
            request.away_team_id,
        );
        if let Some(status) = request.status {
            fixture.status = MatchStatus::Scheduled.transition_to(status)?;
        }

        self.matches.create(&fixture).await?;
        tracing::info!("Created match {} ({} vs {})", fixture.id, fixture.home_team_id, fixture.away_team_id);
        Ok(fixture)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Match> {
        self.matches.find_by_id(id).await?.ok_or(AppError::MatchNotFound)
    }

    pub async fn get_by_id_with_details(&self, id: Uuid) -> Result<MatchDetails> {
        self.matches
            .find_by_id_with_details(id)
            .await?
            .ok_or(AppError::MatchNotFound)
    }

    pub async fn update(&self, id: Uuid, request: UpdateMatchRequest) -> Result<Match> {
        let mut fixture = self.get_by_id(id).await?;

        self.check_teams(request.home_team_id, request.away_team_id).await?;
        validate_match_time(&request.match_time)?;

        let status = match request.status {
            Some(next) => fixture.status.transition_to(next)?,
            None => fixture.status,
        };

        fixture.match_date = request.match_date;
        fixture.match_time = request.match_time;
        fixture.home_team_id = request.home_team_id;
        fixture.away_team_id = request.away_team_id;
        fixture.status = status;
        fixture.updated_at = chrono::Utc::now();

        self.matches.update(&fixture).await?;
        tracing::info!("Updated match {} (status {})", fixture.id, fixture.status);
        Ok(fixture)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.matches.exists(id).await? {
            return Err(AppError::MatchNotFound);
        }
        self.matches.delete(id).await?;
        tracing::info!("Deleted match {}", id);
        Ok(())
    }

    pub async fn list(&self, filter: MatchFilter, pagination: Pagination) -> Result<Page<Match>> {
        match filter {
            MatchFilter::All => self.matches.list(pagination).await,
            MatchFilter::Team(team_id) => {
                if !self.teams.exists(team_id).await? {
                    return Err(AppError::TeamNotFound);
                }
                self.matches.list_by_team(team_id, pagination).await
            }
            MatchFilter::Status(status) => self.matches.list_by_status(status, pagination).await,
            MatchFilter::DateRange(start, end) => {
                if start > end {
                    return Err(AppError::invalid_data("start_date must not be after end_date"));
                }
                self.matches.list_by_date_range(start, end, pagination).await
            }
        }
    }

    /// Completes a match with its final score and scorers.
    ///
    /// Everything is validated before the first write. Recording again on a
    /// completed match replaces its goals. All writes commit together or not
    /// at all.
    pub async fn record_result(&self, id: Uuid, request: RecordResultRequest) -> Result<MatchDetails> {
        let details = self.get_by_id_with_details(id).await?;
        let mut fixture = details.fixture;

        if !fixture.status.can_record_result() {
            return Err(AppError::InvalidStatusTransition {
                from: fixture.status,
                to: MatchStatus::Completed,
            });
        }
        if request.home_score < 0 || request.away_score < 0 {
            return Err(AppError::invalid_data("scores must not be negative"));
        }
        for goal in &request.goals {
            if !is_valid_minute(goal.minute) {
                return Err(AppError::InvalidGoalMinute(goal.minute));
            }
        }
        for goal in &request.goals {
            if !self.players.exists(goal.player_id).await? {
                return Err(AppError::PlayerNotFound);
            }
        }

        let is_correction = fixture.status == MatchStatus::Completed;
        fixture.complete_with(request.home_score, request.away_score);
        let goals: Vec<Goal> = request
            .goals
            .iter()
            .map(|g| Goal::new(fixture.id, g.player_id, g.team_id, g.minute, g.is_own_goal))
            .collect();
        let goal_count = goals.len();

        let mut tx = self.unit_of_work.begin().await?;
        if let Err(err) = Self::write_result(tx.as_mut(), &fixture, goals, is_correction).await {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!("Rollback of result for match {} failed: {}", id, rollback_err);
            }
            return Err(err);
        }
        tx.commit().await?;

        tracing::info!(
            "Recorded result {}-{} for match {} with {} goals{}",
            request.home_score,
            request.away_score,
            id,
            goal_count,
            if is_correction { " (correction)" } else { "" }
        );

        self.get_by_id_with_details(id).await
    }

    async fn write_result(
        tx: &mut dyn ResultTransaction,
        fixture: &Match,
        goals: Vec<Goal>,
        is_correction: bool,
    ) -> Result<()> {
        if is_correction {
            tx.delete_goals_by_match(fixture.id).await?;
        }
        tx.update_match(fixture).await?;
        tx.insert_goals(goals).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::models::matches::MatchResult;
    use crate::models::player::{Player, PlayerPosition};
    use crate::models::team::Team;
    use crate::repositories::{MockMatchRepository, MockPlayerRepository, MockResultTransaction, MockTeamRepository, MockUnitOfWork, Store};

    struct Fixture {
        store: Store,
        service: MatchService,
        home: Team,
        away: Team,
        striker: Player,
    }

    fn service_for(store: &Store) -> MatchService {
        MatchService::new(
            store.matches.clone(),
            store.teams.clone(),
            store.players.clone(),
            store.unit_of_work.clone(),
        )
    }

    async fn setup() -> Fixture {
        let store = MemoryStore::new().into_store();
        let home = Team::new("Team A", 1928, "Jakarta");
        let away = Team::new("Team B", 1933, "Bandung");
        store.teams.create(&home).await.unwrap();
        store.teams.create(&away).await.unwrap();
        let striker = Player::new(home.id, "P1", PlayerPosition::Forward, 9);
        store.players.create(&striker).await.unwrap();

        Fixture {
            service: service_for(&store),
            store,
            home,
            away,
            striker,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 17).unwrap()
    }

    fn create_request(home: Uuid, away: Uuid) -> CreateMatchRequest {
        CreateMatchRequest {
            match_date: date(),
            match_time: "19:00".to_string(),
            home_team_id: home,
            away_team_id: away,
            status: None,
        }
    }

    fn goal(player: &Player, team: &Team, minute: i32) -> GoalInput {
        GoalInput {
            player_id: player.id,
            team_id: team.id,
            minute,
            is_own_goal: false,
        }
    }

    #[tokio::test]
    async fn create_schedules_a_match_without_scores() {
        let f = setup().await;

        let fixture = f.service.create(create_request(f.home.id, f.away.id)).await.unwrap();

        assert_eq!(fixture.status, MatchStatus::Scheduled);
        assert_eq!(fixture.home_score, None);
        assert_eq!(fixture.away_score, None);
        assert!(f.store.matches.exists(fixture.id).await.unwrap());
    }

    #[tokio::test]
    async fn same_team_is_rejected_even_for_unknown_teams() {
        let f = setup().await;
        let ghost = Uuid::new_v4();

        let err = f.service.create(create_request(ghost, ghost)).await.unwrap_err();
        assert!(matches!(err, AppError::SameTeamMatch));

        let err = f.service.create(create_request(f.home.id, f.home.id)).await.unwrap_err();
        assert!(matches!(err, AppError::SameTeamMatch));
    }

    #[tokio::test]
    async fn unknown_team_is_rejected() {
        let f = setup().await;

        let err = f
            .service
            .create(create_request(f.home.id, Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TeamNotFound));
    }

    #[tokio::test]
    async fn create_cannot_start_completed() {
        let f = setup().await;
        let mut request = create_request(f.home.id, f.away.id);
        request.status = Some(MatchStatus::Completed);

        let err = f.service.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition { .. }));
    }

    #[tokio::test]
    async fn malformed_kickoff_time_is_rejected() {
        let f = setup().await;
        let mut request = create_request(f.home.id, f.away.id);
        request.match_time = "7pm".to_string();

        let err = f.service.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn update_enforces_the_transition_table() {
        let f = setup().await;
        let fixture = f.service.create(create_request(f.home.id, f.away.id)).await.unwrap();

        let update = |status| UpdateMatchRequest {
            match_date: date(),
            match_time: "20:30".to_string(),
            home_team_id: f.home.id,
            away_team_id: f.away.id,
            status: Some(status),
        };

        let ongoing = f.service.update(fixture.id, update(MatchStatus::Ongoing)).await.unwrap();
        assert_eq!(ongoing.status, MatchStatus::Ongoing);
        assert_eq!(ongoing.match_time, "20:30");

        let err = f
            .service
            .update(fixture.id, update(MatchStatus::Scheduled))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidStatusTransition {
                from: MatchStatus::Ongoing,
                to: MatchStatus::Scheduled
            }
        ));

        let err = f
            .service
            .update(fixture.id, update(MatchStatus::Completed))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition { .. }));
    }

    fn unchanged_update(home: Uuid, away: Uuid) -> UpdateMatchRequest {
        UpdateMatchRequest {
            match_date: date(),
            match_time: "19:00".to_string(),
            home_team_id: home,
            away_team_id: away,
            status: None,
        }
    }

    #[tokio::test]
    async fn update_rejects_a_same_team_pairing() {
        let f = setup().await;
        let fixture = f.service.create(create_request(f.home.id, f.away.id)).await.unwrap();

        let err = f
            .service
            .update(fixture.id, unchanged_update(f.home.id, f.home.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SameTeamMatch));

        let stored = f.service.get_by_id(fixture.id).await.unwrap();
        assert_eq!(stored.away_team_id, f.away.id);
    }

    #[tokio::test]
    async fn update_rechecks_teams_even_when_unchanged() {
        let f = setup().await;
        let fixture = f.service.create(create_request(f.home.id, f.away.id)).await.unwrap();
        f.store.teams.delete(f.away.id).await.unwrap();

        let err = f
            .service
            .update(fixture.id, unchanged_update(f.home.id, f.away.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TeamNotFound));
    }

    #[tokio::test]
    async fn update_of_missing_match_is_not_found() {
        let f = setup().await;
        let request = UpdateMatchRequest {
            match_date: date(),
            match_time: "20:30".to_string(),
            home_team_id: f.home.id,
            away_team_id: f.away.id,
            status: None,
        };

        let err = f.service.update(Uuid::new_v4(), request).await.unwrap_err();
        assert!(matches!(err, AppError::MatchNotFound));
    }

    #[tokio::test]
    async fn recording_a_result_completes_the_match() {
        let f = setup().await;
        let fixture = f.service.create(create_request(f.home.id, f.away.id)).await.unwrap();

        let details = f
            .service
            .record_result(
                fixture.id,
                RecordResultRequest {
                    home_score: 2,
                    away_score: 1,
                    goals: vec![goal(&f.striker, &f.home, 34)],
                },
            )
            .await
            .unwrap();

        assert_eq!(details.fixture.status, MatchStatus::Completed);
        assert_eq!(details.result(), MatchResult::HomeWin);
        assert_eq!(details.goals.len(), 1);
        assert_eq!(details.goals[0].player_name.as_deref(), Some("P1"));
        assert_eq!(details.home_team.as_ref().map(|t| t.name.as_str()), Some("Team A"));
    }

    #[tokio::test]
    async fn recording_twice_replaces_the_goals() {
        let f = setup().await;
        let fixture = f.service.create(create_request(f.home.id, f.away.id)).await.unwrap();

        f.service
            .record_result(
                fixture.id,
                RecordResultRequest {
                    home_score: 2,
                    away_score: 0,
                    goals: vec![goal(&f.striker, &f.home, 10), goal(&f.striker, &f.home, 20)],
                },
            )
            .await
            .unwrap();

        let details = f
            .service
            .record_result(
                fixture.id,
                RecordResultRequest {
                    home_score: 1,
                    away_score: 1,
                    goals: vec![goal(&f.striker, &f.home, 88)],
                },
            )
            .await
            .unwrap();

        assert_eq!(details.result(), MatchResult::Draw);
        let minutes: Vec<i32> = details.goals.iter().map(|g| g.goal.minute).collect();
        assert_eq!(minutes, vec![88]);
        assert_eq!(f.store.goals.find_by_match_id(fixture.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_match_cannot_take_a_result() {
        let f = setup().await;
        let mut request = create_request(f.home.id, f.away.id);
        request.status = Some(MatchStatus::Cancelled);
        let fixture = f.service.create(request).await.unwrap();

        let err = f
            .service
            .record_result(
                fixture.id,
                RecordResultRequest {
                    home_score: 1,
                    away_score: 0,
                    goals: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidStatusTransition {
                from: MatchStatus::Cancelled,
                to: MatchStatus::Completed
            }
        ));
    }

    #[tokio::test]
    async fn unknown_scorer_leaves_the_match_untouched() {
        let f = setup().await;
        let fixture = f.service.create(create_request(f.home.id, f.away.id)).await.unwrap();
        let stranger = Player::new(f.away.id, "Ghost", PlayerPosition::Forward, 7);

        let err = f
            .service
            .record_result(
                fixture.id,
                RecordResultRequest {
                    home_score: 1,
                    away_score: 1,
                    goals: vec![goal(&f.striker, &f.home, 5), goal(&stranger, &f.away, 50)],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PlayerNotFound));

        let stored = f.service.get_by_id(fixture.id).await.unwrap();
        assert_eq!(stored.status, MatchStatus::Scheduled);
        assert_eq!(stored.home_score, None);
        assert!(f.store.goals.find_by_match_id(fixture.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_minute_is_rejected() {
        let f = setup().await;
        let fixture = f.service.create(create_request(f.home.id, f.away.id)).await.unwrap();

        let err = f
            .service
            .record_result(
                fixture.id,
                RecordResultRequest {
                    home_score: 1,
                    away_score: 0,
                    goals: vec![goal(&f.striker, &f.home, 121)],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidGoalMinute(121)));
    }

    #[tokio::test]
    async fn listing_by_unknown_team_is_not_found() {
        let f = setup().await;
        let err = f
            .service
            .list(MatchFilter::Team(Uuid::new_v4()), Pagination::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TeamNotFound));
    }

    #[tokio::test]
    async fn delete_hides_the_match() {
        let f = setup().await;
        let fixture = f.service.create(create_request(f.home.id, f.away.id)).await.unwrap();

        f.service.delete(fixture.id).await.unwrap();

        assert!(matches!(f.service.get_by_id(fixture.id).await, Err(AppError::MatchNotFound)));
        assert!(matches!(f.service.delete(fixture.id).await, Err(AppError::MatchNotFound)));
    }

    fn scheduled_details(home: Uuid, away: Uuid) -> MatchDetails {
        MatchDetails {
            fixture: Match::new(date(), "15:00", home, away),
            home_team: None,
            away_team: None,
            goals: vec![],
        }
    }

    #[tokio::test]
    async fn failed_goal_insert_rolls_back() {
        let details = scheduled_details(Uuid::new_v4(), Uuid::new_v4());
        let match_id = details.fixture.id;

        let mut matches = MockMatchRepository::new();
        matches
            .expect_find_by_id_with_details()
            .times(1)
            .returning(move |_| Ok(Some(details.clone())));

        let mut players = MockPlayerRepository::new();
        players.expect_exists().returning(|_| Ok(true));

        let mut unit_of_work = MockUnitOfWork::new();
        unit_of_work.expect_begin().times(1).returning(|| {
            let mut tx = MockResultTransaction::new();
            tx.expect_delete_goals_by_match().never();
            tx.expect_update_match().times(1).returning(|_| Ok(()));
            tx.expect_insert_goals()
                .times(1)
                .returning(|_| Err(AppError::internal("write conflict")));
            tx.expect_rollback().times(1).returning(|| Ok(()));
            tx.expect_commit().never();
            Ok(Box::new(tx) as Box<dyn ResultTransaction>)
        });

        let service = MatchService::new(
            Arc::new(matches),
            Arc::new(MockTeamRepository::new()),
            Arc::new(players),
            Arc::new(unit_of_work),
        );

        let err = service
            .record_result(
                match_id,
                RecordResultRequest {
                    home_score: 1,
                    away_score: 0,
                    goals: vec![GoalInput {
                        player_id: Uuid::new_v4(),
                        team_id: Uuid::new_v4(),
                        minute: 12,
                        is_own_goal: false,
                    }],
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn store_failure_passes_through_before_any_write() {
        let mut matches = MockMatchRepository::new();
        matches
            .expect_find_by_id_with_details()
            .returning(|_| Err(AppError::internal("connection reset")));

        let mut unit_of_work = MockUnitOfWork::new();
        unit_of_work.expect_begin().never();

        let service = MatchService::new(
            Arc::new(matches),
            Arc::new(MockTeamRepository::new()),
            Arc::new(MockPlayerRepository::new()),
            Arc::new(unit_of_work),
        );

        let err = service
            .record_result(
                Uuid::new_v4(),
                RecordResultRequest {
                    home_score: 0,
                    away_score: 0,
                    goals: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
