use std::sync::Arc;

use crate::config::AppConfig;
use crate::repositories::Store;
use crate::services::auth_service::AuthService;
use crate::services::match_service::MatchService;
use crate::services::player_service::PlayerService;
use crate::services::report_service::ReportService;
use crate::services::team_service::TeamService;

#[derive(Clone)]
pub struct AppState {
    pub teams: Arc<TeamService>,
    pub players: Arc<PlayerService>,
    pub matches: Arc<MatchService>,
    pub reports: Arc<ReportService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Store, config: &AppConfig) -> Self {
        AppState {
            teams: Arc::new(TeamService::new(store.teams.clone())),
            players: Arc::new(PlayerService::new(store.players.clone(), store.teams.clone())),
            matches: Arc::new(MatchService::new(
                store.matches.clone(),
                store.teams.clone(),
                store.players.clone(),
                store.unit_of_work.clone(),
            )),
            reports: Arc::new(ReportService::new(store.matches.clone(), store.goals.clone())),
            auth: Arc::new(AuthService::new(
                store.users,
                config.jwt_secret.clone(),
                config.jwt_expiration_hours,
            )),
        }
    }

    #[cfg(test)]
    pub fn with_auth(mut self, auth: AuthService) -> Self {
        self.auth = Arc::new(auth);
        self
    }
}
