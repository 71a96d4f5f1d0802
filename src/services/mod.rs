pub mod auth_service;
pub mod match_service;
pub mod player_service;
pub mod report_service;
pub mod team_service;
