pub mod goal;
pub mod matches;
pub mod pagination;
pub mod player;
pub mod report;
pub mod team;
pub mod user;
