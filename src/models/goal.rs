use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_GOAL_MINUTE: i32 = 1;
pub const MAX_GOAL_MINUTE: i32 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    /// Side credited with the goal; differs from the player's team for own goals.
    pub team_id: Uuid,
    pub minute: i32,
    pub is_own_goal: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(match_id: Uuid, player_id: Uuid, team_id: Uuid, minute: i32, is_own_goal: bool) -> Self {
        Goal {
            id: Uuid::new_v4(),
            match_id,
            player_id,
            team_id,
            minute,
            is_own_goal,
            created_at: Utc::now(),
        }
    }
}

pub fn is_valid_minute(minute: i32) -> bool {
    (MIN_GOAL_MINUTE..=MAX_GOAL_MINUTE).contains(&minute)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDetails {
    #[serde(flatten)]
    pub goal: Goal,
    pub player_name: Option<String>,
    pub team_name: Option<String>,
}

/// One row of the top-scorer ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopScorer {
    pub player_id: Uuid,
    pub player_name: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub goal_count: i64,
}

/// Orders by goal count, most first, then by player id.
pub fn rank_top_scorers(scorers: &mut [TopScorer]) {
    scorers.sort_by(|a, b| {
        b.goal_count
            .cmp(&a.goal_count)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer(goal_count: i64) -> TopScorer {
        TopScorer {
            player_id: Uuid::new_v4(),
            player_name: format!("Player {}", goal_count),
            team_id: Uuid::new_v4(),
            team_name: "Team".to_string(),
            goal_count,
        }
    }

    #[test]
    fn minute_bounds() {
        assert!(!is_valid_minute(0));
        assert!(is_valid_minute(1));
        assert!(is_valid_minute(90));
        assert!(is_valid_minute(120));
        assert!(!is_valid_minute(121));
    }

    #[test]
    fn ranking_breaks_ties_by_player_id() {
        let mut scorers = vec![scorer(3), scorer(5), scorer(1), scorer(5)];
        rank_top_scorers(&mut scorers);

        assert_eq!(
            scorers.iter().map(|s| s.goal_count).collect::<Vec<_>>(),
            vec![5, 5, 3, 1]
        );
        assert!(scorers[0].player_id < scorers[1].player_id);
    }
}
