use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Allowed habit durations, in minutes
pub const DURATION_CHOICES: [u8; 5] = [1, 2, 3, 4, 5];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub duration: u8, // minutes, one of DURATION_CHOICES
    pub reminder_enabled: bool,
    pub reminder_time: Option<String>, // "HH:MM"
    pub streak: u32,
    pub longest_streak: u32,
    pub completed_today: bool,
    pub last_completed: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a habit; streak state is never caller-supplied
#[derive(Debug, Clone, Default)]
pub struct HabitDraft {
    pub name: String,
    pub emoji: String,
    pub duration: u8,
    pub reminder_enabled: bool,
    pub reminder_time: Option<String>,
}

/// Partial edit applied to an existing habit. `None` fields are left
/// untouched; streak state only changes when explicitly supplied.
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub duration: Option<u8>,
    pub reminder_enabled: Option<bool>,
    pub reminder_time: Option<Option<String>>,
    pub streak: Option<u32>,
    pub longest_streak: Option<u32>,
    pub completed_today: Option<bool>,
    pub last_completed: Option<Option<NaiveDate>>,
}

impl Habit {
    pub fn new(draft: HabitDraft) -> Self {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            emoji: draft.emoji,
            duration: draft.duration,
            reminder_enabled: draft.reminder_enabled,
            reminder_time: draft.reminder_time,
            streak: 0,
            longest_streak: 0,
            completed_today: false,
            last_completed: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Merge an update into this habit
    pub fn apply_update(&mut self, update: HabitUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(emoji) = update.emoji {
            self.emoji = emoji;
        }
        if let Some(duration) = update.duration {
            self.duration = duration;
        }
        if let Some(reminder_enabled) = update.reminder_enabled {
            self.reminder_enabled = reminder_enabled;
        }
        if let Some(reminder_time) = update.reminder_time {
            self.reminder_time = reminder_time;
        }
        if let Some(streak) = update.streak {
            self.streak = streak;
        }
        if let Some(longest_streak) = update.longest_streak {
            self.longest_streak = longest_streak;
        }
        if let Some(completed_today) = update.completed_today {
            self.completed_today = completed_today;
        }
        if let Some(last_completed) = update.last_completed {
            self.last_completed = last_completed;
        }
        self.updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> HabitDraft {
        HabitDraft {
            name: name.to_string(),
            emoji: "💧".to_string(),
            duration: 2,
            reminder_enabled: false,
            reminder_time: None,
        }
    }

    #[test]
    fn test_new_habit_starts_with_zeroed_streak_state() {
        let habit = Habit::new(draft("Drink water"));
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.longest_streak, 0);
        assert!(!habit.completed_today);
        assert!(habit.last_completed.is_none());
        assert!(!habit.id.is_empty());
    }

    #[test]
    fn test_new_habits_get_distinct_ids() {
        let a = Habit::new(draft("a"));
        let b = Habit::new(draft("b"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_update_leaves_unsupplied_fields_alone() {
        let mut habit = Habit::new(draft("Stretch"));
        habit.streak = 4;
        habit.longest_streak = 7;

        habit.apply_update(HabitUpdate {
            name: Some("Morning stretch".to_string()),
            duration: Some(5),
            ..Default::default()
        });

        assert_eq!(habit.name, "Morning stretch");
        assert_eq!(habit.duration, 5);
        assert_eq!(habit.streak, 4);
        assert_eq!(habit.longest_streak, 7);
        assert!(habit.last_completed.is_none());
    }

    #[test]
    fn test_apply_update_can_clear_reminder_time() {
        let mut habit = Habit::new(HabitDraft {
            reminder_time: Some("08:30".to_string()),
            reminder_enabled: true,
            ..draft("Read")
        });

        habit.apply_update(HabitUpdate {
            reminder_enabled: Some(false),
            reminder_time: Some(None),
            ..Default::default()
        });

        assert!(!habit.reminder_enabled);
        assert!(habit.reminder_time.is_none());
    }
}
