//! In-memory habit collection and its orchestration.
//!
//! The store owns the habit list for the lifetime of the process. Every
//! mutation updates memory first and then flushes the whole list to the
//! database; a failed flush is logged and never surfaced, so readers see
//! the new logical state immediately and the next mutation persists the
//! latest state again.

use tracing::warn;

use crate::database::Database;
use crate::date;
use crate::models::{Habit, HabitDraft, HabitUpdate};
use crate::streak;

pub struct HabitStore {
    habits: Vec<Habit>,
    has_completed_onboarding: bool,
    db: Database,
}

impl HabitStore {
    /// Load persisted state and run the daily-reset sweep.
    ///
    /// Fails open: an unreadable habit list or onboarding flag yields an
    /// empty list / false rather than an error.
    pub fn load(db: Database) -> Self {
        let habits = db.load_habits().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load habits, starting empty");
            Vec::new()
        });
        let has_completed_onboarding = db.load_onboarding().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load onboarding flag");
            false
        });

        let mut store = Self {
            habits,
            has_completed_onboarding,
            db,
        };
        store.reset_daily_completion();
        store
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.has_completed_onboarding
    }

    pub fn find(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Case-insensitive exact name lookup, used by the CLI
    pub fn find_by_name(&self, name: &str) -> Option<&Habit> {
        self.habits
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
    }

    /// Create a habit and append it to the list. The habit exists in
    /// memory before the flush runs; a flush failure does not undo it.
    pub fn add_habit(&mut self, draft: HabitDraft) -> &Habit {
        self.habits.push(Habit::new(draft));
        self.flush();
        self.habits.last().expect("habit was just pushed")
    }

    /// Merge fields into the matching habit; no-op if the id is unknown.
    /// Streak state is untouched unless the update explicitly carries it.
    pub fn update_habit(&mut self, id: &str, update: HabitUpdate) {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return;
        };
        habit.apply_update(update);
        self.flush();
    }

    /// Remove the matching habit; no-op if the id is unknown
    pub fn delete_habit(&mut self, id: &str) {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() != before {
            self.flush();
        }
    }

    /// Mark a habit complete for today, at most once per day.
    ///
    /// Checks both `completed_today` and the stored date: the two fields
    /// should agree, but nothing enforces that at the type level, so the
    /// guard holds even when one of them is stale.
    pub fn complete_habit(&mut self, id: &str) {
        let today = date::today();
        let yesterday = date::yesterday();

        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return;
        };
        if habit.completed_today || date::is_today(habit.last_completed) {
            return;
        }

        let update = streak::check_streak(habit, today, yesterday);
        habit.apply_update(HabitUpdate {
            streak: Some(update.streak),
            longest_streak: Some(update.longest_streak),
            completed_today: Some(true),
            last_completed: Some(Some(today)),
            ..Default::default()
        });
        self.flush();
    }

    /// Undo today's completion; only a completion made today can be undone
    pub fn undo_completion(&mut self, id: &str) {
        let today = date::today();
        let yesterday = date::yesterday();

        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return;
        };
        if !habit.completed_today || !date::is_today(habit.last_completed) {
            return;
        }

        let outcome = streak::undo_completion(habit, today, yesterday);
        habit.apply_update(HabitUpdate {
            streak: Some(outcome.streak),
            completed_today: Some(false),
            last_completed: Some(outcome.last_completed),
            ..Default::default()
        });
        self.flush();
    }

    /// Clear `completed_today` on every habit whose last completion is
    /// not today. Streaks are untouched; the streak only changes on the
    /// next completion or undo. Idempotent, and always flushes so a
    /// rollover is durable even when nothing changed in memory.
    pub fn reset_daily_completion(&mut self) {
        for habit in &mut self.habits {
            if !date::is_today(habit.last_completed) {
                habit.completed_today = false;
            }
        }
        self.flush();
    }

    pub fn set_has_completed_onboarding(&mut self, value: bool) {
        self.has_completed_onboarding = value;
        if let Err(e) = self.db.save_onboarding(value) {
            warn!(error = %e, "failed to persist onboarding flag");
        }
    }

    /// Persist the whole list; failures are logged, never propagated
    fn flush(&self) {
        if let Err(e) = self.db.save_habits(&self.habits) {
            warn!(error = %e, "failed to persist habits");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HabitStore {
        HabitStore::load(Database::open_in_memory().unwrap())
    }

    fn draft(name: &str) -> HabitDraft {
        HabitDraft {
            name: name.to_string(),
            emoji: "🏃".to_string(),
            duration: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_load_from_empty_database_yields_empty_list() {
        let s = store();
        assert!(s.habits().is_empty());
        assert!(!s.has_completed_onboarding());
    }

    #[test]
    fn test_add_habit_initializes_and_persists() {
        let mut s = store();
        let id = s.add_habit(draft("Floss")).id.clone();

        let habit = s.find(&id).unwrap();
        assert_eq!(habit.streak, 0);
        assert!(!habit.completed_today);
        assert!(habit.last_completed.is_none());
    }

    #[test]
    fn test_complete_sets_flag_date_and_streak() {
        // Scenario: streak 5, completed yesterday, completing today
        let mut s = store();
        let id = s.add_habit(draft("Walk")).id.clone();
        s.update_habit(
            &id,
            HabitUpdate {
                streak: Some(5),
                longest_streak: Some(5),
                last_completed: Some(Some(date::yesterday())),
                ..Default::default()
            },
        );

        s.complete_habit(&id);

        let habit = s.find(&id).unwrap();
        assert_eq!(habit.streak, 6);
        assert_eq!(habit.longest_streak, 6);
        assert!(habit.completed_today);
        assert_eq!(habit.last_completed, Some(date::today()));
    }

    #[test]
    fn test_complete_twice_is_idempotent() {
        let mut s = store();
        let id = s.add_habit(draft("Walk")).id.clone();

        s.complete_habit(&id);
        let after_first = s.find(&id).unwrap().clone();
        s.complete_habit(&id);
        let after_second = s.find(&id).unwrap();

        assert_eq!(after_second.streak, after_first.streak);
        assert_eq!(after_second.longest_streak, after_first.longest_streak);
        assert_eq!(after_second.last_completed, after_first.last_completed);
    }

    #[test]
    fn test_complete_guard_catches_stale_flag() {
        // completed_today is false but last_completed already says today
        let mut s = store();
        let id = s.add_habit(draft("Walk")).id.clone();
        s.update_habit(
            &id,
            HabitUpdate {
                streak: Some(1),
                longest_streak: Some(1),
                last_completed: Some(Some(date::today())),
                ..Default::default()
            },
        );

        s.complete_habit(&id);

        assert_eq!(s.find(&id).unwrap().streak, 1);
    }

    #[test]
    fn test_gap_resets_streak_but_keeps_longest() {
        // Scenario: last completed 10 days ago with streak 20
        let mut s = store();
        let id = s.add_habit(draft("Write")).id.clone();
        let ten_days_ago = date::today() - chrono::Days::new(10);
        s.update_habit(
            &id,
            HabitUpdate {
                streak: Some(20),
                longest_streak: Some(20),
                last_completed: Some(Some(ten_days_ago)),
                ..Default::default()
            },
        );

        s.complete_habit(&id);

        let habit = s.find(&id).unwrap();
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.longest_streak, 20);
    }

    #[test]
    fn test_undo_restores_yesterday_state() {
        // Scenario: streak 6 completed today, undo rolls back to 5/yesterday
        let mut s = store();
        let id = s.add_habit(draft("Run")).id.clone();
        s.update_habit(
            &id,
            HabitUpdate {
                streak: Some(5),
                longest_streak: Some(5),
                last_completed: Some(Some(date::yesterday())),
                ..Default::default()
            },
        );
        s.complete_habit(&id);

        s.undo_completion(&id);

        let habit = s.find(&id).unwrap();
        assert_eq!(habit.streak, 5);
        assert_eq!(habit.last_completed, Some(date::yesterday()));
        assert!(!habit.completed_today);
        // the high-water mark survives
        assert_eq!(habit.longest_streak, 6);
    }

    #[test]
    fn test_undo_first_completion_restores_fresh_state() {
        let mut s = store();
        let id = s.add_habit(draft("Run")).id.clone();
        s.complete_habit(&id);

        s.undo_completion(&id);

        let habit = s.find(&id).unwrap();
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.last_completed, None);
        assert!(!habit.completed_today);
    }

    #[test]
    fn test_undo_without_todays_completion_is_a_noop() {
        let mut s = store();
        let id = s.add_habit(draft("Run")).id.clone();
        s.update_habit(
            &id,
            HabitUpdate {
                streak: Some(3),
                longest_streak: Some(3),
                last_completed: Some(Some(date::yesterday())),
                ..Default::default()
            },
        );

        s.undo_completion(&id);

        let habit = s.find(&id).unwrap();
        assert_eq!(habit.streak, 3);
        assert_eq!(habit.last_completed, Some(date::yesterday()));
    }

    #[test]
    fn test_editing_display_fields_never_touches_streak() {
        let mut s = store();
        let id = s.add_habit(draft("Read")).id.clone();
        s.complete_habit(&id);
        let before = s.find(&id).unwrap().clone();

        s.update_habit(
            &id,
            HabitUpdate {
                name: Some("Read fiction".to_string()),
                duration: Some(4),
                reminder_enabled: Some(true),
                reminder_time: Some(Some("21:00".to_string())),
                ..Default::default()
            },
        );

        let habit = s.find(&id).unwrap();
        assert_eq!(habit.name, "Read fiction");
        assert_eq!(habit.streak, before.streak);
        assert_eq!(habit.longest_streak, before.longest_streak);
        assert_eq!(habit.completed_today, before.completed_today);
        assert_eq!(habit.last_completed, before.last_completed);
    }

    #[test]
    fn test_mutations_on_unknown_ids_are_noops() {
        let mut s = store();
        s.add_habit(draft("Real"));

        s.complete_habit("nope");
        s.undo_completion("nope");
        s.delete_habit("nope");
        s.update_habit("nope", HabitUpdate::default());

        assert_eq!(s.habits().len(), 1);
        assert_eq!(s.habits()[0].streak, 0);
    }

    #[test]
    fn test_delete_removes_habit() {
        let mut s = store();
        let id = s.add_habit(draft("Gone")).id.clone();
        s.add_habit(draft("Stays"));

        s.delete_habit(&id);

        assert_eq!(s.habits().len(), 1);
        assert_eq!(s.habits()[0].name, "Stays");
    }

    #[test]
    fn test_reset_clears_stale_flags_and_spares_streaks() {
        // Scenario: day rolled over with the flag still set
        let mut s = store();
        let id = s.add_habit(draft("Stretch")).id.clone();
        s.update_habit(
            &id,
            HabitUpdate {
                streak: Some(7),
                longest_streak: Some(7),
                completed_today: Some(true),
                last_completed: Some(Some(date::yesterday())),
                ..Default::default()
            },
        );

        s.reset_daily_completion();

        let habit = s.find(&id).unwrap();
        assert!(!habit.completed_today);
        assert_eq!(habit.streak, 7);
        assert_eq!(habit.longest_streak, 7);
    }

    #[test]
    fn test_reset_spares_habits_completed_today() {
        let mut s = store();
        let id = s.add_habit(draft("Stretch")).id.clone();
        s.complete_habit(&id);

        s.reset_daily_completion();

        assert!(s.find(&id).unwrap().completed_today);
    }

    #[test]
    fn test_reset_twice_matches_reset_once() {
        let mut s = store();
        let id = s.add_habit(draft("Stretch")).id.clone();
        s.update_habit(
            &id,
            HabitUpdate {
                completed_today: Some(true),
                last_completed: Some(Some(date::yesterday())),
                streak: Some(2),
                longest_streak: Some(2),
                ..Default::default()
            },
        );

        s.reset_daily_completion();
        let once = s.find(&id).unwrap().clone();
        s.reset_daily_completion();
        let twice = s.find(&id).unwrap();

        assert_eq!(twice.completed_today, once.completed_today);
        assert_eq!(twice.streak, once.streak);
        assert_eq!(twice.last_completed, once.last_completed);
    }

    #[test]
    fn test_load_runs_the_sweep() {
        // Persist a habit that looks completed yesterday, then reload
        let db = Database::open_in_memory().unwrap();
        let mut habit = Habit::new(draft("Meditate"));
        habit.streak = 3;
        habit.longest_streak = 3;
        habit.completed_today = true;
        habit.last_completed = Some(date::yesterday());
        db.save_habits(&[habit]).unwrap();

        let s = HabitStore::load(db);

        assert!(!s.habits()[0].completed_today);
        assert_eq!(s.habits()[0].streak, 3);
    }

    #[test]
    fn test_onboarding_flag_set_and_read() {
        let mut s = store();
        assert!(!s.has_completed_onboarding());
        s.set_has_completed_onboarding(true);
        assert!(s.has_completed_onboarding());
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let mut s = store();
        s.add_habit(draft("Cold Shower"));
        assert!(s.find_by_name("cold shower").is_some());
        assert!(s.find_by_name("hot shower").is_none());
    }
}
