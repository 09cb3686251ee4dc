//! Consecutive-day streak transitions.
//!
//! Every function here is a pure transition: the relevant calendar dates
//! are parameters, the habit is read-only, and the result describes the
//! fields to apply. The store applies results and handles persistence.

use chrono::NaiveDate;

use crate::models::Habit;

/// New streak values produced by a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: u32,
    pub longest_streak: u32,
}

/// Streak values restored by undoing today's completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoOutcome {
    pub streak: u32,
    pub last_completed: Option<NaiveDate>,
}

/// Compute the streak value a completion on `today` would produce.
///
/// A habit never completed starts at 1. A habit already completed today
/// keeps its streak (the caller guards against this state, but the
/// function does not increment either way). Completion on consecutive
/// days extends the chain; any gap of two or more days resets it to 1,
/// whether the gap is 2 days or 200.
pub fn next_streak(habit: &Habit, today: NaiveDate, yesterday: NaiveDate) -> u32 {
    match habit.last_completed {
        None => 1,
        Some(last) if last == today => habit.streak,
        Some(last) if last == yesterday => habit.streak + 1,
        Some(_) => 1,
    }
}

/// Compute the streak and longest-streak values for a completion.
/// Called exactly once per completion action.
pub fn check_streak(habit: &Habit, today: NaiveDate, yesterday: NaiveDate) -> StreakUpdate {
    let streak = next_streak(habit, today, yesterday);
    StreakUpdate {
        streak,
        longest_streak: habit.longest_streak.max(streak),
    }
}

/// Compute the streak state restored by undoing today's completion.
///
/// Only a completion made today can be undone; anything else returns the
/// current values unchanged. If the streak was longer than 1 the prior
/// completion day must have been yesterday, so the chain rolls back one
/// day; a streak of exactly 1 means today was the first-ever completion
/// and the habit returns to its never-completed state. The longest
/// streak is a permanent high-water mark and is never rolled back.
pub fn undo_completion(habit: &Habit, today: NaiveDate, yesterday: NaiveDate) -> UndoOutcome {
    if !habit.completed_today || habit.last_completed != Some(today) {
        return UndoOutcome {
            streak: habit.streak,
            last_completed: habit.last_completed,
        };
    }

    if habit.streak > 1 {
        UndoOutcome {
            streak: habit.streak - 1,
            last_completed: Some(yesterday),
        }
    } else {
        UndoOutcome {
            streak: 0,
            last_completed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitDraft;

    fn day(s: &str) -> NaiveDate {
        crate::date::parse_date(s).unwrap()
    }

    fn habit() -> Habit {
        Habit::new(HabitDraft {
            name: "Meditate".to_string(),
            emoji: "🧘".to_string(),
            duration: 5,
            ..Default::default()
        })
    }

    const TODAY: &str = "2024-06-15";
    const YESTERDAY: &str = "2024-06-14";

    #[test]
    fn test_first_completion_starts_at_one() {
        let h = habit();
        assert_eq!(next_streak(&h, day(TODAY), day(YESTERDAY)), 1);
    }

    #[test]
    fn test_already_completed_today_does_not_increment() {
        let mut h = habit();
        h.streak = 3;
        h.last_completed = Some(day(TODAY));
        assert_eq!(next_streak(&h, day(TODAY), day(YESTERDAY)), 3);
    }

    #[test]
    fn test_consecutive_day_extends_streak() {
        let mut h = habit();
        h.streak = 5;
        h.last_completed = Some(day(YESTERDAY));
        assert_eq!(next_streak(&h, day(TODAY), day(YESTERDAY)), 6);
    }

    #[test]
    fn test_two_day_gap_resets_to_one() {
        let mut h = habit();
        h.streak = 9;
        h.last_completed = Some(day("2024-06-13"));
        assert_eq!(next_streak(&h, day(TODAY), day(YESTERDAY)), 1);
    }

    #[test]
    fn test_long_gap_gets_same_treatment_as_short_gap() {
        let mut h = habit();
        h.streak = 20;
        h.last_completed = Some(day("2023-11-27"));
        assert_eq!(next_streak(&h, day(TODAY), day(YESTERDAY)), 1);
    }

    #[test]
    fn test_check_streak_raises_longest_streak() {
        let mut h = habit();
        h.streak = 5;
        h.longest_streak = 5;
        h.last_completed = Some(day(YESTERDAY));

        let update = check_streak(&h, day(TODAY), day(YESTERDAY));
        assert_eq!(update.streak, 6);
        assert_eq!(update.longest_streak, 6);
    }

    #[test]
    fn test_check_streak_keeps_longest_streak_after_gap() {
        let mut h = habit();
        h.streak = 20;
        h.longest_streak = 20;
        h.last_completed = Some(day("2024-06-05"));

        let update = check_streak(&h, day(TODAY), day(YESTERDAY));
        assert_eq!(update.streak, 1);
        assert_eq!(update.longest_streak, 20);
    }

    #[test]
    fn test_check_streak_never_lowers_longest() {
        let mut h = habit();
        h.streak = 2;
        h.longest_streak = 11;
        h.last_completed = Some(day(YESTERDAY));

        let update = check_streak(&h, day(TODAY), day(YESTERDAY));
        assert_eq!(update.streak, 3);
        assert_eq!(update.longest_streak, 11);
    }

    #[test]
    fn test_undo_rolls_back_to_yesterday() {
        let mut h = habit();
        h.streak = 6;
        h.longest_streak = 6;
        h.completed_today = true;
        h.last_completed = Some(day(TODAY));

        let outcome = undo_completion(&h, day(TODAY), day(YESTERDAY));
        assert_eq!(outcome.streak, 5);
        assert_eq!(outcome.last_completed, Some(day(YESTERDAY)));
    }

    #[test]
    fn test_undo_first_ever_completion_clears_state() {
        let mut h = habit();
        h.streak = 1;
        h.completed_today = true;
        h.last_completed = Some(day(TODAY));

        let outcome = undo_completion(&h, day(TODAY), day(YESTERDAY));
        assert_eq!(outcome.streak, 0);
        assert_eq!(outcome.last_completed, None);
    }

    #[test]
    fn test_undo_is_a_noop_when_not_completed_today() {
        let mut h = habit();
        h.streak = 4;
        h.completed_today = false;
        h.last_completed = Some(day(YESTERDAY));

        let outcome = undo_completion(&h, day(TODAY), day(YESTERDAY));
        assert_eq!(outcome.streak, 4);
        assert_eq!(outcome.last_completed, Some(day(YESTERDAY)));
    }

    #[test]
    fn test_undo_is_a_noop_when_flag_is_stale() {
        // completed_today set but last_completed is not today
        let mut h = habit();
        h.streak = 4;
        h.completed_today = true;
        h.last_completed = Some(day(YESTERDAY));

        let outcome = undo_completion(&h, day(TODAY), day(YESTERDAY));
        assert_eq!(outcome.streak, 4);
        assert_eq!(outcome.last_completed, Some(day(YESTERDAY)));
    }

    #[test]
    fn test_complete_then_undo_round_trips() {
        let mut h = habit();
        h.streak = 3;
        h.longest_streak = 8;
        h.last_completed = Some(day(YESTERDAY));

        let update = check_streak(&h, day(TODAY), day(YESTERDAY));
        h.streak = update.streak;
        h.longest_streak = update.longest_streak;
        h.completed_today = true;
        h.last_completed = Some(day(TODAY));

        let outcome = undo_completion(&h, day(TODAY), day(YESTERDAY));
        assert_eq!(outcome.streak, 3);
        assert_eq!(outcome.last_completed, Some(day(YESTERDAY)));
        // high-water mark survives the undo
        assert_eq!(h.longest_streak, 8);
    }
}
