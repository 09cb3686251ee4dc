use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::models::{HabitDraft, DURATION_CHOICES};
use crate::store::HabitStore;

#[derive(Parser)]
#[command(name = "minihabit")]
#[command(about = "Tiny daily habits with streaks, in your terminal")]
#[command(version)]
pub struct Cli {
    /// Use development mode (separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive TUI (default if no subcommand)
    Tui,
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Emoji shown next to the habit
        #[arg(long, default_value = "✨")]
        emoji: String,
        /// Duration in minutes (1-5)
        #[arg(long, default_value_t = 1)]
        duration: u8,
        /// Daily reminder time (HH:MM), enables the reminder
        #[arg(long)]
        remind: Option<String>,
    },
    /// List habits with today's status and streaks
    List,
    /// Mark a habit done for today
    Done {
        /// Habit name (case-insensitive)
        name: String,
    },
    /// Undo today's completion of a habit
    Undo {
        /// Habit name (case-insensitive)
        name: String,
    },
    /// Delete a habit
    Remove {
        /// Habit name (case-insensitive)
        name: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Duration must be between 1 and 5 minutes, got {0}")]
    InvalidDuration(u8),
    #[error("Invalid reminder time '{0}', expected HH:MM")]
    InvalidReminderTime(String),
    #[error("No habit named '{0}'")]
    HabitNotFound(String),
}

fn validate_duration(duration: u8) -> Result<u8, CliError> {
    if DURATION_CHOICES.contains(&duration) {
        Ok(duration)
    } else {
        Err(CliError::InvalidDuration(duration))
    }
}

fn validate_reminder_time(time: &str) -> Result<String, CliError> {
    chrono::NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| CliError::InvalidReminderTime(time.to_string()))?;
    Ok(time.to_string())
}

/// Handle the add command
pub fn handle_add(
    name: String,
    emoji: String,
    duration: u8,
    remind: Option<String>,
    store: &mut HabitStore,
) -> Result<(), CliError> {
    let duration = validate_duration(duration)?;
    let reminder_time = remind.as_deref().map(validate_reminder_time).transpose()?;

    let habit = store.add_habit(HabitDraft {
        name,
        emoji,
        duration,
        reminder_enabled: reminder_time.is_some(),
        reminder_time,
    });
    println!("Habit created: {} {}", habit.emoji, habit.name);

    Ok(())
}

/// Handle the list command
pub fn handle_list(store: &HabitStore) {
    if store.habits().is_empty() {
        println!("No habits yet. Add one with: minihabit add <name>");
        return;
    }

    for habit in store.habits() {
        let mark = if habit.completed_today { "✓" } else { "○" };
        let best = if habit.longest_streak > habit.streak {
            format!(" (best {})", habit.longest_streak)
        } else {
            String::new()
        };
        println!(
            "{} {} {} ({}m) - streak {}{}",
            mark, habit.emoji, habit.name, habit.duration, habit.streak, best
        );
    }
}

/// Handle the done command
pub fn handle_done(name: String, store: &mut HabitStore) -> Result<(), CliError> {
    let habit = store
        .find_by_name(&name)
        .ok_or_else(|| CliError::HabitNotFound(name.clone()))?;

    if habit.completed_today {
        println!("{} is already done for today", habit.name);
        return Ok(());
    }

    let id = habit.id.clone();
    store.complete_habit(&id);

    if let Some(habit) = store.find(&id) {
        println!("{} {} done! Streak {}", habit.emoji, habit.name, habit.streak);
    }
    Ok(())
}

/// Handle the undo command
pub fn handle_undo(name: String, store: &mut HabitStore) -> Result<(), CliError> {
    let habit = store
        .find_by_name(&name)
        .ok_or_else(|| CliError::HabitNotFound(name.clone()))?;

    if !habit.completed_today {
        println!("{} has no completion today to undo", habit.name);
        return Ok(());
    }

    let id = habit.id.clone();
    store.undo_completion(&id);

    if let Some(habit) = store.find(&id) {
        println!("Undid {}, streak back to {}", habit.name, habit.streak);
    }
    Ok(())
}

/// Handle the remove command
pub fn handle_remove(name: String, store: &mut HabitStore) -> Result<(), CliError> {
    let habit = store
        .find_by_name(&name)
        .ok_or_else(|| CliError::HabitNotFound(name.clone()))?;

    let id = habit.id.clone();
    let display_name = habit.name.clone();
    store.delete_habit(&id);
    println!("Removed {}", display_name);
    Ok(())
}
