use chrono::NaiveDate;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

use crate::date;
use crate::models::{Habit, HabitDraft, HabitUpdate, DURATION_CHOICES};
use crate::tui::widgets::input::Input;
use crate::{Config, HabitStore, Profile};

/// Emoji palette offered by the habit form. A habit created elsewhere
/// (CLI flag, hand-edited database) keeps its emoji until the picker is
/// cycled.
pub const EMOJI_CHOICES: &[&str] = &[
    "✨", "💧", "🏃", "📖", "🧘", "✍️", "💪", "🌱", "☀️", "🌙", "✅", "📝", "⏰", "🎨", "🎵",
    "🙏", "❤️", "🧠",
];

const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Onboarding,
    List,
    Form,
    ConfirmDelete,
    Help,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Emoji,
    Duration,
    Reminder,
    ReminderTime,
}

#[derive(Debug, Clone)]
pub struct HabitForm {
    pub current_field: FormField,
    pub name: Input,
    pub emoji: String,
    pub emoji_index: usize,
    pub duration_index: usize,
    pub reminder_enabled: bool,
    pub reminder_time: Input,
    pub editing_habit_id: Option<String>, // None for new habits
}

impl HabitForm {
    pub fn empty() -> Self {
        Self {
            current_field: FormField::Name,
            name: Input::new(),
            emoji: EMOJI_CHOICES[0].to_string(),
            emoji_index: 0,
            duration_index: 0,
            reminder_enabled: false,
            reminder_time: Input::new(),
            editing_habit_id: None,
        }
    }

    pub fn for_habit(habit: &Habit) -> Self {
        let emoji_index = EMOJI_CHOICES
            .iter()
            .position(|e| *e == habit.emoji)
            .unwrap_or(0);
        let duration_index = DURATION_CHOICES
            .iter()
            .position(|d| *d == habit.duration)
            .unwrap_or(0);

        Self {
            current_field: FormField::Name,
            name: Input::from_string(habit.name.clone()),
            emoji: habit.emoji.clone(),
            emoji_index,
            duration_index,
            reminder_enabled: habit.reminder_enabled,
            reminder_time: Input::from_string(habit.reminder_time.clone().unwrap_or_default()),
            editing_habit_id: Some(habit.id.clone()),
        }
    }

    pub fn cycle_emoji(&mut self, forward: bool) {
        let len = EMOJI_CHOICES.len();
        self.emoji_index = if forward {
            (self.emoji_index + 1) % len
        } else {
            (self.emoji_index + len - 1) % len
        };
        self.emoji = EMOJI_CHOICES[self.emoji_index].to_string();
    }

    pub fn cycle_duration(&mut self, forward: bool) {
        let len = DURATION_CHOICES.len();
        self.duration_index = if forward {
            (self.duration_index + 1) % len
        } else {
            (self.duration_index + len - 1) % len
        };
    }

    pub fn duration(&self) -> u8 {
        DURATION_CHOICES[self.duration_index]
    }

    /// Whether this is the last field the user can reach, meaning Enter
    /// submits instead of advancing
    pub fn is_last_field(&self) -> bool {
        match self.current_field {
            FormField::ReminderTime => true,
            FormField::Reminder => !self.reminder_enabled,
            _ => false,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            FormField::Name => FormField::Emoji,
            FormField::Emoji => FormField::Duration,
            FormField::Duration => FormField::Reminder,
            FormField::Reminder if self.reminder_enabled => FormField::ReminderTime,
            FormField::Reminder => FormField::Name,
            FormField::ReminderTime => FormField::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.current_field = match self.current_field {
            FormField::Name if self.reminder_enabled => FormField::ReminderTime,
            FormField::Name => FormField::Reminder,
            FormField::Emoji => FormField::Name,
            FormField::Duration => FormField::Emoji,
            FormField::Reminder => FormField::Duration,
            FormField::ReminderTime => FormField::Reminder,
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub themes: Vec<String>,
    pub list_state: ListState,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub profile: Profile,
    pub store: HabitStore,

    pub mode: Mode,
    pub list_state: ListState,
    pub form: Option<HabitForm>,
    pub delete_confirmation: Option<String>, // habit id
    pub delete_modal_selection: usize,       // 0 = Delete, 1 = Cancel
    pub settings: SettingsState,
    pub status: StatusState,

    pub today: NaiveDate,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: HabitStore, profile: Profile) -> Self {
        let mode = if store.has_completed_onboarding() {
            Mode::List
        } else {
            Mode::Onboarding
        };

        let mut list_state = ListState::default();
        if !store.habits().is_empty() {
            list_state.select(Some(0));
        }

        Self {
            config,
            profile,
            store,
            mode,
            list_state,
            form: None,
            delete_confirmation: None,
            delete_modal_selection: 0,
            settings: SettingsState::default(),
            status: StatusState::default(),
            today: date::today(),
            should_quit: false,
        }
    }

    pub fn selected_habit(&self) -> Option<&Habit> {
        self.list_state
            .selected()
            .and_then(|i| self.store.habits().get(i))
    }

    pub fn select_next(&mut self) {
        let len = self.store.habits().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.store.habits().is_empty() {
            self.list_state.select(None);
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(prev));
    }

    /// Keep the selection inside the list after add/delete
    pub fn clamp_selection(&mut self) {
        let len = self.store.habits().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let i = self.list_state.selected().unwrap_or(0).min(len - 1);
            self.list_state.select(Some(i));
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status.message = Some(message.into());
        self.status.message_time = Some(Instant::now());
    }

    /// Clear the status message once it has been shown long enough
    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed() >= STATUS_MESSAGE_TIMEOUT {
                self.status.message = None;
                self.status.message_time = None;
            }
        }
    }

    /// Run the daily-reset sweep when the local date changes under a
    /// running session (terminal left open overnight)
    pub fn check_day_rollover(&mut self) {
        let today = date::today();
        if today != self.today {
            self.today = today;
            self.store.reset_daily_completion();
            self.set_status("New day! Completions reset");
        }
    }

    pub fn completed_count(&self) -> usize {
        self.store
            .habits()
            .iter()
            .filter(|h| h.completed_today)
            .count()
    }

    /// Space on the list: complete a pending habit, undo a done one
    pub fn toggle_selected_completion(&mut self) {
        let Some((id, done)) = self
            .selected_habit()
            .map(|h| (h.id.clone(), h.completed_today))
        else {
            return;
        };

        if done {
            self.store.undo_completion(&id);
            self.set_status("Completion undone");
        } else {
            self.store.complete_habit(&id);
            if let Some(habit) = self.store.find(&id) {
                self.set_status(format!("{} done! Streak {} 🔥", habit.name, habit.streak));
            }
        }
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(HabitForm::empty());
        self.mode = Mode::Form;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(habit) = self.selected_habit().cloned() {
            self.form = Some(HabitForm::for_habit(&habit));
            self.mode = Mode::Form;
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = Mode::List;
    }

    /// Validate and submit the form. On a validation problem the form
    /// stays open and the problem goes to the status bar.
    pub fn save_form(&mut self) {
        let (name, reminder_enabled, raw_time) = match self.form.as_ref() {
            Some(form) => (
                form.name.value().trim().to_string(),
                form.reminder_enabled,
                form.reminder_time.value().trim().to_string(),
            ),
            None => return,
        };

        if name.is_empty() {
            self.set_status("Name cannot be empty");
            return;
        }
        if name.chars().count() > 40 {
            self.set_status("Name is limited to 40 characters");
            return;
        }

        let reminder_time = if reminder_enabled {
            if chrono::NaiveTime::parse_from_str(&raw_time, "%H:%M").is_err() {
                self.set_status("Reminder time must be HH:MM");
                return;
            }
            Some(raw_time)
        } else {
            None
        };

        let Some(form) = self.form.take() else {
            return;
        };
        let duration = form.duration();
        match form.editing_habit_id {
            Some(id) => {
                self.store.update_habit(
                    &id,
                    HabitUpdate {
                        name: Some(name.clone()),
                        emoji: Some(form.emoji),
                        duration: Some(duration),
                        reminder_enabled: Some(form.reminder_enabled),
                        reminder_time: Some(reminder_time),
                        ..Default::default()
                    },
                );
                self.set_status(format!("Updated {}", name));
            }
            None => {
                self.store.add_habit(HabitDraft {
                    name: name.clone(),
                    emoji: form.emoji,
                    duration,
                    reminder_enabled: form.reminder_enabled,
                    reminder_time,
                });
                self.list_state.select(Some(self.store.habits().len() - 1));
                self.set_status(format!("Added {}", name));
            }
        }
        self.mode = Mode::List;
    }

    pub fn request_delete(&mut self) {
        let Some(id) = self.selected_habit().map(|h| h.id.clone()) else {
            return;
        };
        self.delete_confirmation = Some(id);
        self.delete_modal_selection = 0;
        self.mode = Mode::ConfirmDelete;
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirmation = None;
        self.mode = Mode::List;
    }

    pub fn apply_delete_choice(&mut self) {
        let Some(id) = self.delete_confirmation.take() else {
            self.mode = Mode::List;
            return;
        };

        if self.delete_modal_selection == 0 {
            let name = self.store.find(&id).map(|h| h.name.clone());
            self.store.delete_habit(&id);
            self.clamp_selection();
            if let Some(name) = name {
                self.set_status(format!("Deleted {}", name));
            }
        }
        self.mode = Mode::List;
    }

    pub fn complete_onboarding(&mut self) {
        self.store.set_has_completed_onboarding(true);
        self.mode = Mode::List;
    }

    pub fn open_settings(&mut self) {
        let themes = self.config.get_available_themes();
        let current = themes
            .iter()
            .position(|t| *t == self.config.current_theme)
            .unwrap_or(0);
        let mut list_state = ListState::default();
        list_state.select(Some(current));
        self.settings = SettingsState { themes, list_state };
        self.mode = Mode::Settings;
    }

    pub fn settings_select_next(&mut self) {
        let len = self.settings.themes.len();
        if len == 0 {
            return;
        }
        let next = match self.settings.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.settings.list_state.select(Some(next));
    }

    pub fn settings_select_previous(&mut self) {
        let prev = match self.settings.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.settings.list_state.select(Some(prev));
    }

    /// Apply the highlighted theme and persist the choice
    pub fn apply_selected_theme(&mut self) {
        let Some(name) = self
            .settings
            .list_state
            .selected()
            .and_then(|i| self.settings.themes.get(i))
            .cloned()
        else {
            return;
        };

        match self.config.set_theme(&name) {
            Ok(()) => {
                if let Err(e) = self.config.save_with_profile(self.profile) {
                    self.set_status(format!("Theme applied but not saved: {}", e));
                } else {
                    self.set_status(format!("Theme: {}", name));
                }
            }
            Err(e) => self.set_status(e.to_string()),
        }
        self.mode = Mode::List;
    }
}
