pub mod health;
pub mod reminders;
