pub mod handlers;

/// Languages a user may select as their preference.
pub const LANGUAGES: &[&str] = &["English", "Hindi", "Spanish", "French", "German"];
