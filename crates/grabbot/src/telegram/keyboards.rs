//! Inline keyboards.
//!
//! Callback payloads are plain action names; nothing about the pending
//! download travels inside them.

use std::str::FromStr;

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use grabcore::Quality;

pub const QUALITY_PREFIX: &str = "quality_";
pub const PREMIUM_YES: &str = "premium_yes";
pub const PREMIUM_NO: &str = "premium_no";

/// Parsed callback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    SetQuality(Quality),
    PremiumYes,
    PremiumNo,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            PREMIUM_YES => Some(Self::PremiumYes),
            PREMIUM_NO => Some(Self::PremiumNo),
            _ => data
                .strip_prefix(QUALITY_PREFIX)
                .and_then(|q| Quality::from_str(q).ok())
                .map(Self::SetQuality),
        }
    }
}

fn quality_label(quality: Quality) -> &'static str {
    match quality {
        Quality::Best => "🌟 Best Quality",
        Quality::P1080 => "📺 1080p",
        Quality::P720 => "📹 720p",
        Quality::P480 => "📱 480p",
    }
}

fn quality_button(quality: Quality) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(quality_label(quality), format!("{}{}", QUALITY_PREFIX, quality))
}

/// Two-by-two quality picker.
pub fn quality_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![quality_button(Quality::Best), quality_button(Quality::P1080)],
        vec![quality_button(Quality::P720), quality_button(Quality::P480)],
    ])
}

/// "I have Premium" / "No Premium" choice.
pub fn premium_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ I have Premium", PREMIUM_YES),
        InlineKeyboardButton::callback("❌ No Premium", PREMIUM_NO),
    ]])
}
