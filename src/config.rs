//! Configuration for autodemo
//!
//! The near-duplicate variants of the original demo differ only in scripted
//! parameters (wait durations, which intent/tone gets selected, the copy
//! shown). All of that is configuration of one script, not separate scripts.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::HandleName;
use crate::error::Result;

/// Top-level demo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub timing: TimingConfig,
    pub copy: CopyConfig,
    pub selection: SelectionConfig,
}

impl DemoConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

/// Named waits and reveal pacing, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub reset_settle_ms: u64,
    pub wait_after_scroll_ms: u64,
    pub wait_after_popup_open_ms: u64,
    pub wait_after_intent_select_ms: u64,
    pub wait_after_tone_select_ms: u64,
    pub generation_loading_ms: u64,
    pub wait_after_reply_ms: u64,
    pub wait_after_move_to_insert_ms: u64,
    pub wait_after_post_ms: u64,
    pub type_reply_min_ms: u64,
    pub type_reply_max_ms: u64,
    pub type_reply_ms_per_char: u64,
    pub reveal_poll_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reset_settle_ms: 60,
            wait_after_scroll_ms: 300,
            wait_after_popup_open_ms: 300,
            wait_after_intent_select_ms: 600,
            wait_after_tone_select_ms: 600,
            generation_loading_ms: 1000,
            wait_after_reply_ms: 1500,
            wait_after_move_to_insert_ms: 600,
            wait_after_post_ms: 2000,
            type_reply_min_ms: 650,
            type_reply_max_ms: 2200,
            type_reply_ms_per_char: 14,
            reveal_poll_ms: 30,
        }
    }
}

impl TimingConfig {
    /// Reveal duration for a text of `char_count` characters: scaled by
    /// per-character speed, clamped to the configured min/max.
    pub fn type_duration_ms(&self, char_count: usize) -> u64 {
        (char_count as u64 * self.type_reply_ms_per_char)
            .clamp(self.type_reply_min_ms, self.type_reply_max_ms)
    }
}

/// The literal strings the demo shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// The generated reply that gets typed out and posted.
    pub suggestion: String,
    /// Step-label headlines, in walkthrough order.
    pub steps: Vec<String>,
    pub generate_idle_label: String,
    pub generate_busy_label: String,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            suggestion: "Great question. I start with safety + calm: teach a \
                \u{201c}look at me\u{201d}, a hand target (\u{201c}touch\u{201d}), and a quick \
                U-turn for escaping tough moments. Then I build tiny wins with \
                distance and high-value treats. What\u{2019}s the hardest situation \
                right now\u{2014}barking, pulling, or jumping?"
                .to_string(),
            steps: vec![
                "1. Scroll your feed (LinkedIn, YouTube, Instagram).".to_string(),
                "2. Click Reply on a comment.".to_string(),
                "3. Get an AI-generated reply".to_string(),
                "4. Click Insert to post it instantly".to_string(),
            ],
            generate_idle_label: "Craft Reply".to_string(),
            generate_busy_label: "Crafting reply...".to_string(),
        }
    }
}

impl CopyConfig {
    /// Step-label headline by index; empty when the index is out of range.
    pub fn step_label(&self, index: usize) -> &str {
        self.steps.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Which radio options are selected, at rest and by the script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Selected intent on a fresh load.
    pub default_intent: HandleName,
    /// Selected tone on a fresh load.
    pub default_tone: HandleName,
    /// Intent the scripted cursor picks.
    pub intent: HandleName,
    /// Tone the scripted cursor picks.
    pub tone: HandleName,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_intent: HandleName::IntentAgree,
            default_tone: HandleName::ToneProfessional,
            intent: HandleName::IntentCompliment,
            tone: HandleName::ToneFriendly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = TimingConfig::default();
        assert_eq!(timing.reset_settle_ms, 60);
        assert_eq!(timing.wait_after_post_ms, 2000);
        assert_eq!(timing.reveal_poll_ms, 30);
    }

    #[test]
    fn test_type_duration_scales_with_length() {
        let timing = TimingConfig::default();
        assert_eq!(timing.type_duration_ms(100), 1400);
    }

    #[test]
    fn test_type_duration_clamped_low() {
        let timing = TimingConfig::default();
        // 10 chars * 14 ms = 140, below the floor.
        assert_eq!(timing.type_duration_ms(10), 650);
    }

    #[test]
    fn test_type_duration_clamped_high() {
        let timing = TimingConfig::default();
        // 1000 chars * 14 ms = 14000, above the ceiling.
        assert_eq!(timing.type_duration_ms(1000), 2200);
    }

    #[test]
    fn test_default_copy_has_four_steps() {
        let copy = CopyConfig::default();
        assert_eq!(copy.steps.len(), 4);
        assert!(copy.step_label(0).starts_with("1."));
        assert_eq!(copy.step_label(9), "");
    }

    #[test]
    fn test_default_selection() {
        let selection = SelectionConfig::default();
        assert_eq!(selection.default_intent, HandleName::IntentAgree);
        assert_eq!(selection.default_tone, HandleName::ToneProfessional);
        assert_eq!(selection.intent, HandleName::IntentCompliment);
        assert_eq!(selection.tone, HandleName::ToneFriendly);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "timing:\n  wait_after_post_ms: 500\n";
        let config: DemoConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.timing.wait_after_post_ms, 500);
        // Untouched fields keep their defaults.
        assert_eq!(config.timing.reset_settle_ms, 60);
        assert_eq!(config.selection.tone, HandleName::ToneFriendly);
    }

    #[test]
    fn test_selection_yaml_uses_handle_names() {
        let yaml = "selection:\n  intent: intentAgree\n  tone: toneProfessional\n";
        let config: DemoConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.selection.intent, HandleName::IntentAgree);
        assert_eq!(config.selection.tone, HandleName::ToneProfessional);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.yml");
        std::fs::write(&path, "copy:\n  generate_idle_label: Reply now\n").unwrap();

        let config = DemoConfig::load(&path).unwrap();
        assert_eq!(config.copy.generate_idle_label, "Reply now");
        assert_eq!(config.copy.generate_busy_label, "Crafting reply...");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = DemoConfig::load(Path::new("/nonexistent/demo.yml")).unwrap_err();
        assert!(matches!(err, crate::error::DemoError::Io(_)));
    }
}
