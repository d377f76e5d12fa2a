//! View handle resolution
//!
//! The demo shell is a fixed set of named elements. Handles are resolved
//! once at startup through a `HandleResolver` collaborator; a missing
//! required name is a hard startup failure and the core never runs on a
//! partial set.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DemoError, Result};

/// Logical names of the demo shell elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandleName {
    Shell,
    FeedTrack,
    TargetPost,
    TargetComment,
    ReplyButton,
    Popup,
    StepLabel,
    Cursor,
    GenerateButton,
    GenerateSpinner,
    GenerateLabel,
    IntentGroup,
    IntentAgree,
    IntentCompliment,
    ToneGroup,
    ToneFriendly,
    ToneProfessional,
    SuggestionLoading,
    SuggestionText,
    SuggestionCard,
    SuggestionsSection,
    InsertedReply,
}

impl HandleName {
    /// Every name the core requires. Resolution fails closed if any of
    /// these is missing.
    pub const ALL: [HandleName; 22] = [
        HandleName::Shell,
        HandleName::FeedTrack,
        HandleName::TargetPost,
        HandleName::TargetComment,
        HandleName::ReplyButton,
        HandleName::Popup,
        HandleName::StepLabel,
        HandleName::Cursor,
        HandleName::GenerateButton,
        HandleName::GenerateSpinner,
        HandleName::GenerateLabel,
        HandleName::IntentGroup,
        HandleName::IntentAgree,
        HandleName::IntentCompliment,
        HandleName::ToneGroup,
        HandleName::ToneFriendly,
        HandleName::ToneProfessional,
        HandleName::SuggestionLoading,
        HandleName::SuggestionText,
        HandleName::SuggestionCard,
        HandleName::SuggestionsSection,
        HandleName::InsertedReply,
    ];

    /// Stable camelCase name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            HandleName::Shell => "shell",
            HandleName::FeedTrack => "feedTrack",
            HandleName::TargetPost => "targetPost",
            HandleName::TargetComment => "targetComment",
            HandleName::ReplyButton => "replyButton",
            HandleName::Popup => "popup",
            HandleName::StepLabel => "stepLabel",
            HandleName::Cursor => "cursor",
            HandleName::GenerateButton => "generateButton",
            HandleName::GenerateSpinner => "generateSpinner",
            HandleName::GenerateLabel => "generateLabel",
            HandleName::IntentGroup => "intentGroup",
            HandleName::IntentAgree => "intentAgree",
            HandleName::IntentCompliment => "intentCompliment",
            HandleName::ToneGroup => "toneGroup",
            HandleName::ToneFriendly => "toneFriendly",
            HandleName::ToneProfessional => "toneProfessional",
            HandleName::SuggestionLoading => "suggestionLoading",
            HandleName::SuggestionText => "suggestionText",
            HandleName::SuggestionCard => "suggestionCard",
            HandleName::SuggestionsSection => "suggestionsSection",
            HandleName::InsertedReply => "insertedReply",
        }
    }

    /// Options belonging to a radio group, in display order.
    /// Empty for names that are not groups.
    pub fn radio_options(self) -> &'static [HandleName] {
        match self {
            HandleName::IntentGroup => {
                &[HandleName::IntentAgree, HandleName::IntentCompliment]
            }
            HandleName::ToneGroup => {
                &[HandleName::ToneFriendly, HandleName::ToneProfessional]
            }
            _ => &[],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for HandleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to a concrete view element, assigned by the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(u64);

impl ViewHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Resolves logical names to concrete view elements.
///
/// Implemented by the presentation layer; queried exactly once at startup.
pub trait HandleResolver {
    fn resolve(&self, name: HandleName) -> Option<ViewHandle>;
}

/// The fully-resolved, immutable handle set.
///
/// Construction guarantees every required name resolved, so lookups are
/// infallible afterwards.
#[derive(Debug, Clone)]
pub struct ViewHandles {
    handles: [ViewHandle; HandleName::ALL.len()],
}

impl ViewHandles {
    /// Resolve every required name, failing closed on the full list of
    /// missing names.
    pub fn resolve(resolver: &dyn HandleResolver) -> Result<Self> {
        let mut handles = [ViewHandle::new(0); HandleName::ALL.len()];
        let mut missing: Vec<&'static str> = Vec::new();

        for name in HandleName::ALL {
            match resolver.resolve(name) {
                Some(handle) => handles[name.index()] = handle,
                None => missing.push(name.as_str()),
            }
        }

        if !missing.is_empty() {
            return Err(DemoError::MissingHandle(missing.join(", ")));
        }

        Ok(Self { handles })
    }

    /// Look up the handle for a name.
    pub fn get(&self, name: HandleName) -> ViewHandle {
        self.handles[name.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapResolver {
        map: HashMap<HandleName, ViewHandle>,
    }

    impl MapResolver {
        fn complete() -> Self {
            let map = HandleName::ALL
                .iter()
                .enumerate()
                .map(|(i, name)| (*name, ViewHandle::new(i as u64 + 1)))
                .collect();
            Self { map }
        }
    }

    impl HandleResolver for MapResolver {
        fn resolve(&self, name: HandleName) -> Option<ViewHandle> {
            self.map.get(&name).copied()
        }
    }

    #[test]
    fn test_all_names_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for name in HandleName::ALL {
            assert!(seen.insert(name.as_str()), "duplicate name: {}", name);
        }
        assert_eq!(seen.len(), 22);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(HandleName::ReplyButton.to_string(), "replyButton");
        assert_eq!(HandleName::FeedTrack.to_string(), "feedTrack");
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&HandleName::SuggestionCard).unwrap();
        assert_eq!(json, "\"suggestionCard\"");
        let back: HandleName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HandleName::SuggestionCard);
    }

    #[test]
    fn test_radio_options() {
        assert_eq!(
            HandleName::IntentGroup.radio_options(),
            &[HandleName::IntentAgree, HandleName::IntentCompliment]
        );
        assert_eq!(
            HandleName::ToneGroup.radio_options(),
            &[HandleName::ToneFriendly, HandleName::ToneProfessional]
        );
        assert!(HandleName::Cursor.radio_options().is_empty());
    }

    #[test]
    fn test_resolve_complete_set() {
        let resolver = MapResolver::complete();
        let handles = ViewHandles::resolve(&resolver).unwrap();
        assert_eq!(handles.get(HandleName::Shell), ViewHandle::new(1));
        assert_ne!(
            handles.get(HandleName::Popup),
            handles.get(HandleName::Cursor)
        );
    }

    #[test]
    fn test_resolve_fails_closed_on_missing() {
        let mut resolver = MapResolver::complete();
        resolver.map.remove(&HandleName::ReplyButton);
        resolver.map.remove(&HandleName::Popup);

        let err = ViewHandles::resolve(&resolver).unwrap_err();
        match err {
            DemoError::MissingHandle(names) => {
                assert!(names.contains("replyButton"));
                assert!(names.contains("popup"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_view_handle_raw_round_trip() {
        let handle = ViewHandle::new(42);
        assert_eq!(handle.raw(), 42);
    }
}
