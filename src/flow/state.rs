use crate::models::RewardResult;

/// The check flow as one finite-state value. Every UI screen derives from
/// this; there are no independent loading/error flags to fall out of sync.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    /// A check for this handle is in flight.
    Checking { handle: String },
    /// Follow check answered false.
    Denied { handle: String },
    /// Reward drawn and recorded; reveal is on screen.
    Revealed { result: RewardResult },
    LeaderboardShown,
    /// Unexpected failure; cleared on the next handle edit.
    Error { message: String },
}

/// Inputs that advance the flow. Completion events carry the handle they
/// belong to so answers for a stale check are dropped.
#[derive(Debug, Clone)]
pub enum FlowEvent {
    HandleEdited,
    Submitted { handle: String },
    Denied { handle: String },
    Failed { handle: String, message: String },
    Granted { result: RewardResult },
    RevealElapsed,
    Reset,
}

impl FlowState {
    /// Pure transition function. Events that do not apply in the current
    /// state leave it unchanged.
    pub fn apply(self, event: FlowEvent) -> FlowState {
        match (self, event) {
            (_, FlowEvent::Reset) => FlowState::Idle,

            // The trigger is disabled while a check is outstanding; a submit
            // in any other state starts a fresh check.
            (FlowState::Checking { handle }, FlowEvent::Submitted { .. }) => {
                FlowState::Checking { handle }
            }
            (_, FlowEvent::Submitted { handle }) => FlowState::Checking { handle },

            (FlowState::Checking { handle }, FlowEvent::Denied { handle: h }) if h == handle => {
                FlowState::Denied { handle }
            }
            (FlowState::Checking { handle }, FlowEvent::Failed { handle: h, message })
                if h == handle =>
            {
                FlowState::Error { message }
            }
            (FlowState::Checking { handle }, FlowEvent::Granted { result })
                if result.handle == handle =>
            {
                FlowState::Revealed { result }
            }

            (FlowState::Revealed { .. }, FlowEvent::RevealElapsed) => FlowState::LeaderboardShown,

            (FlowState::Error { .. }, FlowEvent::HandleEdited) => FlowState::Idle,
            (FlowState::Denied { .. }, FlowEvent::HandleEdited) => FlowState::Idle,

            // Everything else, including completions for a handle we are no
            // longer checking, is ignored.
            (state, _) => state,
        }
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, FlowState::Checking { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result_for(handle: &str) -> RewardResult {
        RewardResult::new(handle, 42, Utc::now())
    }

    fn checking(handle: &str) -> FlowState {
        FlowState::Idle.apply(FlowEvent::Submitted {
            handle: handle.to_string(),
        })
    }

    #[test]
    fn test_happy_path() {
        let state = checking("alice");
        assert_eq!(
            state,
            FlowState::Checking {
                handle: "alice".to_string()
            }
        );

        let state = state.apply(FlowEvent::Granted {
            result: result_for("alice"),
        });
        assert!(matches!(state, FlowState::Revealed { .. }));

        let state = state.apply(FlowEvent::RevealElapsed);
        assert_eq!(state, FlowState::LeaderboardShown);
    }

    #[test]
    fn test_denied_and_recover_on_edit() {
        let state = checking("bob").apply(FlowEvent::Denied {
            handle: "bob".to_string(),
        });
        assert_eq!(
            state,
            FlowState::Denied {
                handle: "bob".to_string()
            }
        );
        assert_eq!(state.apply(FlowEvent::HandleEdited), FlowState::Idle);
    }

    #[test]
    fn test_error_clears_on_edit() {
        let state = checking("bob").apply(FlowEvent::Failed {
            handle: "bob".to_string(),
            message: "boom".to_string(),
        });
        assert!(matches!(state, FlowState::Error { .. }));
        assert_eq!(state.apply(FlowEvent::HandleEdited), FlowState::Idle);
    }

    #[test]
    fn test_submit_ignored_while_checking() {
        let state = checking("alice").apply(FlowEvent::Submitted {
            handle: "mallory".to_string(),
        });
        assert_eq!(
            state,
            FlowState::Checking {
                handle: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        // The user reset while a check was in flight; the late answer for the
        // old handle must not resurrect the flow.
        let state = checking("alice").apply(FlowEvent::Reset);
        assert_eq!(state, FlowState::Idle);

        let state = state.apply(FlowEvent::Granted {
            result: result_for("alice"),
        });
        assert_eq!(state, FlowState::Idle);
    }

    #[test]
    fn test_completion_for_other_handle_is_dropped() {
        let state = checking("alice").apply(FlowEvent::Granted {
            result: result_for("mallory"),
        });
        assert_eq!(
            state,
            FlowState::Checking {
                handle: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_reveal_elapsed_only_fires_from_reveal() {
        assert_eq!(FlowState::Idle.apply(FlowEvent::RevealElapsed), FlowState::Idle);
        let state = checking("alice").apply(FlowEvent::RevealElapsed);
        assert!(state.is_checking());
    }
}
