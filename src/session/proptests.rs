//! Property-based tests for the session state machine

use super::transition::{transition, TransitionError, APOLOGY};
use super::*;
use crate::transport::{ChatReply, TransportError};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,10}"
}

fn arb_message() -> impl Strategy<Value = String> {
    ("[ \t\n]{0,3}", "[a-zA-Z0-9?!.,']{1,5}[a-zA-Z0-9 ?!.,']{0,60}", "[ \t\n]{0,3}")
        .prop_map(|(lead, body, trail)| format!("{lead}{body}{trail}"))
}

fn arb_thread_id() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9_-]{1,24}")
}

fn arb_error() -> impl Strategy<Value = TransportError> {
    prop_oneof![
        Just(TransportError::network("refused")),
        Just(TransportError::timeout("elapsed")),
        Just(TransportError::malformed("no thread")),
        (400u16..600, proptest::option::of("[a-zA-Z ]{1,30}"))
            .prop_map(|(status, text)| TransportError::server(status, text)),
    ]
}

fn arb_state(phase: Phase) -> impl Strategy<Value = SessionState> {
    (arb_thread_id(), proptest::option::of("[a-z ]{1,20}")).prop_map(move |(thread_id, last_error)| {
        SessionState {
            thread_id,
            last_error,
            phase,
            ..Default::default()
        }
    })
}

fn appended_turns(effects: &[Effect]) -> Vec<Turn> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::AppendTurn(turn) => Some(turn.clone()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn submit_appends_exactly_one_user_turn(state in arb_state(Phase::Idle), text in arb_message()) {
        let result = transition(&state, SessionEvent::submit(text.clone())).unwrap();
        let trimmed = text.trim();

        prop_assert_eq!(result.new_phase, Phase::Awaiting);
        prop_assert_eq!(appended_turns(&result.effects), vec![Turn::user(trimmed)]);

        let sends: Vec<_> = result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::SendMessage(request) => Some(request),
                _ => None,
            })
            .collect();
        prop_assert_eq!(sends.len(), 1);
        prop_assert_eq!(sends[0].message.as_str(), trimmed);
        prop_assert_eq!(&sends[0].thread_id, &state.thread_id);

        // The user turn precedes the transport call
        let append_at = result.effects.iter().position(|e| matches!(e, Effect::AppendTurn(_)));
        let send_at = result.effects.iter().position(|e| matches!(e, Effect::SendMessage(_)));
        prop_assert!(append_at < send_at);
    }

    #[test]
    fn blank_submit_is_a_no_op(state in prop_oneof![arb_state(Phase::Idle), arb_state(Phase::Awaiting)], text in arb_blank()) {
        let err = transition(&state, SessionEvent::submit(text)).unwrap_err();
        prop_assert_eq!(err, TransitionError::EmptyMessage);
    }

    #[test]
    fn awaiting_rejects_every_submit(state in arb_state(Phase::Awaiting), text in arb_message()) {
        let err = transition(&state, SessionEvent::submit(text)).unwrap_err();
        prop_assert_eq!(err, TransitionError::Busy);
    }

    #[test]
    fn failure_always_ends_idle_with_one_apology(state in arb_state(Phase::Awaiting), error in arb_error()) {
        let expected_error = error.user_message();
        let result = transition(&state, SessionEvent::ExchangeFailed { error }).unwrap();

        prop_assert_eq!(result.new_phase, Phase::Idle);
        prop_assert_eq!(appended_turns(&result.effects), vec![Turn::assistant(APOLOGY)]);
        prop_assert!(result.effects.contains(&Effect::RecordError(expected_error)));
        prop_assert!(!result.effects.iter().any(|e| matches!(e, Effect::SetThread(_) | Effect::SendMessage(_))));
    }

    #[test]
    fn reply_always_ends_idle_with_new_thread(
        state in arb_state(Phase::Awaiting),
        message in "[a-zA-Z ]{0,10}[a-zA-Z]",
        thread in "[a-z0-9]{1,12}",
    ) {
        let reply = ChatReply::new(message.clone(), thread.clone());
        let result = transition(&state, SessionEvent::ReplyReceived { reply }).unwrap();

        prop_assert_eq!(result.new_phase, Phase::Idle);
        prop_assert_eq!(appended_turns(&result.effects), vec![Turn::assistant(message)]);
        prop_assert!(result.effects.contains(&Effect::SetThread(thread)));
    }
}
