//! Paired-turn history for session-style backends

use serde::{Deserialize, Serialize};

/// One `(user_text, reply)` pair (Value Object)
///
/// Serializes as a two-element array: `["hello", "Hi there"]`, or
/// `["hello", null]` while the reply is outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPair(String, Option<String>);

impl TurnPair {
    pub fn user_text(&self) -> &str {
        &self.0
    }

    pub fn reply(&self) -> Option<&str> {
        self.1.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.1.is_none()
    }
}

/// The backend's own pairing of the conversation (Entity)
///
/// Invariant: at most one pair has no reply, and if one exists it is the
/// last pair. It is opened right before a remote call and either completed
/// or abandoned once the call resolves.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PairedHistory {
    pairs: Vec<TurnPair>,
}

impl PairedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new pair for `user_text`.
    ///
    /// A leftover open pair is dropped first.
    pub fn begin(&mut self, user_text: impl Into<String>) {
        self.abandon();
        self.pairs.push(TurnPair(user_text.into(), None));
    }

    /// Fill in the reply of the open pair. Returns `false` if no pair was open.
    pub fn complete(&mut self, reply: impl Into<String>) -> bool {
        match self.pairs.last_mut() {
            Some(pair) if pair.is_open() => {
                pair.1 = Some(reply.into());
                true
            }
            _ => false,
        }
    }

    /// Remove the open pair, if any. Returns `true` if one was removed.
    pub fn abandon(&mut self) -> bool {
        if self.pending().is_some() {
            self.pairs.pop();
            true
        } else {
            false
        }
    }

    /// The open pair, if a call is outstanding.
    pub fn pending(&self) -> Option<&TurnPair> {
        self.pairs.last().filter(|pair| pair.is_open())
    }

    pub fn pairs(&self) -> &[TurnPair] {
        &self.pairs
    }

    pub fn open_count(&self) -> usize {
        self.pairs.iter().filter(|pair| pair.is_open()).count()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Wire form: `[[user, reply|null], ...]`
    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::to_value(&self.pairs).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_begin_then_complete() {
        let mut history = PairedHistory::new();
        history.begin("hello");
        assert_eq!(history.to_wire(), json!([["hello", null]]));

        assert!(history.complete("Hi there"));
        assert!(history.pending().is_none());
        assert_eq!(history.to_wire(), json!([["hello", "Hi there"]]));
    }

    #[test]
    fn test_abandon_removes_open_pair_only() {
        let mut history = PairedHistory::new();
        history.begin("one");
        history.complete("1");
        history.begin("two");

        assert!(history.abandon());
        assert_eq!(history.to_wire(), json!([["one", "1"]]));
        assert!(!history.abandon());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_begin_replaces_leftover_open_pair() {
        let mut history = PairedHistory::new();
        history.begin("lost");
        history.begin("retry");
        assert_eq!(history.open_count(), 1);
        assert_eq!(history.to_wire(), json!([["retry", null]]));
    }

    #[test]
    fn test_complete_without_open_pair() {
        let mut history = PairedHistory::new();
        assert!(!history.complete("orphan"));
        assert!(history.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Step {
        Begin(String),
        Complete(String),
        Abandon,
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(Step::Begin),
            "[a-z]{1,8}".prop_map(Step::Complete),
            Just(Step::Abandon),
        ]
    }

    proptest! {
        #[test]
        fn never_more_than_one_open_pair(steps in prop::collection::vec(arb_step(), 0..40)) {
            let mut history = PairedHistory::new();
            for step in steps {
                match step {
                    Step::Begin(text) => history.begin(text),
                    Step::Complete(reply) => { history.complete(reply); }
                    Step::Abandon => { history.abandon(); }
                }
                prop_assert!(history.open_count() <= 1);
                if history.open_count() == 1 {
                    prop_assert!(history.pairs().last().is_some_and(|p| p.is_open()));
                }
            }
        }
    }
}
