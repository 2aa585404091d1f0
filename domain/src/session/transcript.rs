//! Conversation transcript

use super::entities::Turn;
use serde::Serialize;

/// Ordered, append-only log of turns for one session (Entity)
///
/// There is no way to remove or edit a turn. Starting over means
/// constructing a new transcript.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end of the transcript.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// History handed to backend adapters to build their requests.
    ///
    /// Failure turns are left out so locally produced error text is never
    /// presented to the backend as something the assistant said.
    pub fn as_adapter_history(&self) -> Vec<Turn> {
        self.turns
            .iter()
            .filter(|turn| !turn.is_failure())
            .cloned()
            .collect()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Role;

    #[test]
    fn test_append_keeps_order() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("one"));
        transcript.append(Turn::assistant("two"));
        transcript.append(Turn::user("three"));

        let contents: Vec<_> = transcript.iter().map(|t| t.content()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert_eq!(transcript.last().map(|t| t.role()), Some(Role::User));
    }

    #[test]
    fn test_adapter_history_skips_failures() {
        let mut transcript = Transcript::new();
        assert!(transcript.as_adapter_history().is_empty());
        transcript.append(Turn::user("x"));
        transcript.append(Turn::failure("Billing required or quota exceeded."));
        transcript.append(Turn::user("y"));
        transcript.append(Turn::assistant("ok"));

        assert_eq!(transcript.len(), 4);
        assert_eq!(
            transcript.as_adapter_history(),
            vec![Turn::user("x"), Turn::user("y"), Turn::assistant("ok")]
        );
    }

    #[test]
    fn test_serializes_as_array() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("hi"));
        transcript.append(Turn::assistant("hello"));
        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ])
        );
    }
}
