//! Selection state machine for one in-flight match.
//!
//! Phases: `Idle` → `TextSelected` → `Evaluating` → `Idle`. The machine
//! owns which slots are chosen and the permanently-revealed set; it never
//! touches the board itself. Callers apply the returned effects (reveal,
//! hide) and hold the input lock during `Evaluating` and the display
//! windows that follow it.

use std::collections::HashSet;

use crate::types::PairCode;

/// Current selection phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectPhase {
    #[default]
    Idle,
    TextSelected(usize),
    Evaluating { text: usize, fruit: usize },
}

/// Effect of a text slot click, for the caller to apply to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextClick {
    /// Click ignored (machine was mid-evaluation).
    Ignored,
    /// Same slot clicked again: selection cleared.
    Deselected { index: usize, hide: bool },
    /// New slot selected; the previous one, if any and not permanently
    /// revealed, must be hidden.
    Selected {
        reveal: usize,
        hide_previous: Option<usize>,
    },
}

/// A text/fruit pair locked in for evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub text: usize,
    pub fruit: usize,
}

/// Verdict of comparing the two selected slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchVerdict {
    Matched,
    Mismatched,
}

/// Owns selection state and the revealed-card retention set.
#[derive(Clone, Debug, Default)]
pub struct MatchStateMachine {
    phase: SelectPhase,
    /// Text slot indices kept face up after a match, until refilled.
    permanently_revealed: HashSet<usize>,
}

impl MatchStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SelectPhase {
        self.phase
    }

    /// True while both slots are chosen and the outcome is unresolved.
    pub fn is_evaluating(&self) -> bool {
        matches!(self.phase, SelectPhase::Evaluating { .. })
    }

    pub fn selected_text(&self) -> Option<usize> {
        match self.phase {
            SelectPhase::TextSelected(index) => Some(index),
            SelectPhase::Evaluating { text, .. } => Some(text),
            SelectPhase::Idle => None,
        }
    }

    /// Handle a click on an active text slot.
    pub fn select_text(&mut self, index: usize) -> TextClick {
        match self.phase {
            SelectPhase::Evaluating { .. } => TextClick::Ignored,
            SelectPhase::TextSelected(current) if current == index => {
                self.phase = SelectPhase::Idle;
                TextClick::Deselected {
                    index,
                    hide: !self.permanently_revealed.contains(&index),
                }
            }
            SelectPhase::TextSelected(previous) => {
                self.phase = SelectPhase::TextSelected(index);
                let hide_previous =
                    (!self.permanently_revealed.contains(&previous)).then_some(previous);
                TextClick::Selected {
                    reveal: index,
                    hide_previous,
                }
            }
            SelectPhase::Idle => {
                self.phase = SelectPhase::TextSelected(index);
                TextClick::Selected {
                    reveal: index,
                    hide_previous: None,
                }
            }
        }
    }

    /// Handle a click on an active fruit slot. Only legal once a text is
    /// selected; moves the machine to `Evaluating`.
    pub fn select_fruit(&mut self, index: usize) -> Option<Evaluation> {
        match self.phase {
            SelectPhase::TextSelected(text) => {
                self.phase = SelectPhase::Evaluating { text, fruit: index };
                Some(Evaluation { text, fruit: index })
            }
            _ => None,
        }
    }

    /// Compare the locked-in slots and resolve the phase back to `Idle`.
    ///
    /// On a match the text slot joins the permanently-revealed set; it
    /// stays face up until [`Self::slot_refilled`] clears it.
    pub fn evaluate(
        &mut self,
        evaluation: Evaluation,
        text_code: &PairCode,
        fruit_code: &PairCode,
    ) -> MatchVerdict {
        self.phase = SelectPhase::Idle;
        if text_code == fruit_code {
            self.permanently_revealed.insert(evaluation.text);
            MatchVerdict::Matched
        } else {
            MatchVerdict::Mismatched
        }
    }

    /// Whether a mismatch resolution may re-hide this text slot.
    pub fn is_permanently_revealed(&self, index: usize) -> bool {
        self.permanently_revealed.contains(&index)
    }

    /// A refill overwrote this slot; drop its retention flag.
    pub fn slot_refilled(&mut self, index: usize) {
        self.permanently_revealed.remove(&index);
    }

    /// Rewrite held indices after a board shuffle. `mapping[old] = new`.
    pub fn remap(&mut self, mapping: &[usize]) {
        let remap_one = |index: usize| mapping.get(index).copied().unwrap_or(index);

        self.phase = match self.phase {
            SelectPhase::Idle => SelectPhase::Idle,
            SelectPhase::TextSelected(index) => SelectPhase::TextSelected(remap_one(index)),
            SelectPhase::Evaluating { text, fruit } => SelectPhase::Evaluating {
                text: remap_one(text),
                fruit: remap_one(fruit),
            },
        };
        self.permanently_revealed = self
            .permanently_revealed
            .iter()
            .map(|&index| remap_one(index))
            .collect();
    }

    /// Clear all selection state. Used on session reset.
    pub fn reset(&mut self) {
        self.phase = SelectPhase::Idle;
        self.permanently_revealed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> PairCode {
        PairCode::from(s)
    }

    #[test]
    fn selecting_same_text_twice_deselects() {
        let mut machine = MatchStateMachine::new();
        assert_eq!(
            machine.select_text(3),
            TextClick::Selected {
                reveal: 3,
                hide_previous: None
            }
        );
        assert_eq!(
            machine.select_text(3),
            TextClick::Deselected {
                index: 3,
                hide: true
            }
        );
        assert_eq!(machine.phase(), SelectPhase::Idle);
    }

    #[test]
    fn switching_text_hides_previous() {
        let mut machine = MatchStateMachine::new();
        machine.select_text(1);
        assert_eq!(
            machine.select_text(4),
            TextClick::Selected {
                reveal: 4,
                hide_previous: Some(1)
            }
        );
    }

    #[test]
    fn permanently_revealed_slot_is_not_rehidden_on_switch() {
        let mut machine = MatchStateMachine::new();
        machine.select_text(1);
        let eval = machine.select_fruit(2).unwrap();
        machine.evaluate(eval, &code("a"), &code("a"));
        assert!(machine.is_permanently_revealed(1));

        machine.select_text(1);
        assert_eq!(
            machine.select_text(5),
            TextClick::Selected {
                reveal: 5,
                hide_previous: None
            }
        );
    }

    #[test]
    fn fruit_click_without_text_is_ignored() {
        let mut machine = MatchStateMachine::new();
        assert!(machine.select_fruit(7).is_none());
        assert_eq!(machine.phase(), SelectPhase::Idle);
    }

    #[test]
    fn text_click_while_evaluating_is_ignored() {
        let mut machine = MatchStateMachine::new();
        machine.select_text(0);
        machine.select_fruit(1);
        assert!(machine.is_evaluating());
        assert_eq!(machine.select_text(2), TextClick::Ignored);
    }

    #[test]
    fn mismatch_returns_to_idle_without_retention() {
        let mut machine = MatchStateMachine::new();
        machine.select_text(0);
        let eval = machine.select_fruit(1).unwrap();
        let verdict = machine.evaluate(eval, &code("a"), &code("b"));
        assert_eq!(verdict, MatchVerdict::Mismatched);
        assert_eq!(machine.phase(), SelectPhase::Idle);
        assert!(!machine.is_permanently_revealed(0));
    }

    #[test]
    fn refill_clears_retention() {
        let mut machine = MatchStateMachine::new();
        machine.select_text(0);
        let eval = machine.select_fruit(1).unwrap();
        machine.evaluate(eval, &code("a"), &code("a"));
        machine.slot_refilled(0);
        assert!(!machine.is_permanently_revealed(0));
    }

    #[test]
    fn remap_follows_shuffled_indices() {
        let mut machine = MatchStateMachine::new();
        machine.select_text(0);
        let eval = machine.select_fruit(1).unwrap();
        machine.evaluate(eval, &code("a"), &code("a"));
        machine.select_text(2);

        // old -> new: 0->3, 1->0, 2->1, 3->2
        machine.remap(&[3, 0, 1, 2]);
        assert_eq!(machine.phase(), SelectPhase::TextSelected(1));
        assert!(machine.is_permanently_revealed(3));
        assert!(!machine.is_permanently_revealed(0));
    }
}
