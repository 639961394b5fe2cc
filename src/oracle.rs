//! The scripted oracle: resolves questions put to the guide.
//!
//! Answers come from a keyword-matched script.  Matching is plain
//! lowercase word and phrase checks; no pattern engine.  One special
//! answer carries the friendship sentinel, which ends the question flow
//! and starts the epilogue.  When nothing matches, a gentle fallback line
//! keeps the exchange from dead-ending.

use crate::bridge::spawn_epilogue_bridges;
use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::events::{AnswerDelivered, ProgressionChanged, QuestionSubmitted};
use crate::player::Player;
use crate::progression::{try_advance, ProgressionState};
use bevy::prelude::*;

const FALLBACK_ANSWER: &str = "The stars shimmer quietly. Sometimes the deepest answers need a \
                               moment to travel across space. Try once more.";

/// The answer script, applied in order; first hit wins.
pub fn scripted_answer(question: &str) -> Option<(&'static str, bool)> {
    let q = question.to_lowercase();
    let has = |phrase: &str| q.contains(phrase);
    let word = |w: &str| has_word(&q, w);

    if has("meaning of life") {
        return Some((
            "Forty-two stars would be a fine answer, but the real one is simpler: the meaning of \
             life is the moment you stop searching for it and start living it. You already knew \
             that. You flew all the way here, didn't you?",
            false,
        ));
    }
    if has("who are you") {
        return Some((
            "I am the version of you that never forgot how to glow. I've been waiting here, not \
             because I was lost, but because some things can only be found when you're ready to \
             see them.",
            false,
        ));
    }
    if word("why") && (word("sky") || word("space")) && word("dark") {
        return Some((
            "The sky is dark so you can see the light. If everything glowed, nothing would. The \
             darkness isn't emptiness, it's the canvas. And you, little astronaut, are one of the \
             brightest things on it.",
            false,
        ));
    }
    if has("are you real") {
        return Some((
            "As real as the courage it took you to build a spacesuit from scrap metal and fly \
             into the unknown. Some things don't need proof, they just need someone brave enough \
             to believe.",
            false,
        ));
    }
    if (has("how old") && word("you")) || has("your age") {
        return Some((
            "I'm exactly as old as the first star that ever shone, and exactly as young as the \
             light reaching your eyes right now. Age is just distance measured in moments.",
            false,
        ));
    }
    if has("can i stay") || has("can we stay") || has("stay here") || has("stay with you") {
        return Some((
            "You carry this place with you, every star you collected, every color you completed. \
             Close your eyes anywhere, and you're here. You never really leave the places that \
             make you glow.",
            false,
        ));
    }
    if has("after death") || has("when we die") || (has("what happens") && word("die")) {
        return Some((
            "Stars don't die, they transform. Their light travels forever, reaching eyes that \
             haven't opened yet. You are made of stars that transformed long ago, and one day \
             your light will reach someone too.",
            false,
        ));
    }
    if word("love") {
        return Some((
            "Love is the gravity that holds the universe together without anyone seeing it. It's \
             why you built that suit. It's why you came looking. It's the only force that gets \
             stronger with distance.",
            false,
        ));
    }
    if word("afraid") || word("scared") || word("fear") {
        return Some((
            "Fear is just excitement that forgot to breathe. You flew through asteroid fields \
             and past black holes to get here. The bravest people aren't fearless, they're \
             afraid and they fly anyway.",
            false,
        ));
    }
    if has("favorite color") {
        return Some((
            "All of them, together. That's the whole point of the spectrum, no single color is \
             the answer. The magic is in the complete rainbow. You just proved that.",
            false,
        ));
    }
    if word("friend") || word("friends") || word("friendship") {
        return Some((
            "A friend! Of course. That's what the whole sky was waiting for. Hold on tight, \
             we're taking the rainbow down together.",
            true,
        ));
    }
    None
}

/// Alphanumeric-boundary whole-word test.
fn has_word(text: &str, word: &str) -> bool {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(offset) = text[start..].find(word) {
        let begin = start + offset;
        let end = begin + word.len();
        let left_ok = begin == 0 || !bytes[begin - 1].is_ascii_alphanumeric();
        let right_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if left_ok && right_ok {
            return true;
        }
        start = begin + 1;
    }
    false
}

/// Answer submitted questions and drive the question/epilogue transitions.
///
/// Accepts the first question only while the guide has been reached; a
/// friendship answer advances straight to `Epilogue` and raises the
/// bridges at the player's position.
pub fn oracle_answer_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    mut questions: MessageReader<QuestionSubmitted>,
    mut answers: MessageWriter<AnswerDelivered>,
    mut changed: MessageWriter<ProgressionChanged>,
    state: Res<State<ProgressionState>>,
    mut next: ResMut<NextState<ProgressionState>>,
    players: Query<&Transform, With<Player>>,
) {
    let mut current = *state.get();
    if current != ProgressionState::GuideReached && current != ProgressionState::QuestionAsked {
        questions.clear();
        return;
    }

    for question in questions.read() {
        let (text, epilogue) = match scripted_answer(&question.text) {
            Some((text, epilogue)) => (text, epilogue),
            None => (FALLBACK_ANSWER, false),
        };
        answers.write(AnswerDelivered {
            text: text.to_string(),
            epilogue,
        });

        if epilogue {
            if try_advance(current, ProgressionState::Epilogue, &mut next, &mut changed) {
                if let Ok(transform) = players.single() {
                    spawn_epilogue_bridges(
                        &mut commands,
                        transform.translation.truncate(),
                        &config,
                        clock.now_ms,
                    );
                }
            }
            break;
        }
        if try_advance(current, ProgressionState::QuestionAsked, &mut next, &mut changed) {
            current = ProgressionState::QuestionAsked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_answers_match_case_insensitively() {
        let (text, epilogue) = scripted_answer("What is the MEANING OF LIFE?").unwrap();
        assert!(text.contains("Forty-two"));
        assert!(!epilogue);
    }

    #[test]
    fn word_matching_respects_boundaries() {
        // "glove" must not trip the love answer.
        assert!(scripted_answer("where is my glove").is_none());
        assert!(scripted_answer("what is love?").is_some());
    }

    #[test]
    fn friendship_carries_the_epilogue_flag() {
        let (_, epilogue) = scripted_answer("can we be friends?").unwrap();
        assert!(epilogue);
        let (_, epilogue) = scripted_answer("I came here looking for friendship").unwrap();
        assert!(epilogue);
    }

    #[test]
    fn unmatched_questions_get_none() {
        assert!(scripted_answer("what's for dinner tonight").is_none());
    }

    #[test]
    fn compound_sky_question_needs_all_parts() {
        assert!(scripted_answer("why is the sky so dark?").is_some());
        assert!(scripted_answer("why is space so dark out here").is_some());
        assert!(scripted_answer("the sky is dark").is_none());
    }
}
