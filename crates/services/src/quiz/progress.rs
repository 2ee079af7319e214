use quiz_core::model::QuestionKind;

use super::state::QuizPhase;

/// Completed share of the order as a whole percentage, rounded down.
#[must_use]
pub fn progress_percent(cursor: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = cursor.min(total) * 100 / total;
    u8::try_from(percent).unwrap_or(100)
}

/// Running score while a pass is active, final result once it is over.
#[must_use]
pub fn statistics_line(score: u32, total: usize, finished: bool) -> String {
    if finished && total > 0 {
        format!("Endergebnis: {score} von {total} korrekt!")
    } else {
        format!("Aktueller Punktestand: {score} / {total}.")
    }
}

/// Which controls the quiz page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    pub checklist: bool,
    pub text_input: bool,
    pub check: bool,
    pub next: bool,
    pub repeat_mistakes: bool,
}

impl Visibility {
    /// `kind` is the kind of the active question, if there is one.
    #[must_use]
    pub fn for_phase(phase: QuizPhase, kind: Option<QuestionKind>, has_mistakes: bool) -> Self {
        match phase {
            QuizPhase::Finished => Self {
                repeat_mistakes: has_mistakes,
                ..Self::default()
            },
            QuizPhase::Answering | QuizPhase::Revealed => {
                let revealed = phase == QuizPhase::Revealed;
                Self {
                    checklist: kind == Some(QuestionKind::MultipleChoice),
                    text_input: kind == Some(QuestionKind::FreeText),
                    check: !revealed,
                    next: revealed,
                    repeat_mistakes: false,
                }
            }
        }
    }
}
