use quiz_core::model::OptionKey;
use services::{QuizPhase, QuizSnapshot, Visibility};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    pub key: OptionKey,
    pub dom_id: String,
    pub label: String,
    pub disabled: bool,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub heading: String,
    pub prompt: String,
    pub progress_label: String,
    pub progress_style: String,
    pub options: Vec<OptionRowVm>,
    /// Answer field stays focusable after reveal so Enter can advance.
    pub text_readonly: bool,
    pub feedback: String,
    pub feedback_class: &'static str,
    pub statistics: String,
    pub visibility: Visibility,
}

#[must_use]
pub fn map_quiz_snapshot(snapshot: &QuizSnapshot) -> QuizVm {
    let heading = match snapshot.phase {
        QuizPhase::Finished => String::new(),
        QuizPhase::Answering | QuizPhase::Revealed => {
            format!("Frage {} von {}", snapshot.position, snapshot.total)
        }
    };

    let options = snapshot
        .options
        .iter()
        .map(|option| OptionRowVm {
            key: option.key,
            dom_id: format!("quiz-option-{}", option.key),
            label: option.label.clone(),
            disabled: option.disabled,
            class: if option.highlighted {
                "quiz-option quiz-option--solution"
            } else {
                "quiz-option"
            },
        })
        .collect();

    let feedback_class = match snapshot.correct {
        Some(true) => "quiz-feedback quiz-feedback--correct",
        Some(false) => "quiz-feedback quiz-feedback--wrong",
        None => "quiz-feedback",
    };

    QuizVm {
        heading,
        prompt: snapshot.prompt.clone(),
        progress_label: format!("{}%", snapshot.progress),
        progress_style: format!("width: {}%;", snapshot.progress),
        options,
        text_readonly: snapshot.phase == QuizPhase::Revealed,
        feedback: snapshot.feedback.clone(),
        feedback_class,
        statistics: snapshot.statistics.clone(),
        visibility: snapshot.visibility,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::answer::McOption;
    use std::collections::BTreeSet;

    fn snapshot(phase: QuizPhase) -> QuizSnapshot {
        QuizSnapshot {
            phase,
            kind: None,
            prompt: "Welche Schicht?".to_string(),
            progress: 50,
            options: vec![
                McOption {
                    key: OptionKey::A,
                    label: "Sicherung".to_string(),
                    disabled: true,
                    highlighted: false,
                },
                McOption {
                    key: OptionKey::B,
                    label: "Vermittlung".to_string(),
                    disabled: true,
                    highlighted: true,
                },
            ],
            selection: BTreeSet::from([OptionKey::A]),
            text: String::new(),
            feedback: "Falsch! Richtige Lösung(en): b".to_string(),
            correct: Some(false),
            statistics: "Aktueller Punktestand: 1 / 2.".to_string(),
            visibility: Visibility::default(),
            position: 2,
            total: 2,
            score: 1,
            mistakes: 0,
        }
    }

    #[test]
    fn maps_revealed_options_and_feedback() {
        let vm = map_quiz_snapshot(&snapshot(QuizPhase::Revealed));

        assert_eq!(vm.heading, "Frage 2 von 2");
        assert_eq!(vm.progress_style, "width: 50%;");
        assert_eq!(vm.progress_label, "50%");
        assert_eq!(vm.feedback_class, "quiz-feedback quiz-feedback--wrong");
        assert!(vm.text_readonly);

        let first = &vm.options[0];
        assert_eq!(first.dom_id, "quiz-option-a");
        assert!(first.disabled);
        assert_eq!(first.class, "quiz-option");
        let second = &vm.options[1];
        assert_eq!(second.class, "quiz-option quiz-option--solution");
    }

    #[test]
    fn finished_snapshot_has_no_heading() {
        let mut finished = snapshot(QuizPhase::Finished);
        finished.correct = None;
        let vm = map_quiz_snapshot(&finished);

        assert!(vm.heading.is_empty());
        assert_eq!(vm.feedback_class, "quiz-feedback");
        assert!(!vm.text_readonly);
    }
}
