use serde::Deserialize;

use quiz_core::model::{OptionKey, OptionTable, QuestionDraft, QuestionId, QuestionKind};

/// Columns every question table must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "type", "frage", "solution", "a", "b", "c", "d", "e", "f", "info",
];

/// Lifecycle marker that keeps a question in the quiz.
const ELIGIBLE_INFO: &str = "falsch";

/// One raw row of the question table.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct QuestionRow {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub frage: String,
    #[serde(default)]
    pub solution: String,
    pub a: Option<String>,
    pub b: Option<String>,
    pub c: Option<String>,
    pub d: Option<String>,
    pub e: Option<String>,
    pub f: Option<String>,
    pub info: Option<String>,
}

impl QuestionRow {
    /// The question kind, or `None` when the row does not take part in the quiz.
    ///
    /// A row is eligible when `info` is empty or `falsch` and `type` is MC or FT.
    pub(crate) fn eligible_kind(&self) -> Option<QuestionKind> {
        let info_ok = self
            .info
            .as_deref()
            .map(str::trim)
            .is_none_or(|info| info.is_empty() || info == ELIGIBLE_INFO);
        if !info_ok {
            return None;
        }
        self.kind.parse().ok()
    }

    /// Convert an eligible row into a draft.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error::OptionKey` for an unknown solution letter.
    pub(crate) fn into_draft(
        self,
        id: QuestionId,
        kind: QuestionKind,
    ) -> Result<QuestionDraft, quiz_core::Error> {
        let solution = self
            .solution
            .split(';')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::parse::<OptionKey>)
            .collect::<Result<Vec<_>, _>>()?;

        let mut options = OptionTable::new();
        let texts = [self.a, self.b, self.c, self.d, self.e, self.f];
        for (key, text) in OptionKey::ALL.into_iter().zip(texts) {
            if let Some(text) = text {
                options.set(key, text);
            }
        }

        Ok(QuestionDraft {
            id,
            kind,
            prompt: self.frage,
            solution,
            options,
        })
    }
}
