//! Review status classification.

use mrwatch_model::ReviewRecord;
use mrwatch_sheets::Tone;

/// What a review cell displays and how it is toned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCell {
    pub text: String,
    pub tone: Tone,
}

/// Classify one review record into its status cell.
///
/// Precedence, first match wins: an approval from an eligible reviewer
/// beats everything; a pipeline that is not green beats discussion state;
/// unresolved discussions mean the work was sent back; no discussions at
/// all means the review has not happened yet.
pub fn classify(record: &ReviewRecord) -> StatusCell {
    if record.is_approved() {
        let pseudonyms: String = record
            .approved_by
            .iter()
            .map(|reviewer| reviewer.pseudonym.as_str())
            .collect();
        return StatusCell {
            text: format!("Approved [{pseudonyms}]"),
            tone: Tone::Success,
        };
    }

    if record.pipeline_status != "SUCCESS" {
        return StatusCell {
            text: "Pipeline failed".to_string(),
            tone: Tone::Failure,
        };
    }

    if record.discussions.has_unresolved() {
        return StatusCell {
            text: "Rejected".to_string(),
            tone: Tone::Failure,
        };
    }

    if record.discussions.is_empty() {
        return StatusCell {
            text: "Pending".to_string(),
            tone: Tone::Warning,
        };
    }

    StatusCell {
        text: "Problems resolved".to_string(),
        tone: Tone::Neutral,
    }
}
