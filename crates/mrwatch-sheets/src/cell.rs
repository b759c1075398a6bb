//! Logical cell values and their encoding into backend cells.

use crate::api::{CellData, CellFormat, Color, ExtendedValue};

/// Semantic background tone for a status cell.
///
/// The palette is closed: callers pick a tone, never a raw colour, so every
/// published table shares the same visual vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Success,
    Failure,
    Warning,
    Neutral,
}

impl Tone {
    /// The background colour rendered for this tone.
    pub fn color(self) -> Color {
        match self {
            Tone::Success => rgb(0xb6, 0xd7, 0xa8),
            Tone::Failure => rgb(0xea, 0x99, 0x99),
            Tone::Warning => rgb(0xff, 0xf2, 0xcc),
            Tone::Neutral => rgb(0xf9, 0xcb, 0x9c),
        }
    }
}

fn rgb(red: u8, green: u8, blue: u8) -> Color {
    Color {
        red: f64::from(red) / 255.0,
        green: f64::from(green) / 255.0,
        blue: f64::from(blue) / 255.0,
    }
}

/// A rich cell: display text plus optional hyperlink and tone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichCell {
    pub text: String,
    pub link: Option<String>,
    pub tone: Option<Tone>,
}

/// A logical cell value, as assembled by row builders.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Rich(RichCell),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn rich(text: impl Into<String>, link: Option<String>, tone: Option<Tone>) -> Self {
        Self::Rich(RichCell {
            text: text.into(),
            link,
            tone,
        })
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Encode a logical value into the backend's cell representation.
///
/// Total: every value encodes, nothing fails. A link renders as a HYPERLINK
/// formula (labelled when display text is present); a tone attaches as
/// background formatting on any branch.
pub fn encode_cell(value: &CellValue) -> CellData {
    match value {
        CellValue::Empty => CellData::default(),
        CellValue::Text(text) => CellData {
            user_entered_value: Some(ExtendedValue {
                string_value: Some(text.clone()),
                formula_value: None,
            }),
            user_entered_format: None,
        },
        CellValue::Rich(rich) => {
            let user_entered_value = match &rich.link {
                Some(link) if !rich.text.is_empty() => ExtendedValue {
                    string_value: None,
                    formula_value: Some(format!("=HYPERLINK(\"{}\";\"{}\")", link, rich.text)),
                },
                Some(link) => ExtendedValue {
                    string_value: None,
                    formula_value: Some(format!("=HYPERLINK(\"{link}\")")),
                },
                None => ExtendedValue {
                    string_value: Some(rich.text.clone()),
                    formula_value: None,
                },
            };
            CellData {
                user_entered_value: Some(user_entered_value),
                user_entered_format: rich.tone.map(|tone| CellFormat {
                    background_color: Some(tone.color()),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_encodes_to_empty_cell() {
        assert_eq!(encode_cell(&CellValue::Empty), CellData::default());
    }

    #[test]
    fn plain_text_encodes_as_string_value() {
        let cell = encode_cell(&CellValue::text("hello"));
        assert_eq!(
            cell.user_entered_value.and_then(|v| v.string_value),
            Some("hello".to_string())
        );
        assert!(cell.user_entered_format.is_none());
    }

    #[test]
    fn link_with_text_encodes_as_labelled_hyperlink() {
        let cell = encode_cell(&CellValue::rich(
            "Approved",
            Some("https://gitlab.com/mr/1".to_string()),
            None,
        ));
        assert_eq!(
            cell.user_entered_value.and_then(|v| v.formula_value),
            Some("=HYPERLINK(\"https://gitlab.com/mr/1\";\"Approved\")".to_string())
        );
    }

    #[test]
    fn link_without_text_encodes_as_bare_hyperlink() {
        let cell = encode_cell(&CellValue::rich(
            "",
            Some("https://gitlab.com/mr/2".to_string()),
            None,
        ));
        assert_eq!(
            cell.user_entered_value.and_then(|v| v.formula_value),
            Some("=HYPERLINK(\"https://gitlab.com/mr/2\")".to_string())
        );
    }

    #[test]
    fn tone_attaches_background_on_any_branch() {
        let linked = encode_cell(&CellValue::rich(
            "Pending",
            Some("https://gitlab.com/mr/3".to_string()),
            Some(Tone::Warning),
        ));
        let plain = encode_cell(&CellValue::rich("Pending", None, Some(Tone::Warning)));
        for cell in [linked, plain] {
            let background = cell
                .user_entered_format
                .and_then(|f| f.background_color)
                .expect("background colour");
            assert_eq!(background, Tone::Warning.color());
        }
    }

    #[test]
    fn rich_without_link_keeps_display_text() {
        let cell = encode_cell(&CellValue::rich("Rejected", None, Some(Tone::Failure)));
        assert_eq!(
            cell.user_entered_value.and_then(|v| v.string_value),
            Some("Rejected".to_string())
        );
    }
}
