use serde::{Deserialize, Serialize};

/// Text drawn inside a well.
///
/// From JS this is either a plain string or a `{ header, main }` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WellLabel {
    /// Single centered line.
    Text(String),
    /// Header in the upper third, main text in the lower two thirds.
    TwoLine {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        main: Option<String>,
    },
}

/// How a label should be laid out once empty parts are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelLayout<'a> {
    /// Both header and main are present.
    Split { header: &'a str, main: &'a str },
    /// Exactly one non-empty line.
    Single(&'a str),
}

impl WellLabel {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn two_line(header: impl Into<String>, main: impl Into<String>) -> Self {
        Self::TwoLine {
            header: Some(header.into()),
            main: Some(main.into()),
        }
    }

    /// Resolve the layout; `None` when there is nothing to draw.
    pub fn layout(&self) -> Option<LabelLayout<'_>> {
        let (header, main) = match self {
            Self::Text(text) => (None, Some(text.as_str())),
            Self::TwoLine { header, main } => (header.as_deref(), main.as_deref()),
        };
        let header = header.filter(|s| !s.is_empty());
        let main = main.filter(|s| !s.is_empty());
        match (header, main) {
            (Some(header), Some(main)) => Some(LabelLayout::Split { header, main }),
            (Some(line), None) | (None, Some(line)) => Some(LabelLayout::Single(line)),
            (None, None) => None,
        }
    }
}

impl From<&str> for WellLabel {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for WellLabel {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string_or_object() {
        let plain: WellLabel = serde_json::from_str("\"A1\"").unwrap();
        assert_eq!(plain, WellLabel::text("A1"));

        let pair: WellLabel = serde_json::from_str(r#"{"header":"S1","main":"42"}"#).unwrap();
        assert_eq!(pair, WellLabel::two_line("S1", "42"));

        let header_only: WellLabel = serde_json::from_str(r#"{"header":"S1"}"#).unwrap();
        assert_eq!(header_only.layout(), Some(LabelLayout::Single("S1")));
    }

    #[test]
    fn test_layout_drops_empty_parts() {
        assert_eq!(WellLabel::text("").layout(), None);
        assert_eq!(
            WellLabel::two_line("", "main").layout(),
            Some(LabelLayout::Single("main"))
        );
        assert_eq!(
            WellLabel::two_line("h", "m").layout(),
            Some(LabelLayout::Split {
                header: "h",
                main: "m"
            })
        );
    }
}
