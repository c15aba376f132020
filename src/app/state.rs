use crate::error::WidgetError;
use crate::utils::markdown::PreviewBlock;
use derivative::Derivative;
use std::fmt;
use std::str::FromStr;

/// The sections of the window. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    UploadBox,
    FileSelected,
    Progress,
    Result,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSummary {
    pub title: &'static str,
    pub fields: Vec<SummaryField>,
}

/// What the result section shows. Built once from a successful response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    pub preview_html: Option<String>,
    pub preview_blocks: Vec<PreviewBlock>,
    pub raw_markdown: Option<String>,
    pub metadata: Option<MetadataSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Idle,
    FileSelected(FileSummary),
    Processing,
    Result(ResultView),
    Error(WidgetError),
}

impl UiState {
    pub fn section(&self) -> Section {
        match self {
            UiState::Idle => Section::UploadBox,
            UiState::FileSelected(_) => Section::FileSelected,
            UiState::Processing => Section::Progress,
            UiState::Result(_) => Section::Result,
            UiState::Error(_) => Section::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Preview,
    Markdown,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Preview, Tab::Markdown];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Preview => "Preview",
            Tab::Markdown => "Markdown",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preview" => Ok(Tab::Preview),
            "markdown" => Ok(Tab::Markdown),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Preview => f.write_str("preview"),
            Tab::Markdown => f.write_str("markdown"),
        }
    }
}

/// Stamped on each upload so a late completion can be told apart from the
/// current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(pub(crate) u64);

#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug, Default)]
pub struct WidgetConfig {
    /// Largest file `process()` will send, in bytes.
    #[derivative(Default(value = "16 * 1024 * 1024"))]
    pub max_file_size: u64,
}
