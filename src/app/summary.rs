use super::state::{MetadataSummary, SummaryField};
use crate::upload::ResultMetadata;
use crate::utils::format::{format_timestamp, group_thousands};

const TITLE: &str = "Processing details";

/// Builds the details block from whatever metadata the server sent.
///
/// Fields keep a fixed order. Missing, empty and zero values are left out
/// rather than shown blank.
pub fn summarize(meta: &ResultMetadata) -> MetadataSummary {
    let mut fields = Vec::with_capacity(4);

    if let Some(input) = present(&meta.input_file) {
        fields.push(SummaryField {
            label: "Input file",
            value: input.to_string(),
        });
    }
    if let Some(output) = present(&meta.output_file) {
        fields.push(SummaryField {
            label: "Output file",
            value: output.to_string(),
        });
    }
    if let Some(at) = present(&meta.processed_at) {
        fields.push(SummaryField {
            label: "Processed at",
            value: format_timestamp(at),
        });
    }
    if let Some(len) = meta.content_length.filter(|len| *len > 0) {
        fields.push(SummaryField {
            label: "Content length",
            value: format!("{} characters", group_thousands(len)),
        });
    }

    MetadataSummary {
        title: TITLE,
        fields,
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(summary: &MetadataSummary) -> Vec<&'static str> {
        summary.fields.iter().map(|f| f.label).collect()
    }

    #[test]
    fn all_fields_in_fixed_order() {
        let meta = ResultMetadata {
            input_file: Some("report.pdf".into()),
            output_file: Some("report_20250115_143000.md".into()),
            processed_at: Some("2025-01-15T14:30:00.5".into()),
            content_length: Some(12_345),
        };
        let summary = summarize(&meta);

        assert_eq!(summary.title, "Processing details");
        assert_eq!(
            labels(&summary),
            vec!["Input file", "Output file", "Processed at", "Content length"]
        );
        assert_eq!(summary.fields[2].value, "2025/01/15 14:30:00");
        assert_eq!(summary.fields[3].value, "12,345 characters");
    }

    #[test]
    fn only_input_file() {
        let meta = ResultMetadata {
            input_file: Some("scan.pdf".into()),
            ..Default::default()
        };
        let summary = summarize(&meta);
        assert_eq!(
            summary.fields,
            vec![SummaryField {
                label: "Input file",
                value: "scan.pdf".into()
            }]
        );
    }

    #[test]
    fn empty_and_zero_values_are_omitted() {
        let meta = ResultMetadata {
            input_file: Some(String::new()),
            output_file: None,
            processed_at: None,
            content_length: Some(0),
        };
        assert!(summarize(&meta).fields.is_empty());
    }
}
