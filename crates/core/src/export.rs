//! CSV export of saved posts.
//!
//! Output targets spreadsheet import: RFC 4180 quoting with CRLF line
//! endings, prefixed with a UTF-8 BOM so Excel detects the encoding.
//! Fields with embedded newlines stay multi-line inside quotes.

use crate::record::SavedPost;

const HEADER: &[&str] = &["Actor", "Headline/Text", "Tags", "Note", "Saved at", "Original URL"];

/// Render `posts` as a CSV document, one row per post.
pub fn export_csv(posts: &[SavedPost]) -> String {
    let mut lines = Vec::with_capacity(posts.len() + 1);
    lines.push(HEADER.iter().map(|field| escape_field(field)).collect::<Vec<_>>().join(","));

    for post in posts {
        let tags = post.tags.join(" | ");
        let row = [
            post.post.actor.as_str(),
            post.post.text.as_str(),
            tags.as_str(),
            post.note.as_str(),
            post.saved_at.as_str(),
            post.post.url.as_str(),
        ];
        lines.push(row.iter().map(|field| escape_field(field)).collect::<Vec<_>>().join(","));
    }

    format!("\u{feff}{}", lines.join("\r\n"))
}

/// Quote a field when it contains a delimiter, quote, or line break,
/// doubling embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CapturedPost;

    fn post(actor: &str, text: &str, tags: &[&str], note: &str, url: &str) -> SavedPost {
        SavedPost {
            id: "p1".to_string(),
            post: CapturedPost {
                actor: actor.to_string(),
                text: text.to_string(),
                images: Vec::new(),
                timestamp: String::new(),
                url: url.to_string(),
                captured_at: "2024-03-01T08:00:00Z".to_string(),
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            note: note.to_string(),
            saved_at: "2024-03-01T09:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_starts_with_bom_and_header() {
        let csv = export_csv(&[]);
        assert!(csv.starts_with('\u{feff}'));
        assert_eq!(
            csv.trim_start_matches('\u{feff}'),
            "Actor,Headline/Text,Tags,Note,Saved at,Original URL"
        );
    }

    #[test]
    fn test_rows_use_crlf_without_trailing_newline() {
        let csv = export_csv(&[post("Jane", "hello", &[], "", "https://example.com")]);
        let lines: Vec<&str> = csv.trim_start_matches('\u{feff}').split("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Jane,hello,,,2024-03-01T09:00:00Z,https://example.com");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_comma_in_field_is_quoted() {
        let csv = export_csv(&[post("Doe, Jane", "a, b, and c", &[], "", "")]);
        assert!(csv.contains("\"Doe, Jane\""));
        assert!(csv.contains("\"a, b, and c\""));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let csv = export_csv(&[post("Jane", "she said \"ship it\"", &[], "", "")]);
        assert!(csv.contains("\"she said \"\"ship it\"\"\""));
    }

    #[test]
    fn test_newline_in_field_stays_inside_quotes() {
        let csv = export_csv(&[post("Jane", "line one\nline two", &[], "", "")]);
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_tags_joined_with_pipes() {
        let csv = export_csv(&[post("Jane", "hello", &["rust", "launch"], "", "")]);
        assert!(csv.contains("rust | launch"));
    }
}
