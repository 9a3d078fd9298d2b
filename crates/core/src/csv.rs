//! RFC 4180-style CSV encoding for admin exports.
//!
//! Fields containing a comma, double quote, or newline are wrapped in quotes
//! with embedded quotes doubled; everything else is emitted verbatim.

/// Escape a single CSV field.
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Encode a header row plus data rows into a CSV document.
///
/// Rows shorter than the header are padded with empty fields so the output
/// always stays rectangular.
pub fn encode(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let mut fields: Vec<String> = row.iter().map(|f| escape_field(f)).collect();
        while fields.len() < headers.len() {
            fields.push(String::new());
        }
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(escape_field("hello"), "hello");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn comma_quote_newline_are_quoted() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
    }

    /// A quoted field re-parses to the original string.
    #[test]
    fn quoting_round_trips() {
        let original = "Doe, John \"JD\"\nsecond line";
        let escaped = escape_field(original);

        // Strip the surrounding quotes and undo the doubling.
        let inner = &escaped[1..escaped.len() - 1];
        assert_eq!(inner.replace("\"\"", "\""), original);
    }

    #[test]
    fn encodes_header_and_rows() {
        let csv = encode(
            &["name", "email"],
            &[
                vec!["Jane".to_string(), "jane@example.com".to_string()],
                vec!["Doe, John".to_string(), "john@example.com".to_string()],
            ],
        );
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[0], "name,email");
        assert_eq!(lines[1], "Jane,jane@example.com");
        assert_eq!(lines[2], "\"Doe, John\",john@example.com");
    }

    #[test]
    fn short_rows_are_padded() {
        let csv = encode(&["a", "b", "c"], &[vec!["1".to_string()]]);
        assert_eq!(csv.split('\n').nth(1).unwrap(), "1,,");
    }
}
