//! Quote-aware CSV text parsing.
//!
//! Inputs are small, pre-aggregated extracts, so the whole file is parsed in
//! memory. Quoted fields may contain commas and `""` escapes but not line
//! breaks: blank or multi-line quoted content is not supported.

use std::sync::Arc;

use super::model::Record;

// ---------------------------------------------------------------------------
// Line tokenizer
// ---------------------------------------------------------------------------

/// Split one physical line (without its newline) into trimmed fields.
///
/// Always returns at least one field. An unbalanced quote is not an error:
/// the rest of the line is read as if still inside the quotes.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut buf = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                buf.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(buf.trim().to_string());
                buf.clear();
            }
            other => buf.push(other),
        }
    }
    fields.push(buf.trim().to_string());
    fields
}

// ---------------------------------------------------------------------------
// Header normalization
// ---------------------------------------------------------------------------

/// Normalize a raw header cell into a stable key.
///
/// `  "Avg   Close" ` → `avg_close`.
pub fn normalize_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);

    let mut key = String::with_capacity(trimmed.len());
    let mut in_space = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !in_space {
                key.push('_');
            }
            in_space = true;
        } else {
            key.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    key
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse full file text into records keyed by normalized header.
///
/// Lines may end in `\n` or `\r\n`. Blank lines are skipped. Text with no
/// data rows (empty, or header only) yields an empty vector.
pub fn parse_csv(text: &str) -> Vec<Record> {
    let mut lines = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = tokenize_line(header_line)
        .iter()
        .map(|h| normalize_key(h))
        .collect();

    // Duplicate headers collapse onto their first position; the value of the
    // last column carrying that key wins.
    let mut keys: Vec<String> = Vec::with_capacity(headers.len());
    let mut slot_of_column: Vec<usize> = Vec::with_capacity(headers.len());
    for h in &headers {
        match keys.iter().position(|k| k == h) {
            Some(slot) => slot_of_column.push(slot),
            None => {
                slot_of_column.push(keys.len());
                keys.push(h.clone());
            }
        }
    }
    let keys: Arc<[String]> = keys.into();

    let mut records = Vec::new();
    for line in lines {
        let fields = tokenize_line(line);
        if fields.is_empty() {
            continue;
        }
        let mut values = vec![String::new(); keys.len()];
        for (col, slot) in slot_of_column.iter().enumerate() {
            if let Some(field) = fields.get(col) {
                values[*slot] = field.trim().to_string();
            } else {
                values[*slot].clear();
            }
        }
        records.push(Record::new(Arc::clone(&keys), values));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_keeps_commas_inside_quotes() {
        assert_eq!(tokenize_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn tokenizer_resolves_escaped_quote() {
        assert_eq!(tokenize_line(r#"a,"b""c",d"#), vec!["a", "b\"c", "d"]);
    }

    #[test]
    fn tokenizer_trims_and_keeps_empty_fields() {
        assert_eq!(tokenize_line(" a , ,c,"), vec!["a", "", "c", ""]);
        assert_eq!(tokenize_line("   "), vec![""]);
        assert_eq!(tokenize_line(""), vec![""]);
    }

    #[test]
    fn tokenizer_tolerates_unbalanced_quote() {
        assert_eq!(tokenize_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn normalize_key_collapses_whitespace_and_quotes() {
        assert_eq!(normalize_key("  Avg Close "), "avg_close");
        assert_eq!(normalize_key("\"Trade\t  Date\""), "trade_date");
        assert_eq!(normalize_key("SMA_30"), "sma_30");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn parse_normalizes_header() {
        let recs = parse_csv("Year, Avg Close\n2024, 100.5\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].keys(), ["year", "avg_close"]);
        assert_eq!(recs[0].get("year"), Some("2024"));
        assert_eq!(recs[0].get("avg_close"), Some("100.5"));
    }

    #[test]
    fn parse_header_only_is_empty() {
        assert!(parse_csv("year,avg_close\n").is_empty());
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("\n  \r\n").is_empty());
    }

    #[test]
    fn parse_handles_crlf_blank_lines_and_ragged_rows() {
        let text = "date,close,sma_30\r\n2024-01-02,10,\r\n\r\n2024-01-03,11\n2024-01-04,12,11.5,extra\n";
        let recs = parse_csv(text);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].get("sma_30"), Some(""));
        assert_eq!(recs[1].get("close"), Some("11"));
        assert_eq!(recs[1].get("sma_30"), Some(""));
        assert_eq!(recs[2].keys().len(), 3);
        assert_eq!(recs[2].get("sma_30"), Some("11.5"));
    }

    #[test]
    fn parse_strips_quotes_from_values() {
        let recs = parse_csv("name,note\n\"ACME, Inc.\",\"said \"\"hi\"\"\"\n");
        assert_eq!(recs[0].get("name"), Some("ACME, Inc."));
        assert_eq!(recs[0].get("note"), Some("said \"hi\""));
    }

    #[test]
    fn duplicate_headers_keep_last_value() {
        let recs = parse_csv("close,Close,date\n1,2,2024-01-01\n");
        assert_eq!(recs[0].keys(), ["close", "date"]);
        assert_eq!(recs[0].get("close"), Some("2"));
    }

    #[test]
    fn reparsing_is_structurally_equal() {
        let text = "trade_date,daily_return\n2024-01-02,0.01\n2024-01-03,-0.02\n";
        assert_eq!(parse_csv(text), parse_csv(text));
    }
}
