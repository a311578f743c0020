//! Regex-based extraction of table rows from portal HTML.
//!
//! Billing portals render subscriber lists as plain `<table>` markup. The
//! markup is messy and varies per portal, so rows are pulled out with
//! permissive regexes and each cell is reduced to its text content.

use std::sync::OnceLock;

use regex::Regex;

fn row_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").unwrap())
}

fn cell_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<t[dh][^>]*>(.*?)</t[dh]>").unwrap())
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]+>").unwrap())
}

/// One `<tr>` split into the text content of its cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    /// Cell text by zero-based index, empty string when the column is absent.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Raw text of the whole row, used for substring matching.
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }
}

/// Extracts every table row from an HTML document. Header rows come back
/// too; callers filter by content.
pub fn extract_rows(html: &str) -> Vec<TableRow> {
    row_regex()
        .captures_iter(html)
        .map(|caps| {
            let inner = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let cells = cell_regex()
                .captures_iter(inner)
                .map(|c| strip_markup(c.get(1).map(|m| m.as_str()).unwrap_or("")))
                .collect();
            TableRow { cells }
        })
        .filter(|row| !row.cells.is_empty())
        .collect()
}

/// Removes nested tags and decodes the handful of entities portals emit.
fn strip_markup(fragment: &str) -> String {
    let text = tag_regex().replace_all(fragment, " ");
    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_cells_from_simple_table() {
        let html = r#"
            <table>
              <tr><th>#</th><th>Name</th><th>MAC</th></tr>
              <tr><td>1</td><td>Jane Doe</td><td>AA:BB:CC:DD:EE:FF</td></tr>
            </table>
        "#;
        let rows = extract_rows(html);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cells, vec!["1", "Jane Doe", "AA:BB:CC:DD:EE:FF"]);
    }

    #[test]
    fn strips_nested_markup_and_entities() {
        let html = "<tr><td><a href=\"/u/1\"><b>Jane&nbsp;&amp;&nbsp;Co</b></a></td></tr>";
        let rows = extract_rows(html);
        assert_eq!(rows[0].cells, vec!["Jane & Co"]);
    }

    #[test]
    fn missing_cell_reads_as_empty() {
        let rows = extract_rows("<tr><td>only</td></tr>");
        assert_eq!(rows[0].cell(0), "only");
        assert_eq!(rows[0].cell(5), "");
    }

    #[test]
    fn ignores_rows_without_cells() {
        let rows = extract_rows("<tr></tr><tr><td>x</td></tr>");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn handles_uppercase_and_attribute_heavy_markup() {
        let html = "<TR class=\"odd\"><TD align=center>42</TD><TD>active</TD></TR>";
        let rows = extract_rows(html);
        assert_eq!(rows[0].cells, vec!["42", "active"]);
    }
}
