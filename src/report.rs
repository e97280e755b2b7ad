use crate::pairs::ExamplePair;
use anyhow::Result;
use serde::Serialize;
use std::fs;

/// Report rendering selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Html,
}

/// One pair's worth of captured matcher output.
///
/// Carries the input texts alongside the paths so the report is
/// self-contained; a text of `None` means the file could not be read.
#[derive(Debug, Serialize)]
pub struct ReportEntry {
    pub base: String,
    pub pattern_path: String,
    pub doc_path: String,
    pub pattern: Option<String>,
    pub doc: Option<String>,
    pub matches: String,
}

impl ReportEntry {
    pub fn new(pair: &ExamplePair, matches: String) -> Self {
        Self {
            base: pair.base.clone(),
            pattern_path: pair.pattern.display().to_string(),
            doc_path: pair.doc.display().to_string(),
            pattern: fs::read_to_string(&pair.pattern).ok(),
            doc: fs::read_to_string(&pair.doc).ok(),
            matches,
        }
    }
}

/// Aggregated matcher output for one run, in discovery order.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Render the report in the requested format.
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReportFormat::Html => Ok(self.to_html()),
        }
    }

    fn to_html(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("<head><style>{CSS}</style></head><body>"));

        // Summary table: one column per pair, a glyph for whether the
        // matcher reported anything.
        s.push_str("<table style=\"text-align:center\"><tr>");
        for entry in &self.entries {
            s.push_str(&format!("<td><b>{}</b></td>", escape(&entry.base)));
        }
        s.push_str("</tr><tr>");
        for entry in &self.entries {
            s.push_str(&format!(
                "<td>{}</td>",
                status_emoji(!entry.matches.is_empty())
            ));
        }
        s.push_str("</tr></table>");

        for entry in &self.entries {
            s.push_str(&format!(
                "<div class=\"example\"><h3>{}</h3><div class=\"pair\">",
                escape(&entry.base)
            ));
            match &entry.pattern {
                Some(pattern) => s.push_str(&format!(
                    "<div class=\"pattern\"><a href=\"{}\"><pre>{}</pre></a></div>",
                    entry.pattern_path,
                    escape(pattern)
                )),
                None => s.push_str(&format!(
                    "<div class=\"notimplemented\">This pair is missing its pattern file!<br/>Edit {}</div>",
                    entry.pattern_path
                )),
            }
            if entry.matches.is_empty() {
                s.push_str(
                    "<div class=\"notimplemented\">No matches for this pair!</div>",
                );
            } else {
                s.push_str(&format!(
                    "<div class=\"match\"><a href=\"{}\"><pre>{}</pre></a></div>",
                    entry.doc_path,
                    escape(&entry.matches)
                ));
            }
            s.push_str("</div></div>");
        }
        s.push_str("</body>");
        s
    }
}

fn status_emoji(matched: bool) -> &'static str {
    if matched { "\u{2705}" } else { "\u{1F6A7}" }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const CSS: &str = "
.pattern {
    background-color: #0974d7;
    color: white;
    padding: 10px;
}

.match {
    background-color: white;
    padding: 10px;
    border: 1px solid #0974d7;
    color: black;
}

.pair {
    display: flex;
    width: 100%;
    font-family: Consolas, Bitstream Vera Sans Mono, Courier New, Courier, monospace;
    font-size: 1em;
}

.example {
    padding: 10px;
    margin: 10px;
    border: 1px solid #ccc;
}

a {
    text-decoration: none;
    color: inherit;
}

pre {
    margin: 0;
}

.notimplemented {
    background-color: yellow;
}

h3 {
    margin: 0;
    margin-bottom: 10px;
}
";
