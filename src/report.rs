// 📄 Document Renderer - Persists the sales summary as an HTML document
// Title + summary fragment + data table, written in one shot.

use std::fs;
use std::path::Path;

use crate::error::ReportError;

// ============================================================================
// DOCUMENT FORMAT
// ============================================================================

/// Output formats the renderer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Html,
}

impl DocumentFormat {
    /// File extension
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Html => "html",
        }
    }

    /// MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Html => "text/html",
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Render the report and persist it at `path`.
///
/// `summary_html` is an HTML fragment (the three summary lines joined with
/// `<br/>`) and is embedded verbatim. Table cells are escaped. Any I/O
/// failure is a `Render` error.
pub fn render_document(
    path: &Path,
    title: &str,
    summary_html: &str,
    table: &[Vec<String>],
) -> Result<(), ReportError> {
    let html = build_html(title, summary_html, table);

    fs::write(path, html)
        .map_err(|e| ReportError::render(format!("{}: {}", path.display(), e)))
}

fn build_html(title: &str, summary_html: &str, table: &[Vec<String>]) -> String {
    let mut rows = String::new();
    for (i, row) in table.iter().enumerate() {
        // first row is the header
        let tag = if i == 0 { "th" } else { "td" };

        rows.push_str("      <tr>");
        for cell in row {
            rows.push_str(&format!("<{tag}>{}</{tag}>", escape(cell)));
        }
        rows.push_str("</tr>\n");
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
           <meta charset=\"utf-8\"/>\n\
           <title>{title}</title>\n\
         </head>\n\
         <body>\n\
           <h1>{title}</h1>\n\
           <p>{summary_html}</p>\n\
           <table border=\"1\">\n\
         {rows}\
           </table>\n\
           <p><small>Generated {generated}</small></p>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        summary_html = summary_html,
        rows = rows,
        generated = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
