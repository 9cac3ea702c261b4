use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::category;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::render::{Entry, MemorySurface, NoticeKind, Region};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
static BLOCK_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</(p|li|div)>|<br\s*/?>").expect("valid block pattern"));
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").expect("valid numbered pattern"));

/// One line of a recommendation text prepared for the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationLine {
    /// Numbered step such as `1. Arabuluculuğa başvurun`
    Item(String),
    Paragraph(String),
}

/// Split recommendation text into display lines.
///
/// Markup is reduced to its text, one line per block element. Plain text
/// keeps its non-empty lines and numbered lines become items.
pub fn recommendation_lines(text: &str) -> Vec<RecommendationLine> {
    let plain = if text.contains("<p>") || text.contains("<li>") {
        let with_breaks = BLOCK_END_RE.replace_all(text, "\n");
        TAG_RE.replace_all(&with_breaks, "").into_owned()
    } else {
        text.to_string()
    };

    plain
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if NUMBERED_RE.is_match(line) {
                RecommendationLine::Item(line.to_string())
            } else {
                RecommendationLine::Paragraph(line.to_string())
            }
        })
        .collect()
}

pub struct Formatter {
    format: OutputFormat,
    base_url: Option<String>,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format, base_url: None }
    }

    /// Prefix download links with the service root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Format a rendered result page
    pub fn format_surface(&self, surface: &MemorySurface) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(self.format_table(surface)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(surface)?),
            OutputFormat::Markdown => Ok(self.format_markdown(surface)),
        }
    }

    /// Format the category table
    pub fn format_categories(&self) -> Result<String> {
        match self.format {
            OutputFormat::Table => {
                let mut table = Table::new();
                table.set_header(vec![
                    Cell::new("Kod").fg(Color::Cyan),
                    Cell::new("Görünen Ad").fg(Color::Cyan),
                ]);
                for (code, _) in category::KNOWN_CATEGORIES {
                    table.add_row(vec![Cell::new(code), Cell::new(category::display_name(code))]);
                }
                Ok(table.to_string())
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = category::KNOWN_CATEGORIES
                    .iter()
                    .map(|(code, label)| (code.to_string(), serde_json::Value::from(*label)))
                    .collect();
                Ok(serde_json::to_string_pretty(&map)?)
            }
            OutputFormat::Markdown => {
                let mut result = String::from("| Kod | Görünen Ad |\n|-----|-----------|\n");
                for (code, label) in category::KNOWN_CATEGORIES {
                    result.push_str(&format!("| {} | {} |\n", code, label));
                }
                Ok(result)
            }
        }
    }

    fn link(&self, href: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), href),
            None => href.to_string(),
        }
    }

    // Table formatting
    fn format_table(&self, surface: &MemorySurface) -> String {
        let mut result = String::new();

        if let Some(label) = surface.text(Region::Category) {
            result.push_str(&format!("\n{} {}\n", "🏷️".cyan(), label.bold()));
            result.push_str(&"=".repeat(80));
            result.push('\n');
        }

        if let Some(summary) = surface.text(Region::Summary) {
            result.push_str(&format!("{} {}\n", "📝".cyan(), summary));
        }

        for entry in surface.entries(Region::Notice) {
            if let Entry::Notice { kind, text } = entry {
                match kind {
                    NoticeKind::Warning => result.push_str(&format!("{} {}\n", "⚠️".yellow(), text.yellow())),
                    NoticeKind::Info => result.push_str(&format!("{} {}\n", "ℹ️".green(), text.dimmed())),
                }
            }
        }

        result.push_str(&format!("\n{} {}\n", "⚖️".cyan(), "İlgili Kanunlar".bold()));
        let mut laws = Table::new();
        laws.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Kanun").fg(Color::Cyan),
            Cell::new("İçerik").fg(Color::Cyan),
            Cell::new("Bağlantı").fg(Color::Cyan),
        ]);
        laws.set_content_arrangement(ContentArrangement::Dynamic);
        let mut law_rows = 0;
        for entry in surface.entries(Region::Laws) {
            match entry {
                Entry::Law { title, content, link } => {
                    law_rows += 1;
                    laws.add_row(vec![
                        Cell::new(law_rows),
                        Cell::new(title),
                        Cell::new(truncate_string(content, 60)),
                        Cell::new(link.as_deref().unwrap_or("-")),
                    ]);
                }
                other => result.push_str(&self.plain_line(other)),
            }
        }
        if law_rows > 0 {
            result.push_str(&laws.to_string());
            result.push('\n');
        }

        result.push_str(&format!("\n{} {}\n", "🏛️".cyan(), "İlgili Yargıtay Kararları".bold()));
        let mut decisions = Table::new();
        decisions.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Mahkeme").fg(Color::Cyan),
            Cell::new("Esas/Karar No").fg(Color::Cyan),
            Cell::new("Tarih").fg(Color::Cyan),
            Cell::new("Özet").fg(Color::Cyan),
        ]);
        decisions.set_content_arrangement(ContentArrangement::Dynamic);
        let mut decision_rows = 0;
        for entry in surface.entries(Region::Decisions) {
            match entry {
                Entry::Decision {
                    court,
                    case_number,
                    date,
                    summary,
                    ..
                } => {
                    decision_rows += 1;
                    decisions.add_row(vec![
                        Cell::new(decision_rows),
                        Cell::new(court),
                        Cell::new(case_number),
                        Cell::new(date.as_deref().unwrap_or("-")),
                        Cell::new(truncate_string(summary, 60)),
                    ]);
                }
                other => result.push_str(&self.plain_line(other)),
            }
        }
        if decision_rows > 0 {
            result.push_str(&decisions.to_string());
            result.push('\n');
        }

        result.push_str(&format!("\n{} {}\n", "💡".cyan(), "Öneriler".bold()));
        for entry in surface.entries(Region::Recommendations) {
            result.push_str(&self.plain_line(entry));
        }

        if let Some(href) = surface.download_href() {
            result.push_str(&format!("\n{} {}\n", "📥".cyan(), self.link(href).underline()));
        }

        result
    }

    fn plain_line(&self, entry: &Entry) -> String {
        match entry {
            Entry::Placeholder { text } => format!("  {}\n", text.yellow()),
            Entry::Recommendation { text } => format!("  {} {}\n", "✔".green(), text),
            Entry::Markup { markup } => recommendation_lines(markup)
                .into_iter()
                .map(|line| match line {
                    RecommendationLine::Item(text) => format!("  {} {}\n", "✔".green(), text),
                    RecommendationLine::Paragraph(text) => format!("  {}\n", text),
                })
                .collect(),
            Entry::Text { text } | Entry::Notice { text, .. } => format!("  {}\n", text),
            Entry::Link { href } => format!("  {}\n", self.link(href)),
            Entry::Law { title, content, .. } => format!("  {}: {}\n", title.bold(), content),
            Entry::Decision {
                case_number, summary, ..
            } => format!("  {}: {}\n", case_number.bold(), summary),
        }
    }

    // Markdown formatting
    fn format_markdown(&self, surface: &MemorySurface) -> String {
        let mut result = String::new();

        result.push_str(&format!(
            "# Hukuki Analiz: {}\n\n",
            surface.text(Region::Category).unwrap_or(category::GENERAL_LABEL)
        ));
        if let Some(summary) = surface.text(Region::Summary) {
            result.push_str(&format!("{}\n\n", summary));
        }
        for entry in surface.entries(Region::Notice) {
            if let Entry::Notice { text, .. } = entry {
                result.push_str(&format!("> {}\n\n", text));
            }
        }

        result.push_str("## İlgili Kanunlar\n\n");
        for entry in surface.entries(Region::Laws) {
            result.push_str(&self.markdown_item(entry));
        }

        result.push_str("\n## İlgili Yargıtay Kararları\n\n");
        for entry in surface.entries(Region::Decisions) {
            result.push_str(&self.markdown_item(entry));
        }

        result.push_str("\n## Öneriler\n\n");
        for entry in surface.entries(Region::Recommendations) {
            result.push_str(&self.markdown_item(entry));
        }

        if let Some(href) = surface.download_href() {
            result.push_str(&format!("\n[Belgeyi indir]({})\n", self.link(href)));
        }

        result
    }

    fn markdown_item(&self, entry: &Entry) -> String {
        match entry {
            Entry::Law { title, content, link } => match link {
                Some(link) => format!("- **{}**: {} ([Kanun Metnine Git]({}))\n", title, content, link),
                None => format!("- **{}**: {}\n", title, content),
            },
            Entry::Decision {
                court,
                case_number,
                date,
                summary,
                ..
            } => match date {
                Some(date) => format!("- **{} {}** ({}): {}\n", court, case_number, date, summary),
                None => format!("- **{} {}**: {}\n", court, case_number, summary),
            },
            Entry::Placeholder { text } => format!("_{}_\n", text),
            Entry::Recommendation { text } => format!("- {}\n", text),
            Entry::Markup { markup } => recommendation_lines(markup)
                .into_iter()
                .map(|line| match line {
                    RecommendationLine::Item(text) => format!("- {}\n", text),
                    RecommendationLine::Paragraph(text) => format!("{}\n\n", text),
                })
                .collect(),
            Entry::Text { text } | Entry::Notice { text, .. } => format!("{}\n", text),
            Entry::Link { href } => format!("<{}>\n", self.link(href)),
        }
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::AnalysisResponse;
    use crate::render::{render_analysis, RenderContext};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rendered() -> MemorySurface {
        let response: AnalysisResponse = serde_json::from_value(json!({
            "id": "123",
            "analysis": {
                "summary": "Kira alacağı",
                "relevant_laws": [{"title": "TBK m. 315", "description": "Temerrüt", "url": "https://mevzuat.gov.tr"}],
                "relevant_decisions": [],
                "recommendations": "1. İhtarname gönderin\nTahliye davası açılabilir"
            }
        }))
        .unwrap();
        let mut surface = MemorySurface::new();
        render_analysis(
            &mut surface,
            &response,
            &RenderContext {
                category: "borçlar_hukuku".to_string(),
                description: "Kira".to_string(),
            },
        );
        surface
    }

    #[test]
    fn test_plain_text_recommendation_lines() {
        assert_eq!(
            recommendation_lines("1. İhtarname gönderin\n\n  Tahliye davası açılabilir  "),
            vec![
                RecommendationLine::Item("1. İhtarname gönderin".to_string()),
                RecommendationLine::Paragraph("Tahliye davası açılabilir".to_string()),
            ]
        );
    }

    #[test]
    fn test_markup_recommendation_lines() {
        assert_eq!(
            recommendation_lines("<p>Birinci</p><ul><li>2. İkinci</li></ul>"),
            vec![
                RecommendationLine::Paragraph("Birinci".to_string()),
                RecommendationLine::Item("2. İkinci".to_string()),
            ]
        );
    }

    #[test]
    fn test_markdown_output() {
        let output = Formatter::new(OutputFormat::Markdown)
            .with_base_url("http://localhost:8000/")
            .format_surface(&rendered())
            .unwrap();
        assert!(output.starts_with("# Hukuki Analiz: BORÇLAR HUKUKU"));
        assert!(output.contains("- **TBK m. 315**: Temerrüt ([Kanun Metnine Git](https://mevzuat.gov.tr))"));
        assert!(output.contains("_Olay örgüsü için ilgili Yargıtay kararı bulunamadı._"));
        assert!(output.contains("- 1. İhtarname gönderin"));
        assert!(output.contains("[Belgeyi indir](http://localhost:8000/documents/123/download)"));
    }

    #[test]
    fn test_table_output() {
        colored::control::set_override(false);
        let output = Formatter::new(OutputFormat::Table).format_surface(&rendered()).unwrap();
        assert!(output.contains("BORÇLAR HUKUKU"));
        assert!(output.contains("TBK m. 315"));
        assert!(output.contains("Olay örgüsü için ilgili Yargıtay kararı bulunamadı."));
        assert!(output.contains("/documents/123/download"));
    }

    #[test]
    fn test_json_output() {
        let output = Formatter::new(OutputFormat::Json).format_surface(&rendered()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["regions"]["laws"]["entries"][0]["title"], "TBK m. 315");
        assert_eq!(value["regions"]["download_link"]["entries"][0]["href"], "/documents/123/download");
    }

    #[test]
    fn test_category_listing() {
        let output = Formatter::new(OutputFormat::Markdown).format_categories().unwrap();
        assert!(output.contains("| aile_hukuku | AİLE HUKUKU |"));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_string("Türk Borçlar Kanunu", 10), "Türk Bo...");
        assert_eq!(truncate_string("kısa", 10), "kısa");
    }
}
