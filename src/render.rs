//! Mapping of analysis responses onto display regions.
//!
//! Rendering never fails as a whole. Each region is filled on its own and
//! any error is logged so the remaining regions still show what they can.

use log::{debug, error};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::api::client::download_href;
use crate::api::types::{Analysis, AnalysisResponse, Decision, Law, Recommendations};
use crate::category;
use crate::error::{HukukError, Result};

/// Shown in the laws list when the analysis has no laws
pub const NO_LAWS_PLACEHOLDER: &str = "Olay örgüsü için ilgili kanun maddesi bulunamadı.";
/// Shown in the decisions list when the analysis has no decisions
pub const NO_DECISIONS_PLACEHOLDER: &str = "Olay örgüsü için ilgili Yargıtay kararı bulunamadı.";
/// Shown in the recommendations region when there are none
pub const NO_RECOMMENDATIONS_PLACEHOLDER: &str = "Analiz önerileri bulunamadı.";
pub const MOCK_DATA_NOTICE: &str = "Gerçek AI analizi yerine örnek veri kullanılıyor. API yanıtı alınamadı.";
pub const AI_NOTICE: &str = "Bu analiz yapay zeka tarafından oluşturulmuştur.";

/// Named display regions of the result page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Busy indicator while a request is in flight
    Loading,
    /// Wrapper around everything below
    Result,
    Category,
    Summary,
    Notice,
    Laws,
    Decisions,
    Recommendations,
    DownloadLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Warning,
}

/// Content placed into a region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    Text {
        text: String,
    },
    /// Service-provided markup, kept as-is
    Markup {
        markup: String,
    },
    Law {
        title: String,
        content: String,
        link: Option<String>,
    },
    Decision {
        court: String,
        case_number: String,
        date: Option<String>,
        summary: String,
        link: Option<String>,
    },
    Recommendation {
        text: String,
    },
    Placeholder {
        text: String,
    },
    Notice {
        kind: NoticeKind,
        text: String,
    },
    Link {
        href: String,
    },
}

impl Entry {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::Placeholder { text: text.into() }
    }
}

impl From<&Law> for Entry {
    fn from(law: &Law) -> Self {
        Self::Law {
            title: law.title(),
            content: law.content(),
            link: law.link(),
        }
    }
}

impl From<&Decision> for Entry {
    fn from(decision: &Decision) -> Self {
        Self::Decision {
            court: decision.court(),
            case_number: decision.case_number(),
            date: decision.date(),
            summary: decision.summary(),
            link: decision.link(),
        }
    }
}

/// Display adapter the renderer writes into
pub trait Surface {
    /// Remove all content from a region
    fn clear(&mut self, region: Region) -> Result<()>;

    /// Append content to a region
    fn push(&mut self, region: Region, entry: Entry) -> Result<()>;

    fn set_visible(&mut self, region: Region, visible: bool) -> Result<()>;

    /// Replace the content of a region with a single entry
    fn replace(&mut self, region: Region, entry: Entry) -> Result<()> {
        self.clear(region)?;
        self.push(region, entry)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionState {
    pub visible: bool,
    pub entries: Vec<Entry>,
}

/// Surface that keeps region content in memory.
///
/// Regions marked missing behave like absent page elements and reject
/// every write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemorySurface {
    regions: BTreeMap<Region, RegionState>,
    #[serde(skip)]
    missing: BTreeSet<Region>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface lacking the given regions
    pub fn without(regions: &[Region]) -> Self {
        Self {
            regions: BTreeMap::new(),
            missing: regions.iter().copied().collect(),
        }
    }

    pub fn entries(&self, region: Region) -> &[Entry] {
        self.regions
            .get(&region)
            .map(|state| state.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.regions.get(&region).map(|state| state.visible).unwrap_or(false)
    }

    /// First plain text entry of a region
    pub fn text(&self, region: Region) -> Option<&str> {
        self.entries(region).iter().find_map(|entry| match entry {
            Entry::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Href of the download link, when set
    pub fn download_href(&self) -> Option<&str> {
        self.entries(Region::DownloadLink).iter().find_map(|entry| match entry {
            Entry::Link { href } => Some(href.as_str()),
            _ => None,
        })
    }

    fn region_mut(&mut self, region: Region) -> Result<&mut RegionState> {
        if self.missing.contains(&region) {
            return Err(HukukError::Render(format!("{:?} region not found", region)));
        }
        Ok(self.regions.entry(region).or_default())
    }
}

impl Surface for MemorySurface {
    fn clear(&mut self, region: Region) -> Result<()> {
        self.region_mut(region)?.entries.clear();
        Ok(())
    }

    fn push(&mut self, region: Region, entry: Entry) -> Result<()> {
        self.region_mut(region)?.entries.push(entry);
        Ok(())
    }

    fn set_visible(&mut self, region: Region, visible: bool) -> Result<()> {
        self.region_mut(region)?.visible = visible;
        Ok(())
    }
}

/// Submission details the response is shown against
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Category the user submitted
    pub category: String,
    /// Case description the user submitted
    pub description: String,
}

fn log_failure(region: Region, result: Result<()>) {
    if let Err(e) = result {
        error!("Failed to render {:?}: {}", region, e);
    }
}

/// Fill every result region from a response.
///
/// Lists are cleared first so rendering the same response twice gives the
/// same content.
pub fn render_analysis(surface: &mut dyn Surface, response: &AnalysisResponse, context: &RenderContext) {
    let empty = Analysis::default();
    let analysis = response.analysis.as_ref().unwrap_or(&empty);
    debug!(
        "Rendering analysis: {} laws, {} decisions, recommendations={}",
        analysis.relevant_laws.len(),
        analysis.relevant_decisions.len(),
        analysis.recommendations.is_some()
    );

    log_failure(Region::Category, render_category(surface, response, context));
    log_failure(Region::Summary, render_summary(surface, analysis, context));
    log_failure(Region::Notice, render_notice(surface, response));
    log_failure(Region::Laws, render_laws(surface, &analysis.relevant_laws));
    log_failure(Region::Decisions, render_decisions(surface, &analysis.relevant_decisions));
    log_failure(
        Region::Recommendations,
        render_recommendations(surface, analysis.recommendations.as_ref()),
    );
    log_failure(Region::DownloadLink, render_download_link(surface, response.document_id()));
    log_failure(Region::Result, surface.set_visible(Region::Result, true));
}

fn render_category(surface: &mut dyn Surface, response: &AnalysisResponse, context: &RenderContext) -> Result<()> {
    let code = response.reported_category().unwrap_or(&context.category);
    surface.replace(Region::Category, Entry::text(category::display_name(code)))
}

fn render_summary(surface: &mut dyn Surface, analysis: &Analysis, context: &RenderContext) -> Result<()> {
    let summary = match analysis.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(summary) => summary.to_string(),
        None => format!("Olay özeti: {}", context.description),
    };
    surface.replace(Region::Summary, Entry::text(summary))
}

fn render_notice(surface: &mut dyn Surface, response: &AnalysisResponse) -> Result<()> {
    let notice = if response.using_mock_data() {
        Entry::Notice {
            kind: NoticeKind::Warning,
            text: MOCK_DATA_NOTICE.to_string(),
        }
    } else {
        Entry::Notice {
            kind: NoticeKind::Info,
            text: AI_NOTICE.to_string(),
        }
    };
    surface.replace(Region::Notice, notice)
}

fn render_laws(surface: &mut dyn Surface, laws: &[Law]) -> Result<()> {
    surface.clear(Region::Laws)?;
    if laws.is_empty() {
        return surface.push(Region::Laws, Entry::placeholder(NO_LAWS_PLACEHOLDER));
    }
    for law in laws {
        surface.push(Region::Laws, Entry::from(law))?;
    }
    Ok(())
}

fn render_decisions(surface: &mut dyn Surface, decisions: &[Decision]) -> Result<()> {
    surface.clear(Region::Decisions)?;
    if decisions.is_empty() {
        return surface.push(Region::Decisions, Entry::placeholder(NO_DECISIONS_PLACEHOLDER));
    }
    for decision in decisions {
        surface.push(Region::Decisions, Entry::from(decision))?;
    }
    Ok(())
}

fn render_recommendations(surface: &mut dyn Surface, recommendations: Option<&Recommendations>) -> Result<()> {
    surface.clear(Region::Recommendations)?;
    match recommendations.filter(|r| !r.is_empty()) {
        None => surface.push(
            Region::Recommendations,
            Entry::placeholder(NO_RECOMMENDATIONS_PLACEHOLDER),
        ),
        Some(Recommendations::List(items)) => {
            for item in items {
                surface.push(Region::Recommendations, Entry::Recommendation { text: item.clone() })?;
            }
            Ok(())
        }
        Some(Recommendations::Text(markup)) => surface.push(
            Region::Recommendations,
            Entry::Markup {
                markup: markup.clone(),
            },
        ),
        Some(Recommendations::Other(value)) => {
            surface.push(Region::Recommendations, Entry::text(value.to_string()))
        }
    }
}

fn render_download_link(surface: &mut dyn Surface, document_id: Option<&str>) -> Result<()> {
    surface.clear(Region::DownloadLink)?;
    match document_id {
        Some(id) => {
            surface.push(Region::DownloadLink, Entry::Link { href: download_href(id) })?;
            surface.set_visible(Region::DownloadLink, true)
        }
        None => surface.set_visible(Region::DownloadLink, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn response(value: serde_json::Value) -> AnalysisResponse {
        serde_json::from_value(value).unwrap()
    }

    fn context() -> RenderContext {
        RenderContext {
            category: "borçlar_hukuku".to_string(),
            description: "Test olay".to_string(),
        }
    }

    #[test]
    fn test_empty_lists_show_placeholders() {
        let mut surface = MemorySurface::new();
        let response = response(json!({
            "id": "123",
            "analysis": {"relevant_laws": [], "relevant_decisions": [], "recommendations": "Öneri yok"}
        }));
        render_analysis(&mut surface, &response, &context());

        assert_eq!(surface.entries(Region::Laws), &[Entry::placeholder(NO_LAWS_PLACEHOLDER)]);
        assert_eq!(
            surface.entries(Region::Decisions),
            &[Entry::placeholder(NO_DECISIONS_PLACEHOLDER)]
        );
        assert_eq!(
            surface.entries(Region::Recommendations),
            &[Entry::Markup {
                markup: "Öneri yok".to_string()
            }]
        );
        assert_eq!(surface.download_href(), Some("/documents/123/download"));
        assert_eq!(surface.text(Region::Category), Some("BORÇLAR HUKUKU"));
        assert!(surface.is_visible(Region::Result));
    }

    #[test]
    fn test_recommendation_list_order() {
        let mut surface = MemorySurface::new();
        render_analysis(
            &mut surface,
            &response(json!({"analysis": {"recommendations": ["A", "B"]}})),
            &context(),
        );
        assert_eq!(
            surface.entries(Region::Recommendations),
            &[
                Entry::Recommendation { text: "A".to_string() },
                Entry::Recommendation { text: "B".to_string() },
            ]
        );
    }

    #[test]
    fn test_other_recommendations_render_as_json() {
        let mut surface = MemorySurface::new();
        render_analysis(
            &mut surface,
            &response(json!({"analysis": {"recommendations": {"a": 1}}})),
            &context(),
        );
        assert_eq!(surface.entries(Region::Recommendations), &[Entry::text(r#"{"a":1}"#)]);
    }

    #[test]
    fn test_missing_analysis_still_renders() {
        let mut surface = MemorySurface::new();
        render_analysis(&mut surface, &response(json!({})), &context());
        assert_eq!(surface.text(Region::Summary), Some("Olay özeti: Test olay"));
        assert_eq!(
            surface.entries(Region::Recommendations),
            &[Entry::placeholder(NO_RECOMMENDATIONS_PLACEHOLDER)]
        );
        assert_eq!(surface.download_href(), None);
        assert!(!surface.is_visible(Region::DownloadLink));
    }

    #[test]
    fn test_render_is_idempotent() {
        let response = response(json!({
            "id": 7,
            "analysis": {
                "summary": "Özet",
                "relevant_laws": [{"title": "TBK m. 49"}, {"name": "TBK m. 50"}],
                "relevant_decisions": [{"case_number": "2020/1"}],
                "recommendations": ["A"]
            }
        }));
        let mut surface = MemorySurface::new();
        render_analysis(&mut surface, &response, &context());
        let first = surface.clone();
        render_analysis(&mut surface, &response, &context());
        assert_eq!(surface, first);
        assert_eq!(surface.entries(Region::Laws).len(), 2);
    }

    #[test]
    fn test_law_placeholders() {
        let mut surface = MemorySurface::new();
        render_analysis(
            &mut surface,
            &response(json!({"analysis": {"relevant_laws": [{}]}})),
            &context(),
        );
        assert_eq!(
            surface.entries(Region::Laws),
            &[Entry::Law {
                title: "Kanun".to_string(),
                content: "İçerik bulunamadı".to_string(),
                link: None,
            }]
        );
    }

    #[test]
    fn test_reported_category_wins() {
        let mut surface = MemorySurface::new();
        render_analysis(
            &mut surface,
            &response(json!({"metadata": {"category": "aile_hukuku", "using_mock_data": true}})),
            &context(),
        );
        assert_eq!(surface.text(Region::Category), Some("AİLE HUKUKU"));
        assert_eq!(
            surface.entries(Region::Notice),
            &[Entry::Notice {
                kind: NoticeKind::Warning,
                text: MOCK_DATA_NOTICE.to_string()
            }]
        );
    }

    #[test]
    fn test_missing_region_does_not_stop_others() {
        let mut surface = MemorySurface::without(&[Region::Laws, Region::Category]);
        render_analysis(
            &mut surface,
            &response(json!({"id": "9", "analysis": {"relevant_decisions": [{"number": "1"}]}})),
            &context(),
        );
        assert!(surface.entries(Region::Laws).is_empty());
        assert_eq!(surface.entries(Region::Decisions).len(), 1);
        assert_eq!(surface.download_href(), Some("/documents/9/download"));
        assert!(surface.is_visible(Region::Result));
    }
}
