pub mod formatter;

pub use formatter::Formatter;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::progress::{messages, LoadingIndicator, ProgressManager};
use crate::render::{Entry, MemorySurface, Region, Surface};

/// Format a rendered result page based on the specified format
pub fn format_surface(surface: &MemorySurface, format: OutputFormat, base_url: Option<&str>) -> Result<String> {
    let formatter = match base_url {
        Some(base) => Formatter::new(format).with_base_url(base),
        None => Formatter::new(format),
    };
    formatter.format_surface(surface)
}

/// Surface for the terminal: keeps content in memory and turns the loading
/// region into a spinner
pub struct TerminalSurface {
    inner: MemorySurface,
    progress: ProgressManager,
    indicator: Option<LoadingIndicator>,
    loading_message: String,
}

impl TerminalSurface {
    pub fn new(progress: ProgressManager) -> Self {
        Self {
            inner: MemorySurface::new(),
            progress,
            indicator: None,
            loading_message: messages::GENERATING.to_string(),
        }
    }

    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    pub fn content(&self) -> &MemorySurface {
        &self.inner
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self, region: Region) -> Result<()> {
        self.inner.clear(region)
    }

    fn push(&mut self, region: Region, entry: Entry) -> Result<()> {
        self.inner.push(region, entry)
    }

    fn set_visible(&mut self, region: Region, visible: bool) -> Result<()> {
        if region == Region::Loading {
            match (visible, self.indicator.take()) {
                (true, None) => {
                    self.indicator = Some(LoadingIndicator::start(&self.progress, &self.loading_message));
                }
                (true, Some(running)) => self.indicator = Some(running),
                (false, Some(running)) => running.finish_and_clear(),
                (false, None) => {}
            }
        }
        self.inner.set_visible(region, visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_toggle_without_terminal() {
        let mut surface = TerminalSurface::new(ProgressManager::new(true, false));
        surface.set_visible(Region::Loading, true).unwrap();
        assert!(surface.content().is_visible(Region::Loading));
        surface.set_visible(Region::Loading, false).unwrap();
        assert!(!surface.content().is_visible(Region::Loading));
        assert!(surface.indicator.is_none());
    }
}
