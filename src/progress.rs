use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::time::Duration;

/// Progress indicator manager
pub struct ProgressManager {
    enabled: bool,
    verbose: bool,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(quiet: bool, verbose: bool) -> Self {
        // Only enable progress if we're in a terminal and not in quiet mode
        let enabled = !quiet && io::stderr().is_terminal();

        Self { enabled, verbose }
    }

    /// Create a spinner for a pending request
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Some(pb)
    }

    /// Show a simple message (for verbose mode)
    pub fn show_message(&self, message: &str) {
        if self.verbose && self.enabled {
            eprintln!("🔍 {}", message);
        }
    }

    /// Check if progress is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Loading indicator shown while a request is in flight
pub struct LoadingIndicator {
    spinner: Option<ProgressBar>,
}

impl LoadingIndicator {
    pub fn start(manager: &ProgressManager, message: &str) -> Self {
        manager.show_message(message);
        Self {
            spinner: manager.create_spinner(message),
        }
    }

    /// Update the progress message
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.set_message(message.to_string());
        }
    }

    /// Finish and clear the progress
    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.spinner {
            pb.finish_and_clear();
        }
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        if let Some(ref pb) = self.spinner {
            pb.finish_and_clear();
        }
    }
}

/// Progress messages for different operations
pub mod messages {
    pub const GENERATING: &str = "Belge oluşturuluyor ve hukuki analiz yapılıyor...";
    pub const DOWNLOADING: &str = "Belge indiriliyor...";

    pub fn generating_template(template_name: &str) -> String {
        format!("'{}' belgesi oluşturuluyor...", template_name)
    }
}
