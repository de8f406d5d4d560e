// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Passive status line shown over the map

use chrono::Local;
use std::fmt;

/// Text telling the user what to do next, plus the last reported error
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    text: String,
    error: Option<String>,
    last_synced: Option<String>,
}

impl StatusLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the last load completed (formatted time string for display)
    pub fn last_synced(&self) -> Option<&str> {
        self.last_synced.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Show an error until the next one replaces it or it is cleared
    pub fn report(&mut self, error: impl fmt::Display) {
        let message = error.to_string();
        tracing::error!("{}", message);
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn mark_synced(&mut self) {
        self.last_synced = Some(Local::now().format("%I:%M %p").to_string());
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)?;
        if let Some(error) = &self.error {
            write!(f, " [error: {error}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_keeps_text() {
        let mut status = StatusLine::new("Select geometries by clicking on them.");
        status.report("transport failure: timed out");

        assert_eq!(status.text(), "Select geometries by clicking on them.");
        assert_eq!(status.error(), Some("transport failure: timed out"));
        assert!(status.to_string().ends_with("[error: transport failure: timed out]"));

        status.clear_error();
        assert!(status.error().is_none());
    }

    #[test]
    fn mark_synced_records_time() {
        let mut status = StatusLine::default();
        assert!(status.last_synced().is_none());
        status.mark_synced();
        assert!(status.last_synced().is_some());
    }
}
