use std::fmt;

use modhub_fetch::Discovery;

use crate::build::IconOutcome;

/// Counters collected while building the catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub processed: usize,
    pub accepted: usize,
    pub missing_metadata: usize,
    pub incompatible: usize,
    pub icons_written: usize,
    pub icon_write_failures: usize,
}

impl BuildStats {
    pub(crate) fn record_icon(&mut self, icon: &IconOutcome) {
        match icon {
            IconOutcome::Written(_) => self.icons_written += 1,
            IconOutcome::WriteFailed => self.icon_write_failures += 1,
            IconOutcome::Gated | IconOutcome::NotFound => {}
        }
    }
}

/// End-of-run report covering discovery and validation.
#[derive(Debug, Default, Clone)]
pub struct HarvestSummary {
    pub keyword_hits: usize,
    pub topic_hits: Vec<(String, usize)>,
    pub duplicates: usize,
    pub blacklisted: usize,
    pub failed_requests: usize,
    pub candidates: usize,
    pub build: BuildStats,
}

impl HarvestSummary {
    pub fn new(discovery: &Discovery, build: &BuildStats) -> Self {
        Self {
            keyword_hits: discovery.keyword_hits,
            topic_hits: discovery.topic_hits.clone(),
            duplicates: discovery.duplicates,
            blacklisted: discovery.blacklisted,
            failed_requests: discovery.failed_requests,
            candidates: discovery.candidates.len(),
            build: build.clone(),
        }
    }
}

impl fmt::Display for HarvestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Keyword search: {} results", self.keyword_hits)?;
        for (topic, added) in &self.topic_hits {
            writeln!(f, "Topic {topic}: {added} new")?;
        }
        writeln!(
            f,
            "Candidates: {} ({} duplicates, {} blacklisted dropped)",
            self.candidates, self.duplicates, self.blacklisted
        )?;
        if self.failed_requests > 0 {
            writeln!(f, "Failed search requests: {}", self.failed_requests)?;
        }
        writeln!(
            f,
            "Valid mods: {} (no metadata: {}, incompatible: {})",
            self.build.accepted, self.build.missing_metadata, self.build.incompatible
        )?;
        write!(f, "Icons written: {}", self.build.icons_written)?;
        if self.build.icon_write_failures > 0 {
            write!(f, " ({} failed)", self.build.icon_write_failures)?;
        }
        Ok(())
    }
}
