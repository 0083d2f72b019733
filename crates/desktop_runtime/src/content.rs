//! Read-only community content rendered inside windows.
//!
//! The window manager treats these records as opaque payload. The only interpretation is the
//! bounty tally reported by the terminal `status` command.

use serde::{Deserialize, Serialize};
use system_shell_contract::StatusReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to decode desktop content: {0}")]
    Decode(#[from] serde_json::Error),
}

fn default_deadline() -> String {
    "TBD".to_string()
}

fn default_bounty_status() -> String {
    "open".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounty {
    pub title: String,
    /// Prize in whole dollars.
    pub prize: u64,
    #[serde(default = "default_deadline")]
    pub deadline: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_bounty_status")]
    pub status: String,
}

impl Bounty {
    pub fn is_open(&self) -> bool {
        self.status.eq_ignore_ascii_case("open")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub badge: Option<String>,
    pub description: String,
    #[serde(default)]
    pub links: Vec<ProjectLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub rank: Option<u32>,
    pub name: String,
    pub points: u32,
    #[serde(default)]
    pub badges: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityEvent {
    pub title: String,
    pub when: String,
    #[serde(rename = "where")]
    pub location: String,
    #[serde(default)]
    pub stream_url: Option<String>,
}

/// All content lists supplied by the page at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopContent {
    pub bounties: Vec<Bounty>,
    pub projects: Vec<Project>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub events: Vec<CommunityEvent>,
    pub motd: String,
}

impl DesktopContent {
    pub fn from_json_str(raw: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Overlays bounty figures on `base`. Other fields are informational and kept as given.
    pub fn status_report(&self, base: StatusReport) -> StatusReport {
        let open = self.bounties.iter().filter(|bounty| bounty.is_open());
        let (count, total) = open.fold((0u32, 0u64), |(count, total), bounty| {
            (count.saturating_add(1), total.saturating_add(bounty.prize))
        });
        StatusReport {
            open_bounties: count,
            total_prizes: total,
            ..base
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"{
        "bounties": [
            { "title": "Fix course-scheduler API endpoints", "prize": 200, "deadline": "2025-11-20", "tags": ["Web", "Backend"] },
            { "title": "Design new merch templates", "prize": 75, "tags": ["Design"] },
            { "title": "Archived bounty", "prize": 999, "status": "closed" }
        ],
        "projects": [
            { "name": "TerrierTransit", "badge": "🏆 Code & Tell Winner", "description": "Real-time shuttle tracking",
              "links": [{ "label": "Demo", "url": "/projects/terrier-transit" }] }
        ],
        "leaderboard": [{ "rank": 1, "name": "mvoong", "points": 245, "badges": "🥇" }, { "name": "anon", "points": 3 }],
        "events": [{ "title": "Syntax & Snax", "when": "Thursday 4pm", "where": "Spark! Space" }],
        "motd": "welcome"
    }"#;

    #[test]
    fn decodes_records_with_defaults() {
        let content = DesktopContent::from_json_str(SAMPLE).expect("decode");
        assert_eq!(content.bounties[1].deadline, "TBD");
        assert!(content.bounties[1].is_open());
        assert!(!content.bounties[2].is_open());
        assert_eq!(content.leaderboard[1].rank, None);
        assert_eq!(content.events[0].location, "Spark! Space");
        assert_eq!(content.events[0].stream_url, None);
        assert_eq!(content.projects[0].links.len(), 1);
        assert_eq!(content.motd, "welcome");
    }

    #[test]
    fn status_counts_only_open_bounties() {
        let content = DesktopContent::from_json_str(SAMPLE).expect("decode");
        let report = content.status_report(StatusReport::default());
        assert_eq!(report.open_bounties, 2);
        assert_eq!(report.total_prizes, 275);
        assert_eq!(report.online_builders, StatusReport::default().online_builders);
    }

    #[test]
    fn huge_prizes_saturate_the_total() {
        let content = DesktopContent::from_json_str(
            r#"{ "bounties": [
                { "title": "a", "prize": 18446744073709551615 },
                { "title": "b", "prize": 18446744073709551615 }
            ] }"#,
        )
        .expect("decode");
        let report = content.status_report(StatusReport::default());
        assert_eq!(report.open_bounties, 2);
        assert_eq!(report.total_prizes, u64::MAX);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            DesktopContent::from_json_str("{\"bounties\": 3}"),
            Err(ContentError::Decode(_))
        ));
    }
}
