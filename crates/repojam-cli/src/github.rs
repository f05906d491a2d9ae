//! GitHub commit source.
//!
//! Fetches the commit list endpoint and maps it into [`Commit`] records:
//! short hash, first message line, author name, author-local timestamp, and
//! a files-changed count (the list endpoint omits stats, so a hash-derived
//! estimate stands in; it only feeds musical heuristics).

use serde::Deserialize;
use tracing::{debug, info};

use repojam_spec::{Commit, CommitSource, SourceError};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "repojam";

/// [`CommitSource`] backed by the GitHub REST API.
pub struct GithubCommitSource {
    agent: ureq::Agent,
    api_base: String,
}

impl Default for GithubCommitSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubCommitSource {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Points the source at a different API root (test servers, mirrors).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl CommitSource for GithubCommitSource {
    fn fetch(&self, owner: &str, repo: &str, limit: usize) -> Result<Vec<Commit>, SourceError> {
        let url = format!("{}/repos/{}/{}/commits", self.api_base, owner, repo);
        info!(owner, repo, limit, "fetching commits");

        let response = self
            .agent
            .get(&url)
            .set("User-Agent", USER_AGENT)
            .query("per_page", &limit.to_string())
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(404, _) => SourceError::NotFound {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                },
                ureq::Error::Status(403, _) => SourceError::RateLimited,
                ureq::Error::Status(code, _) => {
                    SourceError::Http(format!("GitHub API error: {code}"))
                }
                other => SourceError::Http(other.to_string()),
            })?;

        let raw: Vec<ApiCommit> = response
            .into_json()
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        debug!(count = raw.len(), "parsed commit payload");
        raw.into_iter().map(Commit::try_from).collect()
    }
}

#[derive(Debug, Deserialize)]
struct ApiCommit {
    sha: String,
    commit: ApiCommitDetail,
    stats: Option<ApiStats>,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetail {
    message: String,
    author: Option<ApiAuthor>,
}

#[derive(Debug, Deserialize)]
struct ApiAuthor {
    name: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct ApiStats {
    total: u32,
}

impl TryFrom<ApiCommit> for Commit {
    type Error = SourceError;

    fn try_from(raw: ApiCommit) -> Result<Self, SourceError> {
        let author = raw
            .commit
            .author
            .ok_or_else(|| SourceError::Malformed(format!("commit {} has no author", raw.sha)))?;

        let timestamp = parse_local_timestamp(&author.date).ok_or_else(|| {
            SourceError::Malformed(format!("commit {} has unparseable date {}", raw.sha, author.date))
        })?;

        let short = raw.sha.get(..7).unwrap_or(&raw.sha).to_string();
        let first_line = raw
            .commit
            .message
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        let files_changed = raw
            .stats
            .map(|s| s.total)
            .unwrap_or_else(|| estimate_files_changed(&raw.sha));

        Ok(Commit::new(short, first_line, author.name, timestamp, files_changed))
    }
}

/// Deterministic stand-in for a files-changed count, in 1..=10.
///
/// The list endpoint omits per-commit stats and fetching each commit
/// individually would burn the rate limit, so the hash seeds a small
/// plausible number instead.
fn estimate_files_changed(sha: &str) -> u32 {
    let prefix = sha
        .get(..6)
        .and_then(|s| u32::from_str_radix(s, 16).ok())
        .unwrap_or(0);
    prefix % 10 + 1
}

/// Parses an ISO-8601 timestamp into author-local epoch seconds.
///
/// The civil fields (date and clock) are read as-is and the trailing zone
/// designator is dropped: the result is "seconds since epoch as if the
/// author's wall clock were UTC", which is exactly what the hour-of-day
/// heuristics want. Fractional seconds are ignored.
fn parse_local_timestamp(iso: &str) -> Option<i64> {
    let (date, rest) = iso.split_once('T')?;

    let mut parts = date.splitn(3, '-');
    let year: i64 = parts.next()?.parse().ok()?;
    let month: i64 = parts.next()?.parse().ok()?;
    let day: i64 = parts.next()?.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    // Clock portion ends at the zone designator or fraction
    let clock_len = rest
        .find(|c: char| matches!(c, 'Z' | 'z' | '+' | '-' | '.'))
        .unwrap_or(rest.len());
    let mut clock = rest[..clock_len].splitn(3, ':');
    let hour: i64 = clock.next()?.parse().ok()?;
    let minute: i64 = clock.next()?.parse().ok()?;
    let second: i64 = clock.next().unwrap_or("0").parse().ok()?;
    if hour > 23 || minute > 59 || second > 60 {
        return None;
    }

    Some(days_from_civil(year, month, day) * 86_400 + hour * 3_600 + minute * 60 + second)
}

/// Days since 1970-01-01 for a proleptic Gregorian civil date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = if year >= 0 { year } else { year - 399 } / 400;
    let year_of_era = year - era * 400;
    let day_of_year = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}
