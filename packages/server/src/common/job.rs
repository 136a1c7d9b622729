// Normalized job posting types shared by the board adapters and the sync engine

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A posting normalized from any board.
///
/// `link` is always absolute; adapters rewrite relative hrefs before
/// constructing a `Job`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub location: String,
    pub link: String,
}

impl Job {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            link: link.into(),
        }
    }

    /// Dedup key for this posting.
    pub fn job_id(&self) -> JobId {
        JobId::from_link(&self.link)
    }
}

/// One unit of sync work: a company slug on a given board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSource {
    pub company: String,
    pub platform: String,
}

impl JobSource {
    pub fn new(company: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            platform: platform.into(),
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.company, self.platform)
    }
}

/// Deterministic identifier derived from a job link.
///
/// The last non-empty path segment of the link; query string and fragment
/// never contribute. A link that does not parse as an absolute URL, or whose
/// path is empty, yields an empty id. Providers expose no stable identifier
/// in the normalized shape, so this is the only key the sink can dedup on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn from_link(link: &str) -> Self {
        let segment = Url::parse(link.trim()).ok().and_then(|url| {
            url.path_segments()?
                .rev()
                .find(|s| !s.is_empty())
                .map(str::to_string)
        });

        JobId(segment.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
