//! Next-release version computation from a Maven package index.
//!
//! The index is consulted once. A missing artifact, an unreachable host, or
//! unreadable metadata all mean "no releases yet" (`0.0.0`); only rejected
//! credentials are an error.

use crate::error::{LessonError, Result};
use quick_xml::de::from_reader;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

const ZERO_VERSION: &str = "0.0.0";

/// Parse `MAJOR[.MINOR[.PATCH]]`, padding missing parts with zero.
///
/// Every dot-separated part must be an unsigned integer; parts past the
/// third are checked and then dropped. Anything else is `None`.
pub fn parse_lenient(s: &str) -> Option<Version> {
    let parts = s
        .trim()
        .split('.')
        .map(str::parse::<u64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;
    let part = |i: usize| parts.get(i).copied().unwrap_or(0);
    Some(Version::new(part(0), part(1), part(2)))
}

/// `None` when the bumped component would overflow.
pub fn bump_version(current: &Version, bump: Bump) -> Option<Version> {
    let next = match bump {
        Bump::Major => Version::new(current.major.checked_add(1)?, 0, 0),
        Bump::Minor => Version::new(current.major, current.minor.checked_add(1)?, 0),
        Bump::Patch => Version::new(current.major, current.minor, current.patch.checked_add(1)?),
    };
    Some(next)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bump {
    Major,
    Minor,
    #[default]
    Patch,
}

impl Bump {
    /// Case-insensitive; anything unrecognized bumps the patch number.
    pub fn from_name(name: &str) -> Bump {
        match name.trim().to_ascii_lowercase().as_str() {
            "major" => Bump::Major,
            "minor" => Bump::Minor,
            "patch" => Bump::Patch,
            other => {
                tracing::warn!(bump = other, "unknown bump type; bumping patch");
                Bump::Patch
            }
        }
    }
}

// ---------------------------------------------------------------------------
// maven-metadata.xml
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MavenMetadata {
    #[serde(default)]
    pub versioning: Option<Versioning>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Versioning {
    pub latest: Option<String>,
    pub release: Option<String>,
    #[serde(default)]
    pub versions: Versions,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Versions {
    #[serde(default, rename = "version")]
    pub items: Vec<String>,
}

impl MavenMetadata {
    pub fn parse(bytes: &[u8]) -> std::result::Result<Self, quick_xml::DeError> {
        from_reader(bytes)
    }

    /// `<release>` if present, else the last listed `<version>`.
    pub fn current_version(&self) -> Option<&str> {
        let versioning = self.versioning.as_ref()?;
        versioning
            .release
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| versioning.versions.items.last().map(String::as_str))
    }
}

// ---------------------------------------------------------------------------
// ReleaseIndex
// ---------------------------------------------------------------------------

/// Credentials for the package index, sent as HTTP Basic auth.
#[derive(Debug, Clone)]
pub struct IndexCredentials {
    pub user: String,
    pub token: String,
}

impl IndexCredentials {
    /// Both values must be present and non-empty.
    pub fn from_parts(user: Option<String>, token: Option<String>) -> Option<Self> {
        match (user, token) {
            (Some(user), Some(token)) if !user.is_empty() && !token.is_empty() => {
                Some(Self { user, token })
            }
            _ => None,
        }
    }
}

pub struct ReleaseIndex {
    client: Client,
    metadata_url: String,
}

impl ReleaseIndex {
    pub fn new(metadata_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            metadata_url: metadata_url.into(),
        })
    }

    /// Latest published version string, or `0.0.0` when there is none to find.
    pub fn current_version(&self, credentials: Option<&IndexCredentials>) -> Result<String> {
        let Some(creds) = credentials else {
            tracing::warn!("no package index credentials; assuming no prior release");
            return Ok(ZERO_VERSION.to_string());
        };

        let response = match self
            .client
            .get(&self.metadata_url)
            .basic_auth(&creds.user, Some(&creds.token))
            .send()
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "package index unreachable; assuming no prior release");
                return Ok(ZERO_VERSION.to_string());
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!("no published metadata; this is the first release");
            return Ok(ZERO_VERSION.to_string());
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LessonError::IndexAuth(status.as_u16()));
        }
        if !status.is_success() {
            tracing::warn!(%status, "unexpected package index status; assuming no prior release");
            return Ok(ZERO_VERSION.to_string());
        }

        let body = match response.bytes() {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "could not read package metadata");
                return Ok(ZERO_VERSION.to_string());
            }
        };
        match MavenMetadata::parse(&body) {
            Ok(metadata) => Ok(metadata
                .current_version()
                .map(str::to_string)
                .unwrap_or_else(|| ZERO_VERSION.to_string())),
            Err(e) => {
                tracing::warn!(error = %e, "could not parse package metadata");
                Ok(ZERO_VERSION.to_string())
            }
        }
    }

    pub fn next_version(
        &self,
        credentials: Option<&IndexCredentials>,
        bump: Bump,
    ) -> Result<Version> {
        let current = self.current_version(credentials)?;
        Ok(next_from(&current, bump))
    }
}

/// Bump `current`. A version that does not parse, or whose bumped part
/// would overflow, starts over from `0.0.0`.
pub fn next_from(current: &str, bump: Bump) -> Version {
    let Some(version) = parse_lenient(current) else {
        tracing::warn!(version = current, "invalid version format; using 0.0.0");
        return first_release(bump);
    };
    bump_version(&version, bump).unwrap_or_else(|| {
        tracing::warn!(version = current, "version component overflows; using 0.0.0");
        first_release(bump)
    })
}

/// `0.0.0` bumped once.
fn first_release(bump: Bump) -> Version {
    match bump {
        Bump::Major => Version::new(1, 0, 0),
        Bump::Minor => Version::new(0, 1, 0),
        Bump::Patch => Version::new(0, 0, 1),
    }
}
