//! Profile bundles: the fixed sets of Maven profiles that identify an
//! Oracle Tools POM as either an Apex or a database project.

use crate::error::IntrospectError;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

pub const APEX_PROFILES: &[&str] = &["apex-export", "apex-import"];

pub const DATABASE_PROFILES: &[&str] = &[
    "db-info",
    "db-install",
    "db-code-check",
    "db-test",
    "db-generate-ddl-full",
    "db-generate-ddl-incr",
];

/// Older parent POMs lack `db-info` and `db-code-check`
pub const LEGACY_DATABASE_PROFILES: &[&str] = &[
    "db-install",
    "db-test",
    "db-generate-ddl-full",
    "db-generate-ddl-incr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseVariant {
    Full,
    Legacy,
}

/// The operational mode of a POM, with its actions in fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileBundle {
    Apex,
    Database(DatabaseVariant),
}

impl ProfileBundle {
    pub fn profiles(&self) -> &'static [&'static str] {
        match self {
            ProfileBundle::Apex => APEX_PROFILES,
            ProfileBundle::Database(DatabaseVariant::Full) => DATABASE_PROFILES,
            ProfileBundle::Database(DatabaseVariant::Legacy) => LEGACY_DATABASE_PROFILES,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProfileBundle::Apex => "apex",
            ProfileBundle::Database(DatabaseVariant::Full) => "database",
            ProfileBundle::Database(DatabaseVariant::Legacy) => "database (legacy)",
        }
    }

    /// The action offered first
    pub fn default_action(&self) -> &'static str {
        self.profiles()[0]
    }

    fn is_subset_of(&self, discovered: &BTreeSet<String>) -> bool {
        self.profiles().iter().all(|p| discovered.contains(*p))
    }
}

impl fmt::Display for ProfileBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for ProfileBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.profiles())
    }
}

/// What to do when the discovered profiles cover both bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityPolicy {
    /// Apex is checked first and wins
    #[default]
    PreferApex,
    /// Both bundles matching is an error
    Reject,
}

/// Classify a discovered profile set.
///
/// Extra, unrecognized profiles are ignored; only the fixed bundles are tested,
/// Apex before database, and the full database bundle before its legacy variant.
pub fn classify(
    discovered: &BTreeSet<String>,
    policy: AmbiguityPolicy,
) -> Result<ProfileBundle, IntrospectError> {
    let database = [
        ProfileBundle::Database(DatabaseVariant::Full),
        ProfileBundle::Database(DatabaseVariant::Legacy),
    ]
    .into_iter()
    .find(|bundle| bundle.is_subset_of(discovered));

    if ProfileBundle::Apex.is_subset_of(discovered) {
        if database.is_some() && policy == AmbiguityPolicy::Reject {
            return Err(IntrospectError::AmbiguousProfiles {
                discovered: discovered.clone(),
            });
        }
        return Ok(ProfileBundle::Apex);
    }

    database.ok_or_else(|| IntrospectError::Classification {
        discovered: discovered.clone(),
        apex: to_owned(APEX_PROFILES),
        database: to_owned(DATABASE_PROFILES),
    })
}

fn to_owned(profiles: &[&str]) -> Vec<String> {
    profiles.iter().map(|p| p.to_string()).collect()
}
