// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Test profiles: the load patterns applied within each scenario.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four fixed load patterns a scenario is exercised with.
///
/// The declaration order is the campaign's execution order and is also the
/// order used for every per-profile axis in charts and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestProfile {
    /// Steady low load.
    Baseline,
    /// Gradually increasing load.
    Ramp,
    /// Sudden burst of virtual users.
    Spike,
    /// Long-running sustained load.
    Soak,
}

impl TestProfile {
    /// All profiles in execution order.
    pub const ALL: [TestProfile; 4] = [
        TestProfile::Baseline,
        TestProfile::Ramp,
        TestProfile::Spike,
        TestProfile::Soak,
    ];

    /// Directory name of this profile inside a scenario directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Ramp => "ramp",
            Self::Spike => "spike",
            Self::Soak => "soak",
        }
    }

    /// Upper-case label used on chart axes.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for TestProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a directory name is not a known profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown test profile: {0}")]
pub struct UnknownProfile(pub String);

impl FromStr for TestProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baseline" => Ok(Self::Baseline),
            "ramp" => Ok(Self::Ramp),
            "spike" => Ok(Self::Spike),
            "soak" => Ok(Self::Soak),
            other => Err(UnknownProfile(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trips_through_directory_name() {
        for profile in TestProfile::ALL {
            assert_eq!(profile.as_str().parse::<TestProfile>(), Ok(profile));
        }
    }

    #[test]
    fn test_profile_parse_is_case_insensitive() {
        assert_eq!("SPIKE".parse::<TestProfile>(), Ok(TestProfile::Spike));
        assert!("stress".parse::<TestProfile>().is_err());
    }

    #[test]
    fn test_profiles_sort_in_execution_order() {
        let mut profiles = vec![TestProfile::Soak, TestProfile::Baseline, TestProfile::Spike];
        profiles.sort();
        assert_eq!(
            profiles,
            vec![TestProfile::Baseline, TestProfile::Spike, TestProfile::Soak]
        );
    }
}
