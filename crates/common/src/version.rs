use serde::Serialize;

/// Compile-time information about the running build
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BuildInfo {
    pub build_profile: &'static str,
    pub build_features: &'static str,
    pub build_timestamp: &'static str,
    pub rust_version: &'static str,
    pub version: &'static str,
    pub package_version: &'static str,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "oxbin {} ({}) profile={} features={} built={} with {}",
            self.package_version,
            self.version,
            self.build_profile,
            self.build_features,
            self.build_timestamp,
            self.rust_version
        )
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        build_profile: env!("BUILD_PROFILE"),
        build_features: env!("BUILD_FEATURES"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        rust_version: env!("RUST_VERSION"),
        version: env!("REPO_VERSION"),
        package_version: env!("CARGO_PKG_VERSION"),
    }
}

/// Shorthand for [`build_info`] usable from dependent crates
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::version::build_info()
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build_info_is_populated() {
        let info = build_info();
        assert!(!info.build_profile.is_empty());
        assert!(!info.version.is_empty());
        assert!(info.to_string().starts_with("oxbin "));
    }
}
