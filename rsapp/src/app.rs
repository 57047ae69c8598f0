// SPDX-License-Identifier: GPL-3.0-or-later

//! Build-time identity of the application.

/// Name, version and links of the application, fixed at compile time.
///
/// Usually created with [`app_info!`](crate::app_info) from inside the binary crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppInfo {
    /// Name shown in the banner, the version line and the help page title.
    pub name: &'static str,

    /// Semantic version string.
    pub version: &'static str,

    /// One line description shown under the help page title.
    pub description: &'static str,

    /// Project URL shown in the banner.
    pub homepage: &'static str,
}

impl AppInfo {
    /// Prefix for environment variables, see [`logging::env_var`](crate::logging::env_var).
    ///
    /// `rsapp` becomes `RSAPP`, `my-app` becomes `MY_APP`.
    pub fn env_prefix(&self) -> String {
        self.name.to_uppercase().replace('-', "_")
    }
}

/// Builds an [`AppInfo`] from the Cargo metadata of the binary that invokes it.
///
/// Must be expanded in a binary target, since the name is taken from `CARGO_BIN_NAME`.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::app::AppInfo {
            name: env!("CARGO_BIN_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            homepage: env!("CARGO_PKG_REPOSITORY"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &'static str) -> AppInfo {
        AppInfo {
            name,
            version: "0.0.0",
            description: "",
            homepage: "",
        }
    }

    #[test]
    fn env_prefix_is_shouted_name() {
        assert_eq!(info("rsapp").env_prefix(), "RSAPP");
        assert_eq!(info("my-app").env_prefix(), "MY_APP");
    }
}
