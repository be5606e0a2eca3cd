use std::sync::OnceLock;

use semver::Version;

/// Major, minor and patch numbers of this crate.
pub fn get_crate_version_mmp() -> (u64, u64, u64) {
    static VERSION: OnceLock<(u64, u64, u64)> = OnceLock::new();

    VERSION
        .get_or_init(|| match Version::parse(env!("CARGO_PKG_VERSION")) {
            Ok(version) => (version.major, version.minor, version.patch),
            Err(error) => {
                tracing::warn!(?error, "crate version parse");
                (0, 0, 0)
            }
        })
        .to_owned()
}
