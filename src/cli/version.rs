//! Build metadata for `--version`, emitted by `build.rs` through vergen.

use std::sync::LazyLock;

const UNKNOWN: &str = "unknown";

static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{}\ncommit: {}\nbuilt: {}\nrustc: {}\ntarget: {}",
        env!("CARGO_PKG_VERSION"),
        git_description(),
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or(UNKNOWN),
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or(UNKNOWN),
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or(UNKNOWN),
    )
});

fn git_description() -> &'static str {
    option_env!("VERGEN_GIT_DESCRIBE")
        .filter(|describe| *describe != UNKNOWN)
        .or(option_env!("VERGEN_GIT_SHA"))
        .unwrap_or(UNKNOWN)
}

pub fn long_version() -> &'static str {
    LONG_VERSION.as_str()
}
