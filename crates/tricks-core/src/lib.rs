#![deny(warnings)]
pub mod error;
pub mod game;
pub mod model;

pub use error::TrickError;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "tricks"
    }

    pub const fn codename() -> &'static str {
        "Twenty-One & Sixty-Three"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "tricks");
        assert_eq!(AppInfo::codename(), "Twenty-One & Sixty-Three");
        assert!(!AppInfo::version().is_empty());
    }
}
