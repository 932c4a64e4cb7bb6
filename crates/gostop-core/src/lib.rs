#![deny(warnings)]
pub mod game;
pub mod model;
pub mod rules;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "gostop"
    }

    pub const fn codename() -> &'static str {
        "Matgo"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
