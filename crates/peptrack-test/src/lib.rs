//! peptrack API - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every
//! layer through one dependency.

pub mod component {
    pub use peptrack_core::*;

    pub mod db {
        pub use peptrack_db::db::*;
        pub use peptrack_db::error::*;
    }

    pub mod model {
        pub use peptrack_db::model::*;
    }

    pub mod service {
        pub use peptrack_service::*;
    }

    pub mod config {
        pub use peptrack_app::config::ConfigHandler;
        pub use peptrack_core::config::*;
    }
}

pub mod app {
    pub use peptrack_app::*;
}
