//! Built-in health checks for core systems

pub mod audio;
pub mod build_info;
pub mod config;
pub mod system_info;
pub mod world;

pub use audio::AudioBackendCheck;
pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use system_info::SystemInfoCheck;
pub use world::WorldCheck;
