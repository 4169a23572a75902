//! Command implementations, one module per subcommand.

pub mod hash;
pub mod magnet;
pub mod sample;
