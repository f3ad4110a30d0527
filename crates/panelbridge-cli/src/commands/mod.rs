pub mod debug;

pub use debug::DebugCommand;
pub use test::TestCommand;
