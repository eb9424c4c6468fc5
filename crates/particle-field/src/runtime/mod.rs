pub mod run_loop;
pub mod runner;

pub use run_loop::{FrameHandle, Host, HostEvent, LoopState, RunLoop, Subscription};
pub use runner::FieldRunner;
