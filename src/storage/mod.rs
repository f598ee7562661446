//! Storage backends for workspaces.

pub mod codec;
pub mod file;
pub mod memory;
pub mod traits;

pub use codec::Record;
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use traits::WorkspaceStore;
