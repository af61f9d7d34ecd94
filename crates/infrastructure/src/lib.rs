pub mod in_memory_channel;

pub use in_memory_channel::MemoryChannel;
