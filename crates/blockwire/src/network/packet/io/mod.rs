mod reader;
mod writer;

pub use reader::{PacketReader, is_recoverable};
pub use writer::PacketWriter;
