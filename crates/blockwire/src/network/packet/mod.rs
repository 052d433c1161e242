pub mod io;

pub use io::{PacketReader, PacketWriter};
