pub mod connection;
pub mod packet;

pub use connection::{Connection, ConnectionOptions};
pub use packet::{PacketReader, PacketWriter};
