// OneBot v11 host
//
// The bot framework dials in over a reverse websocket, pushes chat events,
// and receives `send_forward_msg` actions carrying leaderboard text.

pub use commands::RankCommandHandler;
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use handler::websocket_handler;
pub use messages::{InboundFrame, OneBotAction, OneBotEvent};
pub use socket::{Connection, MessageHandler, SocketError, SocketWrapper};

mod commands;
mod connection_manager;
pub mod handler;
pub mod messages;
mod socket;
