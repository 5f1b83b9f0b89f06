//! Domain traits - Abstractions for infrastructure implementations

pub mod socket;

pub use socket::{
    Connection, ConnectionState, Connector, OutgoingMessage, ParticipantAction, Presence, Socket,
    SocketEvent,
};
