//! Connectors let Othello be played against "the outside world":
//! a person at a terminal, another program, or a random mover.

mod connector;
mod random;
mod text;

pub use connector::{Connector, ConnectorError};
pub use random::RandomConnector;
pub use text::TextConnector;
