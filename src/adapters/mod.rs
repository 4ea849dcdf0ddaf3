//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements       | Connects to                    |
//! |----------------|------------------|--------------------------------|
//! | `log_sink`     | ReportSink       | Serial / stderr log output     |
//! | `replay_gnss`  | PositioningPort  | Scripted fixes and events      |
//! | `replay_modem` | ModemPort        | Scripted URC sequence          |

pub mod log_sink;
pub mod replay_gnss;
pub mod replay_modem;
