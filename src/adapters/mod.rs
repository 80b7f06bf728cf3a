//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to              |
//! |------------|--------------------|--------------------------|
//! | `gpio`     | GpioPort           | ESP32 GPIO (socket pins) |
//! | `delay`    | DelayNs            | ROM busy-wait / sleep    |
//! | `hardware` | GpioPort           | `gpio`                   |
//! |            | DelayNs            | `delay`                  |
//! |            | StatusPort         | WS2812 status pixel      |
//! | `log_sink` | EventSink          | Serial log output        |

pub mod delay;
pub mod gpio;
pub mod hardware;
pub mod log_sink;
