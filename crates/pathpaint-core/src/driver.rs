//! The [`Driver`] trait implemented by back ends.

use std::error::Error;
use std::time::Duration;

use crate::grid::Frame;
use crate::messages::Msg;

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input and return every message that is
    /// available. An empty vector means the timeout elapsed.
    fn poll_msgs(&mut self, timeout: Duration) -> Result<Vec<Msg>, Box<dyn Error>>;

    /// Draw the cells in `frame`.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>>;

    /// Show a one-line status message below the board.
    fn status(&mut self, text: &str) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the screen. Must be safe to call more than once.
    fn close(&mut self);
}
