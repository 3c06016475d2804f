//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, the frame tick and
//! results coming back from spawned effects through the inbox.

use crossterm::event::Event;
use maxx_core::providers::ProviderResult;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives the spinner, notice expiry and rendering.
    Tick,
    Terminal(Event),
    /// The in-flight submission finished.
    SubmitFinished(ProviderResult<String>),
}
