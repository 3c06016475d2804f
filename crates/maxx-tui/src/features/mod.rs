//! Feature slices (state lives in `AppState`, logic lives here).

pub mod composer;
