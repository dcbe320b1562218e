// src/pipeline/mod.rs

//! What happens once the engine decides the watched file changed.
//!
//! The runtime talks to a [`ChangeHandler`] instead of calling the predictor
//! directly. Production code uses [`InferencePipeline`]; tests plug in a
//! recording handler.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::errors::Result;

pub mod inference;

pub use inference::InferencePipeline;

/// Callback invoked once per distinct change of the watched file.
///
/// Calls never overlap: the runtime awaits each one before reading the next
/// event. An `Err` is logged by the runtime and does not stop watching.
pub trait ChangeHandler: Send {
    fn on_change<'a>(
        &'a mut self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}
