use std::pin::Pin;

use crate::outcome::OutcomeMessage;

/// A boxed async stream.
pub type BoxStream<'a, T> = Pin<Box<dyn futures_core::Stream<Item = T> + Send + 'a>>;

/// What a tool invocation hands back to the host: a one-shot lazy stream
/// that yields exactly one [`OutcomeMessage`] and then ends.
pub type OutcomeStream = BoxStream<'static, OutcomeMessage>;
