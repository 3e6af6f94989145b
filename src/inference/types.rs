/// Represents a chunk of streamed content from the model.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamChunk {
    /// A piece of assistant text, in arrival order.
    Content(String),
    /// The provider saw the end-of-stream marker.
    Completed,
}
