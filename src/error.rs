// Hard failures only. Every variant states *where* things went wrong.
// Interactive operations (selection, extraction, brightness) never error,
// they degrade to a no-op or a clipped/empty result instead.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String),

    #[error("window update error: {0}")]
    WindowUpdate(String),

    #[error("image load error ({path}): {reason}")]
    ImageLoad { path: String, reason: String },

    #[error("no image selected")]
    NoImageSelected,
}
