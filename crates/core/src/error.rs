/// A configuration error of a scrollbar.
///
/// Runtime problems (degenerate geometry, nodes that are not laid out yet)
/// never surface as errors; they degrade to a hidden thumb instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A selector did not match any node.
    #[error("no node matches the selector `{selector}`")]
    SelectorNotFound {
        /// The selector that was looked up.
        selector: String,
    },

    /// A required node was not provided.
    #[error("the scrollbar requires a {what}")]
    MissingHost {
        /// The missing piece.
        what: &'static str,
    },

    /// A setting has an invalid value.
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        /// The name of the setting.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The scrollbar was already destroyed.
    #[error("the scrollbar has been destroyed")]
    Destroyed,
}
