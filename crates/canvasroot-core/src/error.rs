/// Contract violations raised by the mutation layer.
///
/// Benign races (inserting before a sibling that is gone, removing a child
/// that was never attached) are not errors and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    #[error("canvas host does not support {operation}")]
    Unsupported { operation: &'static str },
    #[error("unknown shape type `{0}`")]
    UnknownShapeType(String),
}
