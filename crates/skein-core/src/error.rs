pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node ids must not be empty")]
    EmptyId,

    #[error("meta-node already exists: {id}")]
    DuplicateMetaNode { id: String },

    #[error("meta-node {meta} references unknown node: {member}")]
    UnknownMember { meta: String, member: String },

    #[error("Invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),
}
