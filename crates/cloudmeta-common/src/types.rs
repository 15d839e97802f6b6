use serde::{Deserialize, Serialize};

/// Lifecycle state of a published cloud image.
///
/// States informally progress active -> deprecated -> deleted, but no
/// transition graph is enforced; only the lifecycle date ordering is
/// validated by the storage layer.
///
/// # Examples
///
/// ```
/// use cloudmeta_common::types::ImageState;
///
/// let state: ImageState = "deprecated".parse().unwrap();
/// assert_eq!(state, ImageState::Deprecated);
/// assert_eq!(state.to_string(), "deprecated");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageState {
    Active,
    Inactive,
    Deprecated,
    Deleted,
}

impl std::fmt::Display for ImageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageState::Active => write!(f, "active"),
            ImageState::Inactive => write!(f, "inactive"),
            ImageState::Deprecated => write!(f, "deprecated"),
            ImageState::Deleted => write!(f, "deleted"),
        }
    }
}

impl std::str::FromStr for ImageState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ImageState::Active),
            "inactive" => Ok(ImageState::Inactive),
            "deprecated" => Ok(ImageState::Deprecated),
            "deleted" => Ok(ImageState::Deleted),
            _ => Err(format!("unknown image state: {s}")),
        }
    }
}

/// Role of a provider server: a compute region endpoint or an update
/// (package mirror) server.
///
/// # Examples
///
/// ```
/// use cloudmeta_common::types::ServerType;
///
/// let kind: ServerType = "update".parse().unwrap();
/// assert_eq!(kind, ServerType::Update);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    Region,
    Update,
}

impl std::fmt::Display for ServerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerType::Region => write!(f, "region"),
            ServerType::Update => write!(f, "update"),
        }
    }
}

impl std::str::FromStr for ServerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "region" => Ok(ServerType::Region),
            "update" => Ok(ServerType::Update),
            _ => Err(format!("unknown server type: {s}")),
        }
    }
}
