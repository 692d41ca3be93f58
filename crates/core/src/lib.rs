pub mod content_type;
pub mod path;
pub mod rewrite;

pub use content_type::{
    ASSET_CACHE_CONTROL, DEFAULT_CONTENT_TYPE, HTML_CONTENT_TYPE, ROOT_CACHE_CONTROL,
    content_type_for,
};
pub use path::{AssetPath, DEFAULT_KEY_PREFIX, PathError, RepoId, StorageKey};
pub use rewrite::{RewriteStrategy, UnknownStrategy, rewrite_root_document};
