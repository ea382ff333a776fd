pub mod engine;
pub mod loader;
pub mod placer;
pub mod provisioner;
pub mod report;
pub mod resolver;
pub mod transform;
pub mod validator;

pub use crate::domain::model::{NameEntry, PlacementResult, Report, ResolvedFile};
pub use crate::domain::ports::{ConfigProvider, Document, Host, Storage};
pub use crate::utils::error::Result;
