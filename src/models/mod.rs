pub mod documentation;
pub mod hub;

pub use documentation::Documentation;
pub use hub::{default_protocols, HubInfo, HubMethodInfo, HubParameterInfo, DEFAULT_PROTOCOLS};
