pub mod profile;
pub mod skills;
pub mod github;
pub mod linkedin;
pub mod semantic;
pub mod scoring;
pub mod opportunity;
pub mod request;

pub use profile::*;
pub use skills::*;
pub use github::*;
pub use linkedin::*;
pub use semantic::*;
pub use scoring::*;
pub use opportunity::*;
pub use request::*;
