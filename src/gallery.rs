pub(crate) mod presenter;
pub(crate) mod resolver;
pub(crate) mod session;

pub use presenter::{HeroPresenter, HeroState, LoadRequest, LoadToken};
pub use resolver::{ColorResolver, Resolution};
pub use session::DetailSession;
