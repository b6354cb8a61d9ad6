mod floatchat_api;

pub use floatchat_api::*;
