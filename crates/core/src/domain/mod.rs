pub mod recommendation;
pub mod sentiment;
pub mod session;
pub mod validation;
