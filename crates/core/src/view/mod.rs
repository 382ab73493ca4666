//! Pure view models derived from a [`DashboardState`](crate::dashboard::state::DashboardState)
//! snapshot. Nothing here talks to the backend.

pub mod carousel;
pub mod chart;
pub mod gauge;
pub mod panels;
pub mod render;
