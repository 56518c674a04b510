//! Back-office banking client: one session guard shared by every role
//! dashboard, plus typed access to the backend's role endpoints.

pub mod dashboards;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
