pub mod auth_service;
pub use auth_service::{AuthError, AuthService, LoginResult, UserInfo};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod queue_service;
pub use queue_service::{QueueError, QueueService, Ticket, format_ticket};

pub mod queue_service_impl;
pub use queue_service_impl::SeaOrmQueueService;
