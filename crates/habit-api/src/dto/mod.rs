//! 请求/响应 DTO 模块

pub mod request;
pub mod response;

pub use request::{
    ChartQuery, CreateHabitRequest, LoginRequest, RegisterRequest, UpdateHabitRequest,
    UpdateProfileRequest,
};
pub use response::{ApiResponse, AuthResponse, UserPayload};
