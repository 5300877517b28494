//! 习惯打卡 REST 服务
//!
//! 在派生引擎（habit-core）之上提供请求层：注册/登录、习惯 CRUD、
//! 打卡、统计与图表查询。时钟只在这一层读取，作为参数传入引擎。

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
