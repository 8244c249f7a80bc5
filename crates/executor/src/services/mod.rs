pub mod report_service;
pub mod webhook_service;
