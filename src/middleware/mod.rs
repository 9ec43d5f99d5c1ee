pub mod main_middleware;
pub mod rate_limit;
