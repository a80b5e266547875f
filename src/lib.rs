//! Portal context and route translation for the multi-portal school
//! platform: which portal an operator is acting as, how a location in one
//! portal maps to another, and the breadcrumb trail for a location.

pub mod backup;
pub mod breadcrumbs;
pub mod context;
pub mod db;
pub mod embed;
pub mod error;
pub mod ipc;
pub mod labels;
pub mod navigation;
pub mod portal;
pub mod routes;
pub mod session;
pub mod switch;
