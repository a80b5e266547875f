pub mod audit;
pub mod backup;
pub mod breadcrumbs;
pub mod core;
pub mod embed;
pub mod labels;
pub mod navigation;
pub mod portal;
pub mod routes;
pub mod setup;
