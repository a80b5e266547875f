use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

use crate::routes::RouteTable;
use crate::session::Session;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub session: Option<Session>,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            workspace: None,
            db: None,
            session: None,
            routes,
        }
    }
}
