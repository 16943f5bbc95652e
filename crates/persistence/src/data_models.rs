// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs returned by the persistence layer.

/// A unit credential row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitData {
    pub unit_id: i64,
    pub unit_code: String,
    pub display_name: String,
    pub secret_hash: String,
    pub is_admin: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub unit_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}
