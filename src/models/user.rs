use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Authenticated identity from `GET /auth/me`, kept exactly as the API sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session(Value);

impl Session {
    /// None for identities that do not count as a session: null, false, 0, "".
    pub fn from_identity(identity: Value) -> Option<Self> {
        let truthy = match &identity {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        truthy.then_some(Session(identity))
    }

    pub fn user_id(&self) -> Option<i64> {
        self.0
            .get("user_id")
            .or_else(|| self.0.get("id"))
            .and_then(Value::as_i64)
    }

    pub fn identity(&self) -> &Value {
        &self.0
    }

    pub fn into_identity(self) -> Value {
        self.0
    }
}

/// `{"message": "..."}` acknowledgement returned by login/logout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthMessage {
    #[serde(default)]
    pub message: Option<String>,
}
