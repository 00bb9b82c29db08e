use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::DesignError;

/// Outcome of every backend action: `{success: true, data}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<T> {
    Success { data: T },
    Failure { error: String },
}

impl<T> ActionResult<T> {
    pub fn success(data: T) -> Self {
        ActionResult::Success { data }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ActionResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ActionResult::Success { data } => Some(data),
            ActionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionResult::Success { .. } => None,
            ActionResult::Failure { error } => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResult<U> {
        match self {
            ActionResult::Success { data } => ActionResult::Success { data: f(data) },
            ActionResult::Failure { error } => ActionResult::Failure { error },
        }
    }

    /// Back into a `Result`, for callers that want `?`. The error message is kept verbatim.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ActionResult::Success { data } => Ok(data),
            ActionResult::Failure { error } => Err(error),
        }
    }

    pub fn into_design_result(self) -> crate::error::Result<T> {
        self.into_result().map_err(DesignError::Action)
    }
}

impl<T> From<crate::error::Result<T>> for ActionResult<T> {
    fn from(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(data) => ActionResult::Success { data },
            Err(e) => ActionResult::Failure {
                error: failure_message(&e),
            },
        }
    }
}

fn failure_message(error: &DesignError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        "An unknown error occurred.".to_string()
    } else {
        message
    }
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ActionResult", 2)?;
        match self {
            ActionResult::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            ActionResult::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawActionResult<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ActionResult<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawActionResult::<T>::deserialize(deserializer)?;
        match (raw.success, raw.data, raw.error) {
            (true, Some(data), None) => Ok(ActionResult::Success { data }),
            (false, None, Some(error)) => Ok(ActionResult::Failure { error }),
            (true, _, _) => Err(D::Error::custom(
                "successful result must carry data and no error",
            )),
            (false, _, _) => Err(D::Error::custom(
                "failed result must carry an error and no data",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_tagged_shape() {
        let ok: ActionResult<Vec<String>> = ActionResult::success(vec!["a.png".into()]);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"success": true, "data": ["a.png"]})
        );

        let failed: ActionResult<Vec<String>> = ActionResult::failure("boom");
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"success": false, "error": "boom"})
        );
    }

    #[test]
    fn rejects_mismatched_tag() {
        let both = json!({"success": true, "data": "x", "error": "y"});
        assert!(serde_json::from_value::<ActionResult<String>>(both).is_err());

        let missing = json!({"success": false});
        assert!(serde_json::from_value::<ActionResult<String>>(missing).is_err());

        let parsed: ActionResult<String> =
            serde_json::from_value(json!({"success": false, "error": "nope"})).unwrap();
        assert_eq!(parsed.error(), Some("nope"));
    }

    #[test]
    fn converts_errors_into_failures() {
        let result: ActionResult<u8> = Err(DesignError::Backend {
            status: 502,
            body: "bad gateway".into(),
        })
        .into();
        assert!(!result.is_success());
        let error = result.error().unwrap();
        assert!(error.contains("502") && error.contains("bad gateway"));

        let blank: ActionResult<u8> = Err(DesignError::Unknown(String::new())).into();
        assert_eq!(blank.error(), Some("An unknown error occurred."));
    }

    #[test]
    fn map_keeps_failures() {
        let ok = ActionResult::success(2).map(|n| n * 10);
        assert_eq!(ok.data(), Some(&20));

        let failed: ActionResult<i32> = ActionResult::failure("x");
        assert_eq!(failed.map(|n| n * 10).into_result(), Err("x".to_string()));
    }
}
