//! The shared model contract and the fetch entry points built on it.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::http::Requester;

/// The raw JSON object received from Discord for one resource.
pub type Payload = serde_json::Map<String, Value>;

/// A typed object built from a Discord payload.
///
/// Construction is driven by serde: required fields are plain types and
/// fail with [`ModelError::Payload`] when absent, optional fields are
/// `Option`s that default to `None`.
pub trait DiscordModel: Sized + Serialize + DeserializeOwned {
    /// Human-readable model name used in errors and logs.
    const NAME: &'static str;

    /// Build the model from a payload.
    fn from_payload(payload: Payload) -> Result<Self, ModelError> {
        serde_json::from_value(Value::Object(payload)).map_err(|source| ModelError::Payload {
            model: Self::NAME,
            source,
        })
    }

    /// Build the model from any JSON value, which must be an object.
    fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(payload) => Self::from_payload(payload),
            _ => Err(ModelError::NotAnObject { model: Self::NAME }),
        }
    }

    /// Build one model per element of a JSON array, keeping array order.
    ///
    /// The first invalid element fails the whole batch.
    fn from_array(value: Value) -> Result<Vec<Self>, ModelError> {
        match value {
            Value::Array(items) => items.into_iter().map(Self::from_value).collect(),
            _ => Err(ModelError::NotAnArray { model: Self::NAME }),
        }
    }

    /// The model as a JSON object. Absent optional fields are left out.
    fn to_json(&self) -> Payload {
        match serde_json::to_value(self) {
            Ok(Value::Object(payload)) => payload,
            _ => Payload::new(),
        }
    }
}

/// A model that a fixed REST route returns directly.
pub trait Fetchable: DiscordModel {
    /// Relative route that returns this model, e.g. `/users/@me`.
    const ROUTE: &'static str;

    /// Whether [`Self::ROUTE`] returns a JSON array of models.
    const MANY: bool;
}

/// GET [`Fetchable::ROUTE`] and build a single model.
pub async fn fetch_one<M, R>(requester: &R) -> Result<M>
where
    M: Fetchable,
    R: Requester + ?Sized,
{
    debug_assert!(!M::MANY, "{} is a list route", M::ROUTE);
    let value = requester.get_json(M::ROUTE).await?;
    let model = M::from_value(value)?;
    debug!(model = M::NAME, route = M::ROUTE, "fetched");
    Ok(model)
}

/// GET [`Fetchable::ROUTE`] and build one model per array element.
pub async fn fetch_many<M, R>(requester: &R) -> Result<Vec<M>>
where
    M: Fetchable,
    R: Requester + ?Sized,
{
    debug_assert!(M::MANY, "{} is a single-resource route", M::ROUTE);
    let value = requester.get_json(M::ROUTE).await?;
    let models = M::from_array(value)?;
    debug!(
        model = M::NAME,
        route = M::ROUTE,
        count = models.len(),
        "fetched"
    );
    Ok(models)
}
