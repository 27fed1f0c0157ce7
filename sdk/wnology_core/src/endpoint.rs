//! Declarative endpoint tables and the request marshaling engine.
//!
//! Every Wnology API operation is described by a static [`EndpointSpec`]:
//! an HTTP method, a URI template, and a table of parameter definitions,
//! each tagged with the request bucket it lands in. [`build_request`] turns
//! a spec plus a bag of named parameter values into a [`RequestDescriptor`]
//! ready for [`Client::request`](crate::client::Client::request).
//!
//! The marshaling rules are uniform across all resources:
//!
//! - path parameters are substituted into the URI template and
//!   percent-encoded;
//! - supplied query and header parameters are copied into their bucket
//!   unchanged, except *structured* query parameters, which are serialized
//!   to JSON text;
//! - absent optional parameters are simply omitted from their bucket;
//! - the response-shape flags `_actions`, `_links`, and `_embedded` are
//!   seeded with their defaults on every request and may be overridden per
//!   call, including explicitly to `false`.
//!
//! # Examples
//!
//! ```rust
//! use wnology_core::endpoint::{
//!     build_request, EndpointSpec, Method, ParamDef, Target,
//! };
//!
//! const GET_WIDGET: EndpointSpec = EndpointSpec {
//!     method: Method::GET,
//!     template: "/widgets/{widgetId}",
//!     params: &[
//!         ParamDef::new("widgetId", Target::Path),
//!         ParamDef::new("page", Target::Query),
//!     ],
//! };
//!
//! let mut bag = serde_json::Map::new();
//! bag.insert("widgetId".into(), "w-1".into());
//!
//! let request = build_request(&GET_WIDGET, bag)?;
//! assert_eq!(request.path, "/widgets/w-1");
//! # Ok::<(), wnology_core::error::WnologyError>(())
//! ```

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::ser::Error as _;
use serde_json::{Map, Value};

use crate::error::{WnologyError, WnologyResult};

pub use reqwest::Method;

/// Named parameter values supplied for one call.
///
/// Produced by serializing a resource module's params struct; optional
/// fields that were not set do not appear in the bag.
pub type ParamBag = Map<String, Value>;

// ---------------------------------------------------------------------------
// Endpoint tables
// ---------------------------------------------------------------------------

/// The request bucket a parameter is marshaled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Substituted into the URI template.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as an HTTP header.
    Header,
    /// Sent as the JSON request body.
    Body,
}

/// One parameter an endpoint accepts.
#[derive(Debug, Clone, Copy)]
pub struct ParamDef {
    /// Wire name of the parameter.
    pub name: &'static str,
    /// Bucket the parameter is marshaled into.
    pub target: Target,
    /// Structured values are serialized to JSON text before placement in
    /// the query bucket.
    pub structured: bool,
}

impl ParamDef {
    /// A plain parameter bound for `target`.
    pub const fn new(name: &'static str, target: Target) -> Self {
        Self {
            name,
            target,
            structured: false,
        }
    }

    /// A structured query parameter, serialized to JSON text.
    pub const fn structured(name: &'static str) -> Self {
        Self {
            name,
            target: Target::Query,
            structured: true,
        }
    }
}

/// Static description of one API operation's shape.
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    /// HTTP method.
    pub method: Method,
    /// URI template with `{variable}` path parameters.
    pub template: &'static str,
    /// Parameters the operation accepts, in wire order.
    pub params: &'static [ParamDef],
}

// ---------------------------------------------------------------------------
// Response shaping
// ---------------------------------------------------------------------------

/// Response-shaping flags attached to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseShape {
    /// Return resource actions in the response (`_actions`).
    pub actions: bool,
    /// Return resource links in the response (`_links`).
    pub links: bool,
    /// Return embedded resources in the response (`_embedded`).
    pub embedded: bool,
}

impl Default for ResponseShape {
    fn default() -> Self {
        Self {
            actions: false,
            links: true,
            embedded: true,
        }
    }
}

impl ResponseShape {
    /// Seed the flags into a query bucket. Caller-supplied values override
    /// these through the normal parameter routing.
    fn seed(self, query: &mut BTreeMap<String, Value>) {
        query.insert("_actions".to_string(), Value::Bool(self.actions));
        query.insert("_links".to_string(), Value::Bool(self.links));
        query.insert("_embedded".to_string(), Value::Bool(self.embedded));
    }
}

// ---------------------------------------------------------------------------
// Request descriptors
// ---------------------------------------------------------------------------

/// A fully resolved request: method, expanded path, and per-bucket
/// parameter maps. Consumed by [`Client::request`](crate::client::Client::request);
/// nothing here performs I/O.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Expanded, percent-encoded path relative to the client's base URL.
    pub path: String,
    /// Query parameters. Values keep their JSON type until the transport
    /// renders them.
    pub query: BTreeMap<String, Value>,
    /// Header values, copied verbatim.
    pub headers: BTreeMap<String, String>,
    /// JSON request body, when the operation carries one.
    pub body: Option<Value>,
}

// ---------------------------------------------------------------------------
// Marshaling
// ---------------------------------------------------------------------------

/// Serialize a params struct into a [`ParamBag`].
///
/// Fields the struct skipped during serialization (unset optionals) do not
/// appear in the bag.
pub fn to_param_bag<T: serde::Serialize>(params: &T) -> WnologyResult<ParamBag> {
    match serde_json::to_value(params)? {
        Value::Object(bag) => Ok(bag),
        Value::Null => Ok(Map::new()),
        other => Err(serde_json::Error::custom(format!(
            "params must serialize to a JSON object, got {other}"
        ))
        .into()),
    }
}

/// Build a [`RequestDescriptor`] from an endpoint spec and a parameter bag.
///
/// Deterministic and side-effect free. Parameters absent from the bag are
/// omitted from their bucket; bag entries not declared in the spec are
/// ignored. No validation or type coercion happens here beyond requiring
/// every path-template variable to be present.
///
/// # Errors
///
/// Returns [`WnologyError::MissingPathParam`] if a template variable has no
/// supplied value, rather than expanding a malformed URL.
pub fn build_request(spec: &EndpointSpec, mut params: ParamBag) -> WnologyResult<RequestDescriptor> {
    let mut path_params: BTreeMap<&str, String> = BTreeMap::new();
    let mut query: BTreeMap<String, Value> = BTreeMap::new();
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    let mut body = None;

    ResponseShape::default().seed(&mut query);

    for def in spec.params {
        let Some(value) = params.remove(def.name) else {
            continue;
        };
        match def.target {
            Target::Path => {
                path_params.insert(def.name, scalar_text(&value));
            }
            Target::Query => {
                let value = if def.structured {
                    Value::String(serde_json::to_string(&value)?)
                } else {
                    value
                };
                query.insert(def.name.to_string(), value);
            }
            Target::Header => {
                headers.insert(def.name.to_string(), scalar_text(&value));
            }
            Target::Body => {
                body = Some(value);
            }
        }
    }

    let path = expand_template(spec.template, &path_params)?;

    Ok(RequestDescriptor {
        method: spec.method.clone(),
        path,
        query,
        headers,
        body,
    })
}

/// Characters percent-encoded during template expansion: everything except
/// RFC 3986 unreserved characters.
const TEMPLATE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Expand a `{variable}` URI template against the supplied path parameters.
///
/// Simple expansion: each variable value is percent-encoded and substituted
/// in place. A template variable with no matching parameter is an error.
pub fn expand_template(
    template: &str,
    path_params: &BTreeMap<&str, String>,
) -> WnologyResult<String> {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        expanded.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            WnologyError::InvalidEndpoint(format!("unterminated template variable in {template}"))
        })?;
        let name = &after[..close];
        let value = path_params
            .get(name)
            .ok_or_else(|| WnologyError::MissingPathParam(name.to_string()))?;
        expanded.push_str(&utf8_percent_encode(value, TEMPLATE_ENCODE_SET).to_string());
        rest = &after[close + 1..];
    }
    expanded.push_str(rest);

    Ok(expanded)
}

/// Render a scalar parameter value as path/header text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
