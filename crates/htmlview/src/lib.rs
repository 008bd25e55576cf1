//! # htmlview - HTML template rendering for web responses
//!
//! `htmlview` selects between two template store behaviors and writes
//! rendered HTML plus a content-type header to a response sink:
//!
//! - [`ProductionStore`]: templates compiled once at startup, reused for
//!   every request.
//! - [`DebugStore`]: templates recompiled per request from an explicit file
//!   list or a glob pattern, so template edits show up without restarting
//!   the process.
//!
//! Both implement [`HtmlRender`], so an application can pick the variant by
//! configuration and hand request handlers a `Box<dyn HtmlRender>`.
//!
//! Template syntax and execution are delegated to MiniJinja; data payloads
//! travel as [`serde_json::Value`] and become the root render context.
//!
//! ## Quick Start
//!
//! ```rust
//! use htmlview::{HtmlRender, MemorySink, ProductionStore, TemplateSet, HTML_CONTENT_TYPE};
//! use serde_json::json;
//!
//! let mut set = TemplateSet::new();
//! set.add_template("index.html", "<h1>{{ title }}</h1>").unwrap();
//!
//! let store = ProductionStore::new(set);
//! let page = store.instance("index.html", json!({ "title": "Home" })).unwrap();
//!
//! let mut sink = MemorySink::new();
//! page.render(&mut sink).unwrap();
//!
//! assert_eq!(sink.content_type(), Some(HTML_CONTENT_TYPE));
//! assert_eq!(sink.body(), b"<h1>Home</h1>");
//! ```
//!
//! ## Debug Stores
//!
//! A debug store needs exactly one template source: a file list or a glob
//! pattern. Each `instance` call recompiles from disk:
//!
//! ```rust,no_run
//! use htmlview::{DebugStore, HtmlRender};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), htmlview::RenderError> {
//! let store = DebugStore::from_glob("templates/**/*.html")?;
//! let page = store.instance("index.html", json!({ "title": "Home" }))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Functions
//!
//! Functions are registered on the store before it is shared with request
//! handlers; the `&mut self` receiver enforces that ordering:
//!
//! ```rust
//! use htmlview::{FunctionMap, HtmlRender, MemorySink, ProductionStore, TemplateSet};
//! use minijinja::value::Value;
//! use serde_json::json;
//!
//! let mut set = TemplateSet::new();
//! set.add_template("shout.html", "{{ upper(word) }}").unwrap();
//!
//! let mut store = ProductionStore::new(set);
//! store.register_functions(FunctionMap::new().add("upper", |args| {
//!     let s = args.0.first().map(|v| v.to_string()).unwrap_or_default();
//!     Ok(Value::from(s.to_uppercase()))
//! }));
//!
//! let mut sink = MemorySink::new();
//! store.instance("shout.html", json!({ "word": "hi" })).unwrap()
//!     .render(&mut sink).unwrap();
//! assert_eq!(sink.body(), b"HI");
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a recoverable [`RenderError`]: misconfiguration surfaces
//! at store construction, compilation failures surface from the debug
//! reload, and execution failures surface from the render call. By the time
//! an execution error is returned the content-type header has already been
//! sent, so callers must tolerate a partial response body.

mod error;
mod html;
mod set;
mod sink;
mod source;
mod store;

pub use error::RenderError;
pub use html::HtmlInstance;
pub use set::{FunctionMap, TemplateFn, TemplateSet};
pub use sink::{MemorySink, ResponseSink, HTML_CONTENT_TYPE};
pub use source::TemplateSource;
pub use store::{DebugStore, HtmlRender, ProductionStore};
