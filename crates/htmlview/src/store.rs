//! Production and debug template stores.
//!
//! A store hands out a per-request [`HtmlInstance`] bound to a template name
//! and a data payload. The two implementations trade off differently:
//!
//! - [`ProductionStore`] compiles once and reuses the same set for every
//!   request. Function registration happens before the store is shared
//!   (enforced by `&mut self`), after which the store is immutable.
//! - [`DebugStore`] recompiles its templates from disk on every `instance`
//!   call, so template files can be edited without restarting the process.
//!   The recompilation cost is deliberate and makes this variant unsuitable
//!   for production traffic.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::RenderError;
use crate::html::HtmlInstance;
use crate::set::{FunctionMap, TemplateSet};
use crate::source::TemplateSource;

/// The store contract shared by the production and debug variants.
///
/// The trait is object-safe so frameworks can hold a `Box<dyn HtmlRender>`
/// and swap variants by configuration.
pub trait HtmlRender: Send + Sync {
    /// Binds a template name and data payload into a render instance.
    ///
    /// An empty `name` selects the set's default template. The debug variant
    /// recompiles its templates here; compilation failures are returned, not
    /// fatal.
    fn instance(
        &self,
        name: &str,
        data: serde_json::Value,
    ) -> Result<HtmlInstance<'_>, RenderError>;

    /// Merges functions into the store's function set.
    ///
    /// Later registration for the same name overwrites. The `&mut` receiver
    /// means all registration must complete before the store is shared with
    /// request handlers; instances already created never observe later
    /// registrations.
    fn register_functions(&mut self, funcs: FunctionMap);

    /// Like [`instance`](Self::instance), serializing any `Serialize` payload.
    fn instance_for<T: Serialize>(
        &self,
        name: &str,
        data: &T,
    ) -> Result<HtmlInstance<'_>, RenderError>
    where
        Self: Sized,
    {
        self.instance(name, serde_json::to_value(data)?)
    }
}

fn requested_name(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_string())
}

/// Store for production use: one template set, compiled once.
///
/// # Example
///
/// ```rust
/// use htmlview::{HtmlRender, MemorySink, ProductionStore, TemplateSet};
/// use serde_json::json;
///
/// let mut set = TemplateSet::new();
/// set.add_template("index.html", "<h1>{{ title }}</h1>").unwrap();
///
/// let store = ProductionStore::new(set);
/// let page = store.instance("index.html", json!({ "title": "Home" })).unwrap();
///
/// let mut sink = MemorySink::new();
/// page.render(&mut sink).unwrap();
/// assert_eq!(sink.body(), b"<h1>Home</h1>");
/// ```
#[derive(Debug)]
pub struct ProductionStore {
    set: TemplateSet,
}

impl ProductionStore {
    /// Creates a store around an already-compiled template set.
    pub fn new(set: TemplateSet) -> Self {
        Self { set }
    }

    /// The store's template set.
    pub fn template_set(&self) -> &TemplateSet {
        &self.set
    }
}

impl HtmlRender for ProductionStore {
    fn instance(
        &self,
        name: &str,
        data: serde_json::Value,
    ) -> Result<HtmlInstance<'_>, RenderError> {
        Ok(HtmlInstance::borrowed(&self.set, requested_name(name), data))
    }

    fn register_functions(&mut self, funcs: FunctionMap) {
        self.set.register_functions(&funcs);
    }
}

/// Store for development use: templates recompiled from disk per request.
///
/// Construction validates the source descriptor; a store cannot exist with
/// neither files nor a glob pattern.
///
/// # Example
///
/// ```rust,no_run
/// use htmlview::{DebugStore, HtmlRender};
/// use serde_json::json;
///
/// # fn main() -> Result<(), htmlview::RenderError> {
/// let store = DebugStore::from_glob("templates/*.html")?;
/// // Recompiles templates/*.html, then binds name and data.
/// let page = store.instance("index.html", json!({ "title": "Home" }))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DebugStore {
    source: TemplateSource,
    funcs: FunctionMap,
}

impl DebugStore {
    /// Creates a store from a validated source descriptor.
    pub fn new(source: TemplateSource) -> Result<Self, RenderError> {
        source.validate()?;
        Ok(Self {
            source,
            funcs: FunctionMap::new(),
        })
    }

    /// Creates a store that recompiles an explicit, ordered file list.
    pub fn from_files<I, P>(files: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(TemplateSource::Files(
            files.into_iter().map(Into::into).collect(),
        ))
    }

    /// Creates a store that recompiles every file matching a glob pattern.
    pub fn from_glob(pattern: impl Into<String>) -> Result<Self, RenderError> {
        Self::new(TemplateSource::Glob(pattern.into()))
    }

    /// The store's source descriptor.
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }
}

impl HtmlRender for DebugStore {
    fn instance(
        &self,
        name: &str,
        data: serde_json::Value,
    ) -> Result<HtmlInstance<'_>, RenderError> {
        let mut set = self.source.load()?;
        if !self.funcs.is_empty() {
            set.register_functions(&self.funcs);
        }
        Ok(HtmlInstance::owned(set, requested_name(name), data))
    }

    fn register_functions(&mut self, funcs: FunctionMap) {
        self.funcs.merge(funcs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, HTML_CONTENT_TYPE};
    use minijinja::value::{Rest, Value};
    use serde_json::json;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_template(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn render_body(store: &dyn HtmlRender, name: &str, data: serde_json::Value) -> String {
        let mut sink = MemorySink::new();
        store.instance(name, data).unwrap().render(&mut sink).unwrap();
        sink.body_string()
    }

    #[test]
    fn test_production_named_template() {
        let mut set = TemplateSet::new();
        set.add_template("t.html", "value: {{ n }}").unwrap();
        let store = ProductionStore::new(set);

        assert_eq!(render_body(&store, "t.html", json!({ "n": 7 })), "value: 7");
    }

    #[test]
    fn test_production_empty_name_uses_default() {
        let mut set = TemplateSet::new();
        set.add_template("home.html", "home").unwrap();
        set.add_template("about.html", "about").unwrap();
        let store = ProductionStore::new(set);

        assert_eq!(render_body(&store, "", json!({})), "home");
    }

    #[test]
    fn test_production_register_functions_before_sharing() {
        let mut set = TemplateSet::new();
        set.add_template("f.html", "{{ upper(word) }}").unwrap();
        let mut store = ProductionStore::new(set);

        store.register_functions(FunctionMap::new().add("upper", |args: Rest<Value>| {
            let s = args.0.first().map(|v| v.to_string()).unwrap_or_default();
            Ok(Value::from(s.to_uppercase()))
        }));

        assert_eq!(render_body(&store, "f.html", json!({ "word": "ok" })), "OK");
    }

    #[test]
    fn test_debug_store_requires_a_source() {
        assert!(matches!(
            DebugStore::from_files(Vec::<PathBuf>::new()),
            Err(RenderError::Config(_))
        ));
        assert!(matches!(
            DebugStore::from_glob(""),
            Err(RenderError::Config(_))
        ));
    }

    #[test]
    fn test_debug_store_recompiles_per_instance() {
        let dir = TempDir::new().unwrap();
        let path = write_template(dir.path(), "hot.html", "v1");
        let store = DebugStore::from_files([path]).unwrap();

        let first = store.instance("hot.html", json!({})).unwrap();

        write_template(dir.path(), "hot.html", "v2");

        // The already-constructed instance keeps its compiled set; only the
        // next instance sees the edit.
        let mut sink = MemorySink::new();
        first.render(&mut sink).unwrap();
        assert_eq!(sink.body_string(), "v1");

        assert_eq!(render_body(&store, "hot.html", json!({})), "v2");
    }

    #[test]
    fn test_debug_store_glob() {
        let dir = TempDir::new().unwrap();
        write_template(dir.path(), "one.html", "1");
        write_template(dir.path(), "two.html", "2");
        let pattern = dir.path().join("*.html").to_string_lossy().into_owned();
        let store = DebugStore::from_glob(pattern).unwrap();

        assert_eq!(render_body(&store, "one.html", json!({})), "1");
        assert_eq!(render_body(&store, "two.html", json!({})), "2");
    }

    #[test]
    fn test_debug_glob_no_matches_fails_instance() {
        let dir = TempDir::new().unwrap();
        let pattern = dir.path().join("*.html").to_string_lossy().into_owned();
        let store = DebugStore::from_glob(pattern).unwrap();

        let err = store.instance("", json!({})).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }

    #[test]
    fn test_debug_functions_apply_after_reload() {
        let dir = TempDir::new().unwrap();
        let path = write_template(dir.path(), "f.html", "{{ stamp() }}");
        let mut store = DebugStore::from_files([path]).unwrap();

        store.register_functions(
            FunctionMap::new().add("stamp", |_args: Rest<Value>| Ok(Value::from("marked"))),
        );

        assert_eq!(render_body(&store, "f.html", json!({})), "marked");
    }

    #[test]
    fn test_registration_does_not_affect_existing_instance() {
        let dir = TempDir::new().unwrap();
        let path = write_template(dir.path(), "plain.html", "{{ word }}");
        let mut store = DebugStore::from_files([path]).unwrap();

        let earlier = store.instance("plain.html", json!({ "word": "before" })).unwrap();
        let mut sink = MemorySink::new();
        earlier.render(&mut sink).unwrap();

        store.register_functions(
            FunctionMap::new().add("noop", |_args: Rest<Value>| Ok(Value::UNDEFINED)),
        );

        assert_eq!(sink.body_string(), "before");
    }

    #[test]
    fn test_stores_behind_trait_object() {
        let mut set = TemplateSet::new();
        set.add_template("x.html", "x").unwrap();
        let boxed: Box<dyn HtmlRender> = Box::new(ProductionStore::new(set));

        let mut sink = MemorySink::new();
        boxed
            .instance("x.html", json!({}))
            .unwrap()
            .render(&mut sink)
            .unwrap();
        assert_eq!(sink.content_type(), Some(HTML_CONTENT_TYPE));
        assert_eq!(sink.body_string(), "x");
    }

    #[test]
    fn test_instance_for_serializes_payload() {
        #[derive(serde::Serialize)]
        struct Page {
            title: String,
        }

        let mut set = TemplateSet::new();
        set.add_template("p.html", "{{ title }}").unwrap();
        let store = ProductionStore::new(set);

        let mut sink = MemorySink::new();
        store
            .instance_for("p.html", &Page { title: "T".into() })
            .unwrap()
            .render(&mut sink)
            .unwrap();
        assert_eq!(sink.body_string(), "T");
    }
}
