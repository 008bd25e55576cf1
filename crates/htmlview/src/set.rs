//! Compiled template sets and custom template functions.
//!
//! A [`TemplateSet`] is the compiled, executable form of one or more named
//! templates. It wraps a MiniJinja environment and remembers which template
//! was added first: that one acts as the set's default when a render request
//! names no template.
//!
//! Custom functions are collected in a [`FunctionMap`] and merged into a set
//! before execution. Functions registered after execution has begun never
//! affect that execution.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::value::{Rest, Value};
use minijinja::Environment;

use crate::error::RenderError;

/// A callable usable from template bodies.
///
/// Functions take their arguments as a variadic list of MiniJinja values and
/// return a value or a template error. They are reference-counted so one
/// [`FunctionMap`] can be applied to any number of freshly compiled sets.
pub type TemplateFn =
    Arc<dyn Fn(Rest<Value>) -> Result<Value, minijinja::Error> + Send + Sync>;

/// Named functions to expose inside template bodies.
///
/// Later registration for the same name overwrites the earlier entry.
///
/// # Example
///
/// ```rust
/// use htmlview::FunctionMap;
/// use minijinja::value::Value;
///
/// let funcs = FunctionMap::new().add("upper", |args| {
///     let s = args.0.first().map(|v| v.to_string()).unwrap_or_default();
///     Ok(Value::from(s.to_uppercase()))
/// });
/// assert_eq!(funcs.len(), 1);
/// ```
#[derive(Default, Clone)]
pub struct FunctionMap {
    entries: BTreeMap<String, TemplateFn>,
}

impl FunctionMap {
    /// Creates an empty function map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function, returning the map for chaining.
    pub fn add<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Rest<Value>) -> Result<Value, minijinja::Error> + Send + Sync + 'static,
    {
        self.insert(name, func);
        self
    }

    /// Inserts a function, overwriting any earlier entry with the same name.
    pub fn insert<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(Rest<Value>) -> Result<Value, minijinja::Error> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Arc::new(func));
    }

    /// Merges another map into this one. Entries in `other` win on conflict.
    pub fn merge(&mut self, other: FunctionMap) {
        self.entries.extend(other.entries);
    }

    /// Returns true if no functions are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of registered functions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the registered functions by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateFn)> {
        self.entries.iter().map(|(name, f)| (name.as_str(), f))
    }
}

impl fmt::Debug for FunctionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.entries.keys())
            .finish()
    }
}

/// A compiled set of named templates plus registered functions.
///
/// Sets are immutable once handed to a production store; the debug store
/// rebuilds a fresh set on every instance request instead.
///
/// # Example
///
/// ```rust
/// use htmlview::TemplateSet;
///
/// let mut set = TemplateSet::new();
/// set.add_template("index.html", "<h1>{{ title }}</h1>").unwrap();
/// assert!(set.has_template("index.html"));
/// assert_eq!(set.default_template(), Some("index.html"));
/// ```
#[derive(Clone)]
pub struct TemplateSet {
    env: Environment<'static>,
    default_name: Option<String>,
}

impl TemplateSet {
    /// Creates an empty template set.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            default_name: None,
        }
    }

    /// Compiles a set from an explicit, ordered list of template files.
    ///
    /// Each template is named by its file name including extension, matching
    /// the path-based lookup callers use (`"index.html"`, not `"index"`).
    /// A later file with the same file name overwrites an earlier one.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, RenderError> {
        let mut set = Self::new();
        for path in paths {
            set.add_file(path.as_ref())?;
        }
        Ok(set)
    }

    /// Compiles a set from every file currently matching a glob pattern.
    ///
    /// Matches are sorted lexicographically so the resulting set does not
    /// depend on filesystem enumeration order. A pattern matching no files
    /// is a compilation error.
    pub fn from_glob(pattern: &str) -> Result<Self, RenderError> {
        let mut matches = glob::glob(pattern)?
            .collect::<Result<Vec<PathBuf>, _>>()?;
        matches.retain(|p| p.is_file());
        matches.sort();
        if matches.is_empty() {
            return Err(RenderError::Template(format!(
                "glob pattern {pattern:?} matched no template files"
            )));
        }
        Self::from_files(&matches)
    }

    /// Reads one file and compiles it into the set.
    fn add_file(&mut self, path: &Path) -> Result<(), RenderError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                RenderError::Template(format!("not a template file path: {}", path.display()))
            })?;
        let source = std::fs::read_to_string(path)?;
        self.add_template(&name, &source)
    }

    /// Compiles a named template from source into the set.
    ///
    /// The first template added becomes the set's default. Adding a template
    /// under an existing name replaces it.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        if self.default_name.is_none() {
            self.default_name = Some(name.to_string());
        }
        Ok(())
    }

    /// Makes every function in `funcs` callable from template bodies.
    ///
    /// Must happen before the set is used to render; renders already in
    /// flight are unaffected.
    pub fn register_functions(&mut self, funcs: &FunctionMap) {
        for (name, func) in funcs.iter() {
            let f = Arc::clone(func);
            self.env
                .add_function(name.to_string(), move |args: Rest<Value>| f(args));
        }
    }

    /// Returns the name of the default template, if any template was added.
    pub fn default_template(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    /// Checks if a template with the given name exists in the set.
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Iterates over the names of all compiled templates.
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.env.templates().map(|(name, _)| name)
    }

    /// Executes the named template (or the default when `name` is `None`)
    /// against `data`, streaming output into `out`.
    pub fn execute_to<W: io::Write>(
        &self,
        name: Option<&str>,
        data: &serde_json::Value,
        out: W,
    ) -> Result<(), RenderError> {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => self.default_name.as_deref().ok_or_else(|| {
                RenderError::TemplateNotFound("template set is empty".to_string())
            })?,
        };
        let tmpl = self.env.get_template(name)?;
        tmpl.render_to_write(Value::from_serialize(data), out)?;
        Ok(())
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateSet")
            .field("templates", &self.template_names().collect::<Vec<_>>())
            .field("default", &self.default_name)
            .finish()
    }
}
