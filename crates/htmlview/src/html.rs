//! Per-request render instances.

use std::borrow::Cow;

use crate::error::RenderError;
use crate::set::TemplateSet;
use crate::sink::{ResponseSink, HTML_CONTENT_TYPE};

/// An immutable, single-use binding of a template set, an optional template
/// name, and a data payload.
///
/// Instances are produced per request by a store (see
/// [`HtmlRender::instance`](crate::HtmlRender::instance)) and discarded after
/// one [`render`](Self::render) call. A production store's instances borrow
/// the store's shared set; a debug store's instances own a freshly compiled
/// one, so a reload between two requests never changes an already-constructed
/// instance.
#[derive(Debug)]
pub struct HtmlInstance<'a> {
    set: Cow<'a, TemplateSet>,
    name: Option<String>,
    data: serde_json::Value,
}

impl<'a> HtmlInstance<'a> {
    pub(crate) fn borrowed(
        set: &'a TemplateSet,
        name: Option<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            set: Cow::Borrowed(set),
            name,
            data,
        }
    }

    pub(crate) fn owned(set: TemplateSet, name: Option<String>, data: serde_json::Value) -> Self {
        Self {
            set: Cow::Owned(set),
            name,
            data,
        }
    }

    /// The template this instance will execute, or `None` for the set's
    /// default template.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The template set bound to this instance.
    pub fn template_set(&self) -> &TemplateSet {
        &self.set
    }

    /// Renders into the sink: content-type header first, body second.
    ///
    /// The header is `text/html; charset=utf-8`, written exactly once before
    /// any body bytes. An execution failure after that point leaves the sink
    /// with the header set and a possibly partial body; callers decide what
    /// to do with the response (typically log and answer with a 5xx).
    pub fn render<S: ResponseSink>(&self, sink: &mut S) -> Result<(), RenderError> {
        sink.set_content_type(HTML_CONTENT_TYPE);
        self.set.execute_to(self.name.as_deref(), &self.data, sink)
    }
}
