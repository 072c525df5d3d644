//! Named call arguments.

use crate::value::Value;

/// Named arguments for a call, plus the reserved `limit`, `skip` and `data`.
///
/// Argument order is kept; it only matters for error messages, since each
/// property may be supplied once.
///
/// ```
/// use everyaction_core::Args;
///
/// let args = Args::new().arg("first", "Ada").arg("last", "Lovelace").limit(10);
/// assert_eq!(args.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub(crate) keywords: Vec<(String, Value)>,
    pub(crate) limit: Option<u32>,
    pub(crate) skip: Option<u32>,
    pub(crate) data: Option<serde_json::Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.push((name.into(), value.into()));
        self
    }

    /// Maximum number of items a paginated call returns; 0 means all.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Offset of the first item a paginated call returns.
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Send `data` as the body as-is, bypassing alias resolution.
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            keywords: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ..Self::default()
        }
    }
}

impl IntoIterator for Args {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.into_iter()
    }
}
