//! Transient read-only composition of several collections' entries.

use crate::element::Element;
use crate::error::Result;
use crate::iteration::TypeBinding;

/// Borrowed view over the entries of one or more collections, in order.
///
/// A merge view exists only for the duration of a `concat` or `merged` call.
/// It validates the incoming values before the receiver is touched, which is
/// what makes merging atomic.
pub(crate) struct MergeView<'a, K, V> {
    parts: Vec<&'a [(K, V)]>,
}

impl<'a, K, V: Element> MergeView<'a, K, V> {
    pub(crate) fn new() -> Self {
        Self { parts: Vec::new() }
    }

    pub(crate) fn with(mut self, part: &'a [(K, V)]) -> Self {
        self.parts.push(part);
        self
    }

    pub(crate) fn len(&self) -> usize {
        self.parts.iter().map(|part| part.len()).sum()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &'a (K, V)> + '_ {
        self.parts.iter().copied().flat_map(<[(K, V)]>::iter)
    }

    /// Checks every value against `binding` and returns the binding that
    /// results from accepting them all.
    pub(crate) fn validate(&self, binding: TypeBinding) -> Result<TypeBinding> {
        binding.check_all(self.iter().map(|(_, value)| value))
    }
}
