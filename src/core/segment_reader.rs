use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{DocId, FunctionScoreError, SegmentOrdinal};

/// Entry point to the per-document data of a segment.
///
/// A segment is the evaluation scope of a query: scorers are built for one
/// `SegmentReader`, and any per-segment state they resolve (filter memberships,
/// segment-bound functions) is only valid for that reader.
///
/// Cloning a `SegmentReader` is cheap: fast field columns are shared.
#[derive(Clone)]
pub struct SegmentReader {
    segment_ord: SegmentOrdinal,
    max_doc: DocId,
    fast_fields: Arc<HashMap<String, Arc<[f64]>>>,
}

impl fmt::Debug for SegmentReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut field_names: Vec<&str> = self.fast_fields.keys().map(String::as_str).collect();
        field_names.sort_unstable();
        f.debug_struct("SegmentReader")
            .field("segment_ord", &self.segment_ord)
            .field("max_doc", &self.max_doc)
            .field("fast_fields", &field_names)
            .finish()
    }
}

impl SegmentReader {
    /// Creates a reader over a segment containing the doc ids `[0, max_doc)`.
    pub fn new(segment_ord: SegmentOrdinal, max_doc: DocId) -> SegmentReader {
        SegmentReader {
            segment_ord,
            max_doc,
            fast_fields: Arc::default(),
        }
    }

    /// Attaches a numeric fast field column to the segment.
    ///
    /// The column must hold exactly one value per document.
    pub fn with_fast_field(
        mut self,
        field_name: impl Into<String>,
        values: Vec<f64>,
    ) -> crate::Result<SegmentReader> {
        let field_name = field_name.into();
        if values.len() != self.max_doc as usize {
            return Err(FunctionScoreError::InvalidArgument(format!(
                "Fast field `{field_name}` has {} values, segment #{} has {} docs",
                values.len(),
                self.segment_ord,
                self.max_doc
            )));
        }
        Arc::make_mut(&mut self.fast_fields).insert(field_name, Arc::from(values));
        Ok(self)
    }

    /// Returns the ordinal of the segment within its `Searcher`.
    pub fn segment_ord(&self) -> SegmentOrdinal {
        self.segment_ord
    }

    /// Returns the highest document id ever attributed in
    /// this segment + 1.
    pub fn max_doc(&self) -> DocId {
        self.max_doc
    }

    /// Returns the numeric fast field column associated with `field_name`.
    pub fn fast_field_f64(&self, field_name: &str) -> crate::Result<Arc<[f64]>> {
        self.fast_fields.get(field_name).cloned().ok_or_else(|| {
            FunctionScoreError::SchemaError(format!(
                "Field `{field_name}` is not a fast field of segment #{}",
                self.segment_ord
            ))
        })
    }
}
