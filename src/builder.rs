use crate::dims::ChainDims;
use crate::reporter::LabelStyle;
use crate::ChainEngine;

pub struct ChainEngineBuilder {
    dims: ChainDims,
    labels: Option<LabelStyle>,
    check_shapes: bool,
}

impl ChainEngineBuilder {
    pub fn new(dims: ChainDims) -> Self {
        Self {
            dims,
            labels: None,
            check_shapes: false,
        }
    }
    pub fn with_labels(mut self, labels: LabelStyle) -> Self {
        self.labels = Some(labels);
        self
    }
    /// Verify every matrix against its declared `p[i] x p[i+1]` shape before
    /// evaluating.
    pub fn with_shape_check(mut self, enabled: bool) -> Self {
        self.check_shapes = enabled;
        self
    }
    pub fn build(self) -> ChainEngine {
        let labels = self.labels.unwrap_or_default();
        ChainEngine::with_options(self.dims, labels, self.check_shapes)
    }
}
