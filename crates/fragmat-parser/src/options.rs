use crate::schema::SchemaLayout;

/// How a model file is brought into memory and addressed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Memory-map the file instead of reading it into a buffer
    pub prefer_mmap: bool,
    pub layout: SchemaLayout,
}

impl LoadOptions {
    pub fn with_mmap(mut self, prefer_mmap: bool) -> Self {
        self.prefer_mmap = prefer_mmap;
        self
    }

    pub fn with_layout(mut self, layout: SchemaLayout) -> Self {
        self.layout = layout;
        self
    }
}
