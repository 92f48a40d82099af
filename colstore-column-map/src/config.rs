/// Run-time configuration for dense-bitmap stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnStoreConfig {
    /// Skip the bitmap lookup for slots holding a non-zero value. Turning this
    /// off resolves every null test through the bitmap; results are identical.
    pub zero_sentinel_fast_path: bool,
}

impl Default for ColumnStoreConfig {
    fn default() -> Self {
        Self {
            zero_sentinel_fast_path: true,
        }
    }
}
