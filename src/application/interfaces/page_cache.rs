use mockall::automock;

/// Cached route representations. Mutations call `invalidate` so the next
/// read of an affected path is recomputed.
#[automock]
pub trait PageCache: Send + Sync {
    fn invalidate(&self, path_prefix: &str);
}
