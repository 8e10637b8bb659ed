/// Implemented for structs expanded with `CowBox` in their derive list.
///
/// Copies of such a value share one storage allocation until one of them
/// writes to a mutating field, at which point the writer takes its own copy
/// of the storage.
pub trait CowBox {
    /// Whether `self` and `other` currently share storage.
    ///
    /// Values that share storage have equal tracked fields. Values that do
    /// not may still compare equal.
    fn is_identical(&self, other: &Self) -> bool;
}
