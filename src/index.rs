//! Dense indices for interned vertices.

/// Types that can be used as a dense index into per-vertex storage.
pub(crate) trait EntityIndex: Copy + Eq {
    fn new(index: usize) -> Self {
        Self::try_new(index).unwrap_or_else(|| panic!("vertex index {} out of range", index))
    }

    fn try_new(index: usize) -> Option<Self>;
    fn index(self) -> usize;
}

/// Implements [`EntityIndex`] for a newtype over an unsigned integer.
macro_rules! entity_impl {
    ($entity:ident, $backing:ty) => {
        impl $crate::index::EntityIndex for $entity {
            #[inline(always)]
            fn try_new(ix: usize) -> Option<Self> {
                if ix <= (<$backing>::MAX as usize) || (<$backing>::BITS) > usize::BITS {
                    Some($entity(ix as $backing))
                } else {
                    None
                }
            }

            #[inline(always)]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

/// Position of a vertex in the graph's interning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeIndex(u32);

entity_impl!(NodeIndex, u32);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn node_index_roundtrips_usize() {
        assert_eq!(NodeIndex::new(0).index(), 0);
        assert_eq!(NodeIndex::new(17).index(), 17);
        assert_eq!(NodeIndex::try_new(u32::MAX as usize), Some(NodeIndex(u32::MAX)));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn node_index_rejects_overflow() {
        assert_eq!(NodeIndex::try_new(u32::MAX as usize + 1), None);
    }
}
