/// Implements the set operators for a wrapper around an integer `bits` field.
///
/// `&` is intersection, `|` union, `^` symmetric difference, and `!` the
/// complement with respect to the whole board.
macro_rules! bitset_traits {
    ($name:ident) => {
        $crate::bitset::bitset_traits!(@binary $name, BitAnd, bitand, BitAndAssign, bitand_assign, &);
        $crate::bitset::bitset_traits!(@binary $name, BitOr, bitor, BitOrAssign, bitor_assign, |);
        $crate::bitset::bitset_traits!(@binary $name, BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

        impl std::ops::Not for $name {
            type Output = Self;

            fn not(self) -> Self {
                Self { bits: !self.bits }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self { bits: 0 }
            }
        }
    };
    (@binary $name:ident, $op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $sym:tt) => {
        impl std::ops::$op for $name {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self {
                    bits: self.bits $sym rhs.bits,
                }
            }
        }

        impl std::ops::$assign_op for $name {
            fn $assign_method(&mut self, rhs: Self) {
                *self = std::ops::$op::$method(*self, rhs);
            }
        }
    };
}
pub(crate) use bitset_traits;
