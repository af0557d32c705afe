//! Macros for writing nested [`Mapping`](crate::Mapping) literals.

/// Builds a [`Mapping`](crate::Mapping) literal in the shape of the nested
/// construction input: `"name"` for a leaf entry, `"name" => [ ... ]` for an
/// entry with children.
///
/// ```
/// use rstree::{mapping, Tree};
///
/// let doc = [mapping!("a" => ["b" => ["c", "d"], "e" => ["i", "g"]])];
/// let tree: Tree = Tree::from_mapping(&doc).unwrap();
/// assert!(tree.contains("a/b/d"));
/// ```
#[macro_export]
macro_rules! mapping {
    ($name:literal => [ $($children:tt)* ]) => {
        $crate::Mapping::Branch($name.into(), $crate::mapping!(@list [] $($children)*))
    };
    ($name:literal) => {
        $crate::Mapping::Name($name.into())
    };
    (@list [$($acc:expr,)*]) => {
        ::std::vec![$($acc,)*]
    };
    (@list [$($acc:expr,)*] $name:literal => [ $($sub:tt)* ] $(, $($rest:tt)*)?) => {
        $crate::mapping!(
            @list
            [$($acc,)* $crate::Mapping::Branch($name.into(), $crate::mapping!(@list [] $($sub)*)),]
            $($($rest)*)?
        )
    };
    (@list [$($acc:expr,)*] $name:literal $(, $($rest:tt)*)?) => {
        $crate::mapping!(
            @list
            [$($acc,)* $crate::Mapping::Name($name.into()),]
            $($($rest)*)?
        )
    };
}
