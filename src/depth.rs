//!

#[rustfmt::skip]
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    derive_more::Deref,
    derive_more::From,
)]
pub struct Depth(pub(crate) u32);

impl Depth {
    /// The depth of a tree root.
    pub const ROOT: Self = Self(0);
}

impl std::fmt::Debug for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Depth({})", self.0)
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add<u32> for Depth {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: u32) -> Self {
        Self(self.0 + rhs)
    }
}
