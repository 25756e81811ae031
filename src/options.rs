//! Configuration for the converter.

#[cfg(feature = "bon")]
use bon::Builder;

/// The default size, in bytes, of the anchor and inline text buffers.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Umbrella options struct.
///
/// Both capacities model fixed C-style buffers: one byte is reserved for the
/// terminator, so a capacity of 1024 holds at most 1023 bytes of output.
/// Content beyond that is dropped silently and reported in
/// [`Diagnostics`](crate::Diagnostics).
///
/// ```rust
/// # use marktree::Options;
/// let options = Options::default();
/// assert_eq!(options.anchor_capacity, 1024);
/// assert_eq!(options.text_capacity, 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "bon", derive(Builder))]
pub struct Options {
    /// Capacity of the buffer heading and link anchors are built in.
    ///
    /// ```rust
    /// # #[cfg(feature = "bon")] {
    /// # use marktree::Options;
    /// let options = Options::builder().anchor_capacity(16).build();
    /// assert_eq!(options.anchor_capacity, 16);
    /// assert_eq!(options.text_capacity, 1024);
    /// # }
    /// ```
    #[cfg_attr(feature = "bon", builder(default = DEFAULT_CAPACITY))]
    pub anchor_capacity: usize,

    /// Capacity of the buffer a whitespace-prefixed inline text is copied
    /// into.  Text without leading whitespace is never bounded.
    #[cfg_attr(feature = "bon", builder(default = DEFAULT_CAPACITY))]
    pub text_capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            anchor_capacity: DEFAULT_CAPACITY,
            text_capacity: DEFAULT_CAPACITY,
        }
    }
}
