//! Composable transform chains.
//!
//! A [`TransformChain`] is an ordered list of fallible steps `T -> Result<T, E>`.
//! Chains are values: [`append`](TransformChain::append) and
//! [`concat`](TransformChain::concat) consume a chain and return the
//! extended one, and cloning a chain only bumps reference counts on its
//! steps. Extending one holder's chain never changes another holder's copy.
//!
//! # Example
//!
//! ```rust
//! use bloom_pipeline::TransformChain;
//!
//! let double = TransformChain::<i64, String>::new().append(|n| Ok(n * 2));
//! let chain = double.clone().append(|n| Ok(n + 1));
//!
//! assert_eq!(chain.apply(5), Ok(11));
//! assert_eq!(double.apply(5), Ok(10));
//! ```

use std::fmt;
use std::sync::Arc;

use bloom_core::ProcessError;

/// A single step of a chain.
pub type Step<T, E> = Arc<dyn Fn(T) -> Result<T, E> + Send + Sync>;

/// Ordered, persistent sequence of transform steps.
pub struct TransformChain<T, E = ProcessError> {
    steps: Vec<Step<T, E>>,
}

impl<T, E> TransformChain<T, E> {
    /// An empty chain; applying it returns the input unchanged.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// A chain with a single step.
    pub fn from_step<F>(step: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + Send + Sync + 'static,
    {
        Self::new().append(step)
    }

    /// Returns this chain with `step` added at the end.
    pub fn append<F>(mut self, step: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + Send + Sync + 'static,
    {
        self.steps.push(Arc::new(step));
        self
    }

    /// Returns this chain followed by every step of `other`, in order.
    ///
    /// Concatenating onto an empty chain adopts `other` as is.
    pub fn concat(mut self, other: TransformChain<T, E>) -> Self {
        if self.steps.is_empty() {
            return other;
        }
        self.steps.extend(other.steps);
        self
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step in order, feeding each the previous output.
    ///
    /// The first failing step stops the chain; its error is returned
    /// unchanged and later steps never run.
    pub fn apply(&self, initial: T) -> Result<T, E> {
        let total = self.steps.len();
        self.steps
            .iter()
            .enumerate()
            .try_fold(initial, |value, (index, step)| {
                log::trace!("applying step {}/{}", index + 1, total);
                step(value)
            })
    }
}

impl<T, E> Default for TransformChain<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for TransformChain<T, E> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<T, E> fmt::Debug for TransformChain<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformChain")
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl<T, E> FromIterator<TransformChain<T, E>> for TransformChain<T, E> {
    fn from_iter<I: IntoIterator<Item = TransformChain<T, E>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), TransformChain::concat)
    }
}
