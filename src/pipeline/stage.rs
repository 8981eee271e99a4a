//! Named pipeline stages.
//!
//! Each step of the dashboard run (ingest, normalize, filter, aggregate) is
//! wrapped in a stage so its execution shows up in trace logs under a stable
//! name.

use std::marker::PhantomData;

/// A pure stage that performs no I/O.
///
/// Pure stages are deterministic: same input, same output.
///
/// # Example
///
/// ```rust
/// use restodash::pipeline::stage::PureStage;
///
/// let stage = PureStage::new("Double", |x: i32| x * 2);
/// assert_eq!(stage.run(21), 42);
/// ```
pub struct PureStage<F, I, O> {
    name: String,
    func: F,
    _phantom: PhantomData<(I, O)>,
}

impl<F, I, O> PureStage<F, I, O>
where
    F: Fn(I) -> O,
{
    /// Create a new pure stage with a name and transformation function.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _phantom: PhantomData,
        }
    }

    pub fn run(&self, input: I) -> O {
        log::trace!("Running stage '{}'", self.name);
        (self.func)(input)
    }
}

/// A stage that can fail, such as parsing.
///
/// # Example
///
/// ```rust
/// use restodash::pipeline::stage::FallibleStage;
///
/// let stage = FallibleStage::new("Parse", |s: &str| s.parse::<u32>());
/// assert_eq!(stage.run("42"), Ok(42));
/// assert!(stage.run("many").is_err());
/// ```
pub struct FallibleStage<F, I, O, E> {
    name: String,
    func: F,
    _phantom: PhantomData<(I, O, E)>,
}

impl<F, I, O, E> FallibleStage<F, I, O, E>
where
    F: Fn(I) -> Result<O, E>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _phantom: PhantomData,
        }
    }

    /// Run the step, passing its error through unchanged.
    pub fn run(&self, input: I) -> Result<O, E> {
        log::trace!("Running stage '{}'", self.name);
        (self.func)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_stage_chains() {
        let double = PureStage::new("Double", |x: i32| x * 2);
        let negate = PureStage::new("Negate", |x: i32| -x);
        assert_eq!(negate.run(double.run(21)), -42);
    }

    #[test]
    fn test_fallible_stage_success() {
        let stage = FallibleStage::new("Parse", |s: String| {
            s.parse::<i32>().map_err(|_| "Parse error")
        });
        assert_eq!(stage.run("42".to_string()), Ok(42));
    }

    #[test]
    fn test_fallible_stage_failure() {
        let stage = FallibleStage::new("Parse", |s: String| {
            s.parse::<i32>().map_err(|_| "Parse error")
        });
        assert_eq!(stage.run("not a number".to_string()), Err("Parse error"));
    }
}
