//! Operations that can be fanned out over every package

use crate::error::Result;
use crate::options::Options;

use super::package::Package;

/// What a single package visit reported back to the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The visit succeeded
    Success,
    /// The visit failed; the batch stops here
    Failure,
    /// The visit produced no verdict; the running result is left alone
    Neutral,
}

impl Outcome {
    /// Fold this outcome into the running batch result
    pub fn apply(self, running: bool) -> bool {
        match self {
            Self::Success => true,
            Self::Failure => false,
            Self::Neutral => running,
        }
    }
}

impl From<bool> for Outcome {
    fn from(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Self::Neutral
    }
}

type Visitor<'a> = Box<dyn FnMut(&Package<'_>) -> Outcome + 'a>;

/// An operation run by [`Workspace::each`](super::Workspace::each)
pub enum Operation<'a> {
    /// Install dependencies and register for linking
    Install,
    /// Remove installed dependencies
    Uninstall,
    /// Run the test script
    Test,
    /// Link workspace siblings
    Link,
    /// Cut a release with the given option overrides
    Publish(Options),
    /// Run a caller-supplied closure
    Visit(Visitor<'a>),
}

impl<'a> Operation<'a> {
    /// Wrap a closure; its return value is converted into an [`Outcome`]
    pub fn visit<F, R>(mut f: F) -> Self
    where
        F: FnMut(&Package<'_>) -> R + 'a,
        R: Into<Outcome>,
    {
        Self::Visit(Box::new(move |package: &Package<'_>| f(package).into()))
    }

    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Uninstall => "uninstall",
            Self::Test => "test",
            Self::Link => "link",
            Self::Publish(_) => "publish",
            Self::Visit(_) => "visit",
        }
    }

    /// Run the operation against one package.
    ///
    /// Only manifest failures from `link` and `publish` surface as `Err`;
    /// every other failure is reported as [`Outcome::Failure`].
    pub(crate) fn run(&mut self, package: &Package<'_>) -> Result<Outcome> {
        let outcome: Outcome = match self {
            Self::Install => package.install().into(),
            Self::Uninstall => package.uninstall().into(),
            Self::Test => package.test().into(),
            Self::Link => package.link()?.into(),
            Self::Publish(options) => package.publish(options)?.into(),
            Self::Visit(f) => f(package),
        };
        Ok(outcome)
    }
}

impl std::fmt::Debug for Operation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Publish(options) => f.debug_tuple("Publish").field(options).finish(),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_apply() {
        assert!(Outcome::Success.apply(false));
        assert!(!Outcome::Failure.apply(true));
        assert!(Outcome::Neutral.apply(true));
        assert!(!Outcome::Neutral.apply(false));
    }

    #[test]
    fn test_outcome_conversions() {
        assert_eq!(Outcome::from(true), Outcome::Success);
        assert_eq!(Outcome::from(false), Outcome::Failure);
        assert_eq!(Outcome::from(()), Outcome::Neutral);
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::Install.name(), "install");
        assert_eq!(Operation::Publish(Options::new()).name(), "publish");
        assert_eq!(Operation::visit(|_| true).name(), "visit");
    }
}
